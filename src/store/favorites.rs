//! 즐겨찾기 집합
//!
//! 식별자 배열로 저장하고 집합으로 복원합니다. 저장 순서는 식별자 정렬 순서라
//! 같은 집합은 항상 같은 문자열로 직렬화됩니다.

use std::collections::BTreeSet;

use super::storage::{load_json, save_json, KeyValueStore, StoreError, FAVORITES_KEY};
use crate::data::RecordKey;
use crate::search::FavoriteSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    keys: BTreeSet<RecordKey>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소에서 복원 (없거나 손상되면 빈 집합)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let keys: Vec<RecordKey> = load_json(store, FAVORITES_KEY).unwrap_or_default();
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let keys: Vec<&RecordKey> = self.keys.iter().collect();
        save_json(store, FAVORITES_KEY, &keys)
    }

    /// 추가/제거 전환. 반환: 전환 후 즐겨찾기 여부
    pub fn toggle(&mut self, key: RecordKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn has(&self, key: &RecordKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordKey> {
        self.keys.iter()
    }
}

impl FavoriteSet for Favorites {
    fn is_favorite(&self, key: &RecordKey) -> bool {
        self.has(key)
    }
}
