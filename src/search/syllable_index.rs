//! 초성별 음절 캐시
//!
//! 데이터 로드 직후 한 번만 만들며, 초성 버튼을 누를 때 나타나는 음절 버튼
//! 목록으로 쓰입니다. 끝음절 조각 레코드는 포함하지 않습니다.

use std::collections::{HashMap, HashSet};

use crate::core::unicode::{leading_chosung, PLAIN_CHOSEONG};
use crate::core::korean_cmp;
use crate::data::HanjaRecord;

/// 초성 → 정렬된 음 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableIndex {
    by_chosung: HashMap<char, Vec<String>>,
}

impl SyllableIndex {
    /// 레코드 전체를 한 번 순회하여 캐시 생성
    pub fn build(records: &[HanjaRecord]) -> Self {
        let mut sets: HashMap<char, HashSet<&str>> =
            PLAIN_CHOSEONG.iter().map(|&c| (c, HashSet::new())).collect();

        for record in records {
            if record.is_ending_fragment() {
                continue;
            }
            let sound = record.sound.trim();
            if sound.is_empty() {
                continue;
            }
            if let Some(chosung) = leading_chosung(sound) {
                if let Some(set) = sets.get_mut(&chosung) {
                    set.insert(sound);
                }
            }
        }

        let by_chosung: HashMap<char, Vec<String>> = sets
            .into_iter()
            .map(|(chosung, set)| {
                let mut sounds: Vec<String> = set.into_iter().map(str::to_string).collect();
                sounds.sort_by(|a, b| korean_cmp(a, b));
                (chosung, sounds)
            })
            .collect();

        log::debug!(
            "음절 캐시 생성: {}개 음",
            by_chosung.values().map(Vec::len).sum::<usize>()
        );
        Self { by_chosung }
    }

    /// 초성에 해당하는 음 목록
    ///
    /// 14개 필터 초성이면 항상 `Some`이며, 해당 음이 없으면 빈 슬라이스입니다.
    /// 필터 초성이 아니면 `None`.
    pub fn syllables(&self, chosung: char) -> Option<&[String]> {
        self.by_chosung.get(&chosung).map(Vec::as_slice)
    }

    /// (초성, 음 목록)을 버튼 순서대로
    pub fn iter(&self) -> impl Iterator<Item = (char, &[String])> + '_ {
        PLAIN_CHOSEONG
            .iter()
            .filter_map(move |&c| self.syllables(c).map(|s| (c, s)))
    }
}
