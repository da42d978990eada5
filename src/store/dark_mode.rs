//! 다크모드 설정

use super::storage::{KeyValueStore, StoreError, DARK_MODE_KEY};

/// 다크모드 플래그
///
/// `"true"` 문자열일 때만 켜진 것으로 복원합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DarkMode {
    enabled: bool,
}

impl DarkMode {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let enabled = match store.get(DARK_MODE_KEY) {
            Ok(value) => value.as_deref().map(str::trim) == Some("true"),
            Err(e) => {
                log::warn!("다크모드 설정 읽기 실패: {}", e);
                false
            }
        };
        Self { enabled }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(DARK_MODE_KEY, if self.enabled { "true" } else { "false" })
    }

    /// 전환. 반환: 전환 후 상태
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 토글 버튼 아이콘
    pub fn button_icon(&self) -> &'static str {
        if self.enabled {
            "☀️"
        } else {
            "🌙"
        }
    }
}
