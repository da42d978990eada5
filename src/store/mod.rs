//! 영속 사용자 상태: 즐겨찾기, 최근 기록, 다크모드

pub mod dark_mode;
pub mod favorites;
pub mod recent;
pub mod storage;

pub use dark_mode::DarkMode;
pub use favorites::Favorites;
pub use recent::{format_label, HistoryEntry, RecentHistory};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persisted, StoreError};
