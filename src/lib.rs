pub mod app;
pub mod config;
pub mod core;
pub mod data;
pub mod search;
pub mod store;

pub use app::{AppState, ClearOutcome, ResultRow, ResultView};
pub use core::{initial_consonant, korean_cmp, leading_chosung, normalize_initial};
pub use data::{load, Dataset, HanjaRecord, LoadError, RecordKey, Source};
pub use search::{apply, FilterCriteria, SyllableIndex};
