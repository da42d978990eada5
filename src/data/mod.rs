//! 한자 데이터 모델과 로드

mod dataset;
mod error;
pub mod loader;
pub mod record;

pub use dataset::Dataset;
pub use error::LoadError;
pub use loader::{load, Source};
pub use record::{grade_class, safe_url, HanjaRecord, PositionClass, RecordKey};
