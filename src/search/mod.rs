//! 검색/필터 엔진
//!
//! 데이터 로드 후 한 번 만든 음절 캐시와, 키 입력마다 실행되는 필터,
//! 페이지 계산을 제공합니다.
//!
//! # 사용 예시
//!
//! ```
//! use hanja_study::data::{HanjaRecord, RecordKey};
//! use hanja_study::search::{apply, FilterCriteria, SyllableIndex};
//! use std::collections::HashSet;
//!
//! let records = vec![HanjaRecord {
//!     id: Some(1),
//!     character: "家".into(),
//!     sound: "가".into(),
//!     grade: "7급".into(),
//!     ..Default::default()
//! }];
//! let index = SyllableIndex::build(&records);
//! assert_eq!(index.syllables('ㄱ').unwrap(), &["가"]);
//!
//! let criteria = FilterCriteria::new().with_chosung('ㄱ');
//! let result = apply(&records, &criteria, &HashSet::<RecordKey>::new());
//! assert_eq!(result.len(), 1);
//! ```

mod criteria;
mod debounce;
mod engine;
mod pagination;
pub mod radical;
mod syllable_index;

pub use criteria::{fold_search_text, grade_label, ChipKind, FilterChip, FilterCriteria};
pub use debounce::{DebounceCommand, SearchDebouncer};
pub use engine::{apply, apply_indices, distinct_character_count, FavoriteSet};
pub use pagination::{paginate, total_pages, PageWindow, Pagination};
pub use radical::{RadicalIndex, RadicalInfo, RadicalSelection};
pub use syllable_index::SyllableIndex;
