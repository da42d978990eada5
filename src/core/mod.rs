//! 한글 처리 핵심 유틸리티

pub mod collation;
pub mod unicode;

pub use collation::korean_cmp;
pub use unicode::{initial_consonant, leading_chosung, normalize_initial, PLAIN_CHOSEONG};
