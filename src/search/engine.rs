//! 필터 엔진
//!
//! 정렬된 레코드 목록에서 모든 활성 조건을 만족하는 레코드만 순서를 유지한 채
//! 골라냅니다. 재정렬은 하지 않으며 입력도 변경하지 않습니다.
//!
//! | 조건 | 통과 조건 |
//! |---|---|
//! | 검색어 | 비어 있거나, 정규화된 검색어가 한자/음/훈음 중 하나에 포함 |
//! | 교육 수준 | 미지정이거나 일치 |
//! | 급수 | 미선택이거나 선택 목록에 포함 |
//! | 장단음 | 미지정이거나 일치 |
//! | 즐겨찾기 | 꺼져 있거나 즐겨찾기에 포함 |
//! | 음절/초성 | 음절 지정 시 음 일치, 아니면 초성 지정 시 첫 글자 초성 일치 |
//! | 끝음절 제외 | 음절 미지정이거나 끝음절 조각이 아님 |

use std::collections::{BTreeSet, HashSet};

use unicode_normalization::{is_nfkc_quick, IsNormalized};

use super::criteria::{fold_search_text, FilterCriteria};
use crate::core::unicode::leading_chosung;
use crate::data::{HanjaRecord, RecordKey};

/// 즐겨찾기 여부 조회
pub trait FavoriteSet {
    fn is_favorite(&self, key: &RecordKey) -> bool;
}

impl FavoriteSet for HashSet<RecordKey> {
    fn is_favorite(&self, key: &RecordKey) -> bool {
        self.contains(key)
    }
}

impl FavoriteSet for BTreeSet<RecordKey> {
    fn is_favorite(&self, key: &RecordKey) -> bool {
        self.contains(key)
    }
}

/// 필터 1회 실행 동안 재사용하는 준비 상태
struct Prepared<'a> {
    criteria: &'a FilterCriteria,
    needle: Option<String>,
}

impl<'a> Prepared<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            needle: criteria.search_needle(),
        }
    }

    fn matches<F: FavoriteSet + ?Sized>(&self, record: &HanjaRecord, favorites: &F) -> bool {
        let c = self.criteria;

        if let Some(needle) = &self.needle {
            let hit = contains_folded(&record.character, needle)
                || contains_folded(&record.sound, needle)
                || contains_folded(&record.display_form, needle);
            if !hit {
                return false;
            }
        }

        if let Some(education) = &c.education {
            if record.education_level != *education {
                return false;
            }
        }

        if !c.grades.is_empty() && !c.grades.contains(&record.grade) {
            return false;
        }

        if let Some(length) = &c.length {
            if record.length_class != *length {
                return false;
            }
        }

        if c.favorites_only && !favorites.is_favorite(&record.key()) {
            return false;
        }

        match (c.syllable(), c.chosung()) {
            (Some(syllable), _) => {
                if record.sound != syllable || record.is_ending_fragment() {
                    return false;
                }
            }
            (None, Some(chosung)) => {
                if leading_chosung(&record.sound) != Some(chosung) {
                    return false;
                }
            }
            (None, None) => {}
        }

        true
    }
}

/// 대소문자와 호환 문자 차이를 무시한 부분 문자열 검사
///
/// `needle`은 이미 [`fold_search_text`]로 정규화되어 있어야 합니다.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    if haystack.contains(needle) {
        return true;
    }
    // 이미 정규형이면 접어도 결과가 같음
    let already_folded = is_nfkc_quick(haystack.chars()) == IsNormalized::Yes
        && !haystack.chars().any(char::is_uppercase);
    if already_folded {
        return false;
    }
    fold_search_text(haystack).contains(needle)
}

/// 조건을 만족하는 레코드의 인덱스 (원래 순서)
pub fn apply_indices<F: FavoriteSet + ?Sized>(
    records: &[HanjaRecord],
    criteria: &FilterCriteria,
    favorites: &F,
) -> Vec<usize> {
    let prepared = Prepared::new(criteria);
    let indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| prepared.matches(record, favorites))
        .map(|(index, _)| index)
        .collect();
    log::debug!("필터 결과: {}/{}", indices.len(), records.len());
    indices
}

/// 조건을 만족하는 레코드 (원래 순서)
pub fn apply<'r, F: FavoriteSet + ?Sized>(
    records: &'r [HanjaRecord],
    criteria: &FilterCriteria,
    favorites: &F,
) -> Vec<&'r HanjaRecord> {
    let prepared = Prepared::new(criteria);
    records
        .iter()
        .filter(|record| prepared.matches(record, favorites))
        .collect()
}

/// 결과에 포함된 서로 다른 한자 수
///
/// 한 한자가 음/구분별로 여러 행일 수 있으므로 화면의 결과 수는 이 값입니다.
pub fn distinct_character_count<'r, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'r HanjaRecord>,
{
    records
        .into_iter()
        .map(|record| record.character.as_str())
        .collect::<HashSet<_>>()
        .len()
}
