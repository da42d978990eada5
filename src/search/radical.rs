//! 부수별 탐색
//!
//! 부수 목록은 획수 → 부수 코드포인트 순으로 정렬합니다. 검색어가 있으면
//! 획수 선택을 무시하고 전체 부수에서 찾습니다.

use std::collections::HashSet;

use super::engine::FavoriteSet;
use crate::data::HanjaRecord;

/// 부수 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalInfo {
    /// 부수 글자
    pub radical: String,
    /// 획수
    pub strokes: u32,
    /// 부수 이름 (훈음)
    pub name: String,
    /// 해당 부수의 한자 수
    pub hanja_count: u32,
}

/// 부수 목록
#[derive(Debug, Clone, Default)]
pub struct RadicalIndex {
    radicals: Vec<RadicalInfo>,
}

/// 부수 탐색 화면의 선택 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadicalSelection {
    /// 선택된 부수
    pub radical: Option<String>,
    /// 선택된 획수
    pub strokes: Option<u32>,
    pub favorites_only: bool,
}

fn first_code_point(s: &str) -> u32 {
    s.chars().next().map(|c| c as u32).unwrap_or(0)
}

impl RadicalIndex {
    /// 레코드에서 부수 목록 생성 (부수별 첫 레코드 기준)
    pub fn build(records: &[HanjaRecord]) -> Self {
        let mut seen = HashSet::new();
        let mut radicals = Vec::new();
        for record in records {
            if record.radical.is_empty() || !seen.insert(record.radical.as_str()) {
                continue;
            }
            radicals.push(RadicalInfo {
                radical: record.radical.clone(),
                strokes: record.radical_stroke_count,
                name: record.radical_name.clone(),
                hanja_count: record.radical_count,
            });
        }

        radicals.sort_by(|a, b| {
            a.strokes
                .cmp(&b.strokes)
                .then_with(|| first_code_point(&a.radical).cmp(&first_code_point(&b.radical)))
        });
        log::debug!("부수 {}개", radicals.len());
        Self { radicals }
    }

    pub fn radicals(&self) -> &[RadicalInfo] {
        &self.radicals
    }

    pub fn get(&self, radical: &str) -> Option<&RadicalInfo> {
        self.radicals.iter().find(|info| info.radical == radical)
    }

    /// 획수 목록 (오름차순, 중복 없음)
    pub fn stroke_counts(&self) -> Vec<u32> {
        let mut strokes: Vec<u32> = self.radicals.iter().map(|info| info.strokes).collect();
        strokes.dedup();
        strokes
    }

    /// 획수/검색어로 부수 찾기
    pub fn find(&self, strokes: Option<u32>, term: &str) -> Vec<&RadicalInfo> {
        let term = term.trim();
        if !term.is_empty() {
            return self
                .radicals
                .iter()
                .filter(|info| info.radical.contains(term) || info.name.contains(term))
                .collect();
        }
        self.radicals
            .iter()
            .filter(|info| strokes.map_or(true, |s| info.strokes == s))
            .collect()
    }
}

/// 선택 상태에 해당하는 한자 레코드
///
/// 즐겨찾기만 보기이고 부수가 선택되지 않았으면 전체(또는 선택 획수의)
/// 즐겨찾기를 보여줍니다.
pub fn browse<'r, F: FavoriteSet + ?Sized>(
    records: &'r [HanjaRecord],
    selection: &RadicalSelection,
    favorites: &F,
) -> Vec<&'r HanjaRecord> {
    let favorite_ok =
        |record: &HanjaRecord| !selection.favorites_only || favorites.is_favorite(&record.key());

    match &selection.radical {
        Some(radical) => records
            .iter()
            .filter(|record| record.radical == *radical)
            .filter(|record| favorite_ok(*record))
            .collect(),
        None if selection.favorites_only => records
            .iter()
            .filter(|record| selection.strokes.map_or(true, |s| record.radical_stroke_count == s))
            .filter(|record| favorite_ok(*record))
            .collect(),
        None => Vec::new(),
    }
}
