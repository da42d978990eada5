//! 필터 조건
//!
//! 초성과 음절 선택은 서로 배타적입니다: 초성을 바꾸면 음절 선택이 해제됩니다.
//! 이 규칙은 조건을 바꾸는 메서드가 보장하며, 필터 엔진은 이를 전제로 합니다.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::core::unicode::is_plain_choseong;

/// 사용자가 조작하는 필터 조건
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// 검색어 (입력 그대로)
    pub search: String,
    /// 교육 수준 (None = 전체)
    pub education: Option<String>,
    /// 선택된 급수 (비어 있으면 전체, 선택 순서 유지)
    pub grades: Vec<String>,
    /// 장단음 (None = 전체)
    pub length: Option<String>,
    /// 즐겨찾기만 보기
    pub favorites_only: bool,
    chosung: Option<char>,
    syllable: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// 검색 비교용 정규화: NFKC 후 소문자
pub fn fold_search_text(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_education(mut self, education: impl Into<String>) -> Self {
        self.set_education(education);
        self
    }

    pub fn with_grades<I, S>(mut self, grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_grades(grades);
        self
    }

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.set_length(length);
        self
    }

    pub fn with_favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    pub fn with_chosung(mut self, chosung: char) -> Self {
        self.select_chosung(Some(chosung));
        self
    }

    pub fn with_syllable(mut self, syllable: impl Into<String>) -> Self {
        self.syllable = non_empty(syllable);
        self
    }

    /// 빈 값은 "전체"
    pub fn set_education(&mut self, education: impl Into<String>) {
        self.education = non_empty(education);
    }

    /// 빈 값은 "전체"
    pub fn set_length(&mut self, length: impl Into<String>) {
        self.length = non_empty(length);
    }

    /// 급수 목록 교체 (빈 값과 중복 제거, 순서 유지)
    pub fn set_grades<I, S>(&mut self, grades: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grades.clear();
        for grade in grades.into_iter().filter_map(|g| non_empty(g)) {
            if !self.grades.contains(&grade) {
                self.grades.push(grade);
            }
        }
    }

    pub fn chosung(&self) -> Option<char> {
        self.chosung
    }

    pub fn syllable(&self) -> Option<&str> {
        self.syllable.as_deref()
    }

    /// 초성 선택. 음절 선택은 항상 해제됩니다.
    ///
    /// 14개 필터 초성이 아닌 값은 선택 해제로 취급합니다.
    pub fn select_chosung(&mut self, chosung: Option<char>) {
        self.chosung = chosung.filter(|&c| is_plain_choseong(c));
        self.syllable = None;
    }

    /// 음절 선택. 이미 선택된 음절을 다시 고르면 해제됩니다.
    ///
    /// 반환: 선택 후 활성 음절
    pub fn select_syllable(&mut self, syllable: &str) -> Option<&str> {
        if self.syllable.as_deref() == Some(syllable) {
            self.syllable = None;
        } else {
            self.syllable = non_empty(syllable);
        }
        self.syllable.as_deref()
    }

    /// 정규화된 검색어 (비어 있으면 None)
    pub fn search_needle(&self) -> Option<String> {
        if self.search.is_empty() {
            None
        } else {
            Some(fold_search_text(&self.search))
        }
    }

    /// 화면에 칩으로 표시되는 활성 조건
    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(education) = &self.education {
            chips.push(FilterChip {
                kind: ChipKind::Education,
                value: education.clone(),
            });
        }
        if let Some(length) = &self.length {
            chips.push(FilterChip {
                kind: ChipKind::Length,
                value: length.clone(),
            });
        }
        if !self.grades.is_empty() {
            let value = if self.grades.len() <= 2 {
                self.grades.join(", ")
            } else {
                format!("{} 외 {}개", self.grades[0], self.grades.len() - 1)
            };
            chips.push(FilterChip {
                kind: ChipKind::Grade,
                value,
            });
        }
        chips
    }

    /// 칩 제거
    pub fn remove_chip(&mut self, kind: ChipKind) {
        match kind {
            ChipKind::Education => self.education = None,
            ChipKind::Length => self.length = None,
            ChipKind::Grade => self.grades.clear(),
        }
    }
}

/// 급수 드롭다운 버튼 라벨
pub fn grade_label(grades: &[String]) -> String {
    match grades {
        [] => "전체".to_string(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{} 외 {}개", first, rest.len()),
    }
}

/// 칩 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    Education,
    Length,
    Grade,
}

impl ChipKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChipKind::Education => "교육수준",
            ChipKind::Length => "장단음",
            ChipKind::Grade => "급수",
        }
    }
}

/// 활성 필터 칩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub value: String,
}

impl fmt::Display for FilterChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chosung_change_clears_syllable() {
        let mut criteria = FilterCriteria::new();
        criteria.select_chosung(Some('ㄱ'));
        criteria.select_syllable("가");
        assert_eq!(criteria.syllable(), Some("가"));

        criteria.select_chosung(Some('ㄴ'));
        assert_eq!(criteria.chosung(), Some('ㄴ'));
        assert_eq!(criteria.syllable(), None);
    }

    #[test]
    fn test_reselect_syllable_toggles_off() {
        let mut criteria = FilterCriteria::new().with_chosung('ㄱ');
        assert_eq!(criteria.select_syllable("가"), Some("가"));
        assert_eq!(criteria.select_syllable("가"), None);
        assert_eq!(criteria.select_syllable("각"), Some("각"));
        assert_eq!(criteria.chosung(), Some('ㄱ'));
    }

    #[test]
    fn test_tense_chosung_rejected() {
        let criteria = FilterCriteria::new().with_chosung('ㄲ');
        assert_eq!(criteria.chosung(), None);
    }

    #[test]
    fn test_blank_values_mean_any() {
        let criteria = FilterCriteria::new()
            .with_education("")
            .with_length("  ")
            .with_grades(["", "8급", "8급", "7급"]);
        assert_eq!(criteria.education, None);
        assert_eq!(criteria.length, None);
        assert_eq!(criteria.grades, vec!["8급", "7급"]);
    }

    #[test]
    fn test_search_needle_nfkc_lowercase() {
        let criteria = FilterCriteria::new().with_search("\u{F9A8}ABC");
        assert_eq!(criteria.search_needle().as_deref(), Some("\u{4EE4}abc"));
        let criteria = FilterCriteria::new().with_search("\u{F968}");
        assert_eq!(criteria.search_needle().as_deref(), Some("\u{6CCC}"));
        assert_eq!(FilterCriteria::new().search_needle(), None);
    }

    #[test]
    fn test_active_chips() {
        let mut criteria = FilterCriteria::new()
            .with_education("중학교")
            .with_grades(["8급", "7급", "6급"]);
        let chips = criteria.active_chips();
        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].to_string(), "교육수준: 중학교");
        assert_eq!(chips[1].value, "8급 외 2개");

        criteria.set_grades(["8급", "7급"]);
        assert_eq!(criteria.active_chips()[1].value, "8급, 7급");

        criteria.remove_chip(ChipKind::Grade);
        criteria.remove_chip(ChipKind::Education);
        assert!(criteria.active_chips().is_empty());
    }

    #[test]
    fn test_grade_label() {
        assert_eq!(grade_label(&[]), "전체");
        assert_eq!(grade_label(&["8급".to_string()]), "8급");
        assert_eq!(grade_label(&["8급".to_string(), "7급".to_string()]), "8급 외 1개");
    }
}
