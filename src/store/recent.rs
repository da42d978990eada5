//! 최근 본 한자 기록
//!
//! 최신 항목이 앞에 오며, 같은 레코드를 다시 보면 기존 항목을 지우고 맨 앞에
//! 새로 추가합니다. 최대 개수를 넘으면 오래된 항목부터 버립니다.

use serde::{Deserialize, Serialize};

use super::storage::{load_json, save_json, KeyValueStore, StoreError, RECENT_KEY};
use crate::data::{HanjaRecord, PositionClass, RecordKey};

/// 기본 최대 기록 수
pub const DEFAULT_CAPACITY: usize = 30;

/// 기록 항목 (레코드 일부 + 기록 시각)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: RecordKey,
    #[serde(rename = "hanja", default)]
    pub character: String,
    #[serde(rename = "huneum", default)]
    pub display_form: String,
    #[serde(rename = "gubun", default)]
    pub position_class: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub radical: String,
    #[serde(default)]
    pub radical_name: String,
    /// 기록 시각 (epoch ms)
    #[serde(default)]
    pub timestamp: u64,
}

impl HistoryEntry {
    pub fn from_record(record: &HanjaRecord, timestamp: u64) -> Self {
        Self {
            id: record.key(),
            character: record.character.clone(),
            display_form: record.display_form.clone(),
            position_class: record.position_class.clone(),
            url: record.url.clone(),
            grade: record.grade.clone(),
            radical: record.radical.clone(),
            radical_name: record.radical_name.clone(),
            timestamp,
        }
    }

    /// 표시용 한자 라벨 (접사 하이픈, 동음 번호 위첨자 포함)
    pub fn label(&self) -> String {
        format_label(&self.character, &self.display_form, &self.position_class)
    }
}

/// 훈음 끝의 `" - N"` 동음 구분 번호
fn disambiguation_number(display_form: &str) -> Option<&str> {
    let (head, tail) = display_form.rsplit_once('-')?;
    if !head.ends_with(char::is_whitespace) {
        return None;
    }
    let digits = tail.strip_prefix(char::is_whitespace)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

fn superscript(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

/// 한자 표시 라벨
///
/// - 첫말: `家¹-` (뒤에 하이픈)
/// - 끝말/끝음절: `-家¹` (앞에 하이픈)
/// - 그 외: `家¹`
pub fn format_label(character: &str, display_form: &str, position_class: &str) -> String {
    let sup = disambiguation_number(display_form)
        .map(superscript)
        .unwrap_or_default();
    match PositionClass::classify(position_class) {
        PositionClass::WordInitial => format!("{}{}-", character, sup),
        PositionClass::WordFinal | PositionClass::EndingSyllable => format!("-{}{}", character, sup),
        PositionClass::Standalone => format!("{}{}", character, sup),
    }
}

/// 최근 기록 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// 저장소에서 복원 (없거나 손상되면 빈 목록)
    pub fn load(store: &dyn KeyValueStore, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        history.entries = load_json(store, RECENT_KEY).unwrap_or_default();
        history.entries.truncate(history.capacity);
        history
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_json(store, RECENT_KEY, &self.entries)
    }

    /// 기록 추가 (중복 제거 후 맨 앞)
    pub fn add(&mut self, record: &HanjaRecord, timestamp: u64) -> &HistoryEntry {
        let entry = HistoryEntry::from_record(record, timestamp);
        self.entries.retain(|existing| existing.id != entry.id);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// 위치로 삭제
    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
