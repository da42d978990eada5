//! 한자 레코드 구조
//!
//! 한 레코드는 한자 하나의 음(音) 하나에 해당합니다. 같은 한자가 여러 음/구분을
//! 가지면 여러 행으로 나뉩니다. 초기 스키마의 한글 키(`한자`, `음`, ...)와
//! 이후 스키마의 영문 키(`hanja`, `sound`, ...)를 모두 역직렬화할 수 있습니다.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::korean_cmp;

/// 구분 값 중 첫말(어두형) 표식
const WORD_INITIAL_TAG: &str = "첫말";
/// 구분 값 중 끝말(어말형) 표식
const WORD_FINAL_TAG: &str = "끝말";
/// 구분 값 중 끝음절(음절 탐색 제외 대상) 표식
const ENDING_SYLLABLE_TAG: &str = "끝음절";

lazy_static! {
    /// 급수별 배지 CSS 클래스
    static ref GRADE_CLASSES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("8급", "grade-8");
        m.insert("준7급", "grade-7-2");
        m.insert("7급", "grade-7");
        m.insert("준6급", "grade-6-2");
        m.insert("6급", "grade-6");
        m.insert("준5급", "grade-5-2");
        m.insert("5급", "grade-5");
        m.insert("준4급", "grade-4-2");
        m.insert("4급", "grade-4");
        m.insert("준3급", "grade-3-2");
        m.insert("3급", "grade-3");
        m.insert("2급", "grade-2");
        m.insert("1급", "grade-1");
        m.insert("준특급", "grade-special-2");
        m.insert("특급", "grade-special");
        m
    };
}

/// 레코드 식별자
///
/// 숫자 `id`가 기준이며, `id`가 없는 초기 스키마는 `훈음|구분` 복합 키를 씁니다.
/// 직렬화 시 숫자 또는 문자열 그대로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordKey {
    Id(u64),
    Composite(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "{}", id),
            RecordKey::Composite(key) => write!(f, "{}", key),
        }
    }
}

impl FromStr for RecordKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<u64>() {
            Ok(id) => RecordKey::Id(id),
            Err(_) => RecordKey::Composite(trimmed.to_string()),
        })
    }
}

impl From<u64> for RecordKey {
    fn from(id: u64) -> Self {
        RecordKey::Id(id)
    }
}

/// 구분(위치 분류)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionClass {
    /// 단어 첫머리에 쓰이는 음 (예: 녀 → 여)
    WordInitial,
    /// 단어 끝에 쓰이는 음
    WordFinal,
    /// 끝음절 조각: 음절 탐색 대상에서 제외
    EndingSyllable,
    /// 그 외 (단독형, 빈 값 포함)
    Standalone,
}

impl PositionClass {
    /// 구분 문자열 분류
    pub fn classify(gubun: &str) -> Self {
        if gubun.contains(WORD_INITIAL_TAG) {
            PositionClass::WordInitial
        } else if gubun.contains(ENDING_SYLLABLE_TAG) {
            PositionClass::EndingSyllable
        } else if gubun.contains(WORD_FINAL_TAG) {
            PositionClass::WordFinal
        } else {
            PositionClass::Standalone
        }
    }
}

/// 한자 레코드
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HanjaRecord {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    /// 한자 글자
    #[serde(rename = "hanja", alias = "한자", deserialize_with = "lenient_string")]
    pub character: String,
    /// 음
    #[serde(alias = "음", deserialize_with = "lenient_string")]
    pub sound: String,
    /// 훈음 (표시용, 동음 구분 번호 `" - N"` 포함 가능)
    #[serde(rename = "huneum", alias = "훈음", deserialize_with = "lenient_string")]
    pub display_form: String,
    /// 구분
    #[serde(rename = "gubun", alias = "구분", deserialize_with = "lenient_string")]
    pub position_class: String,
    /// 교육 수준
    #[serde(rename = "edu_level", alias = "교육수준", deserialize_with = "lenient_string")]
    pub education_level: String,
    /// 급수
    #[serde(alias = "급수", deserialize_with = "lenient_string")]
    pub grade: String,
    /// 장단음
    #[serde(rename = "length", alias = "장단음", deserialize_with = "lenient_string")]
    pub length_class: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    /// 부수
    #[serde(deserialize_with = "lenient_string")]
    pub radical: String,
    /// 부수 획수
    #[serde(rename = "radical_strokes", deserialize_with = "lenient_u32")]
    pub radical_stroke_count: u32,
    /// 부수 이름
    #[serde(deserialize_with = "lenient_string")]
    pub radical_name: String,
    /// 해당 부수의 한자 수
    #[serde(deserialize_with = "lenient_u32")]
    pub radical_count: u32,
}

impl HanjaRecord {
    /// 레코드 식별자 (`id` 우선, 없으면 복합 키)
    pub fn key(&self) -> RecordKey {
        match self.id {
            Some(id) => RecordKey::Id(id),
            None => RecordKey::Composite(format!("{}|{}", self.display_form, self.position_class)),
        }
    }

    pub fn position(&self) -> PositionClass {
        PositionClass::classify(&self.position_class)
    }

    /// 끝음절 조각 여부
    pub fn is_ending_fragment(&self) -> bool {
        self.position_class.contains(ENDING_SYLLABLE_TAG)
    }

    /// 절대 URL만 유효한 링크로 취급
    pub fn safe_url(&self) -> Option<&str> {
        safe_url(&self.url)
    }

    /// 급수 배지 CSS 클래스
    pub fn grade_class(&self) -> &'static str {
        grade_class(&self.grade)
    }
}

/// `http`로 시작하지 않는 URL은 없는 것으로 취급
pub fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.starts_with("http") {
        Some(url)
    } else {
        None
    }
}

/// 급수 배지 CSS 클래스 (모르는 급수는 `grade-default`)
pub fn grade_class(grade: &str) -> &'static str {
    GRADE_CLASSES.get(grade).copied().unwrap_or("grade-default")
}

/// 검색용 정렬 순서: 음(가나다순) → 한자(코드포인트순)
pub fn record_order(a: &HanjaRecord, b: &HanjaRecord) -> Ordering {
    match korean_cmp(&a.sound, &b.sound) {
        Ordering::Equal => a.character.cmp(&b.character),
        other => other,
    }
}

/// 로드 직후 한 번만 정렬 (안정 정렬)
pub fn sort_records(records: &mut [HanjaRecord]) {
    records.sort_by(record_order);
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// 문자열 필드: null/숫자/불리언도 허용, 나머지는 빈 문자열
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_to_string).unwrap_or_default())
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u64))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_to_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_english_keys() {
        let json = r#"{
            "id": 7, "hanja": "家", "sound": "가", "huneum": "집 가",
            "gubun": "첫말", "edu_level": "중학교", "grade": "7급",
            "length": "단음", "url": "https://example.com/7",
            "radical": "宀", "radical_strokes": 3, "radical_name": "갓머리"
        }"#;
        let record: HanjaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.character, "家");
        assert_eq!(record.display_form, "집 가");
        assert_eq!(record.length_class, "단음");
        assert_eq!(record.radical_stroke_count, 3);
        assert_eq!(record.key(), RecordKey::Id(7));
    }

    #[test]
    fn test_deserialize_legacy_korean_keys() {
        let json = r#"{"한자": "女", "음": "녀", "훈음": "여자 녀", "구분": "첫말", "급수": "8급"}"#;
        let record: HanjaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.character, "女");
        assert_eq!(record.sound, "녀");
        assert_eq!(record.grade, "8급");
        assert_eq!(record.key(), RecordKey::Composite("여자 녀|첫말".into()));
    }

    #[test]
    fn test_malformed_fields_coerced() {
        let json = r#"{"id": "12", "hanja": "一", "sound": null, "grade": 8, "radical_strokes": "x"}"#;
        let record: HanjaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(12));
        assert_eq!(record.sound, "");
        assert_eq!(record.grade, "8");
        assert_eq!(record.education_level, "");
        assert_eq!(record.radical_stroke_count, 0);
    }

    #[test]
    fn test_record_key_serialization() {
        let keys = vec![RecordKey::Id(3), RecordKey::Composite("집 가|첫말".into())];
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"[3,"집 가|첫말"]"#);
        let parsed: Vec<RecordKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, keys);
    }

    #[test]
    fn test_record_key_from_str() {
        assert_eq!("42".parse::<RecordKey>().unwrap(), RecordKey::Id(42));
        assert_eq!(
            "집 가|첫말".parse::<RecordKey>().unwrap(),
            RecordKey::Composite("집 가|첫말".into())
        );
    }

    #[test]
    fn test_position_class() {
        assert_eq!(PositionClass::classify("첫말"), PositionClass::WordInitial);
        assert_eq!(PositionClass::classify("끝말"), PositionClass::WordFinal);
        assert_eq!(PositionClass::classify("끝음절"), PositionClass::EndingSyllable);
        assert_eq!(PositionClass::classify(""), PositionClass::Standalone);
        assert_eq!(PositionClass::classify("단독"), PositionClass::Standalone);
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://a.b/c"), Some("https://a.b/c"));
        assert_eq!(safe_url("/relative/path"), None);
        assert_eq!(safe_url(""), None);
    }

    #[test]
    fn test_grade_class() {
        assert_eq!(grade_class("8급"), "grade-8");
        assert_eq!(grade_class("준특급"), "grade-special-2");
        assert_eq!(grade_class("9급"), "grade-default");
    }

    #[test]
    fn test_sort_records() {
        let mut records = vec![
            HanjaRecord { sound: "나".into(), character: "羅".into(), ..Default::default() },
            HanjaRecord { sound: "가".into(), character: "家".into(), ..Default::default() },
            HanjaRecord { sound: "가".into(), character: "加".into(), ..Default::default() },
        ];
        sort_records(&mut records);
        let order: Vec<&str> = records.iter().map(|r| r.character.as_str()).collect();
        // 加(U+52A0) < 家(U+5BB6)
        assert_eq!(order, vec!["加", "家", "羅"]);
    }
}
