//! 한국어 정렬 순서
//!
//! 브라우저의 `localeCompare(.., 'ko')`와 같은 방향으로 정렬합니다:
//! 기호 < 숫자 < 라틴 문자 < 한글 < 한자. 같은 분류 안에서는 코드포인트 순서이며,
//! 완성형 한글 블록은 코드포인트 순서가 곧 가나다 순서입니다.

use std::cmp::Ordering;

use super::unicode::is_complete_hangul;

/// 문자 분류 (정렬 우선순위)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Symbol,
    Digit,
    Latin,
    Hangul,
    Han,
    Other,
}

fn classify(c: char) -> CharClass {
    let cp = c as u32;
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_alphabetic() && cp < 0x0250 {
        CharClass::Latin
    } else if is_complete_hangul(c) || (0x3131..=0x318E).contains(&cp) || (0x1100..=0x11FF).contains(&cp) {
        CharClass::Hangul
    } else if (0x4E00..=0x9FFF).contains(&cp)
        || (0x3400..=0x4DBF).contains(&cp)
        || (0xF900..=0xFAFF).contains(&cp)
        || (0x20000..=0x2FA1F).contains(&cp)
    {
        CharClass::Han
    } else if c.is_whitespace() || c.is_ascii_punctuation() {
        CharClass::Symbol
    } else {
        CharClass::Other
    }
}

/// 한글 자모 정렬 키
///
/// 호환용 자모(ㄱ)는 같은 초성으로 시작하는 음절(가)보다 앞에 오도록
/// 음절 블록 위치로 옮깁니다.
fn hangul_key(c: char) -> u32 {
    let cp = c as u32;
    if let Some(pos) = super::unicode::CHOSEONG.iter().position(|&j| j == c) {
        // 초성 블록 시작 직전
        return 0xAC00 + pos as u32 * 588;
    }
    cp
}

fn char_key(c: char) -> (CharClass, u32, u8) {
    let class = classify(c);
    match class {
        CharClass::Hangul => {
            // 낱자모는 동일 위치 음절보다 앞
            let jamo_first = if is_complete_hangul(c) { 1 } else { 0 };
            (class, hangul_key(c), jamo_first)
        }
        CharClass::Latin => (class, c.to_ascii_lowercase() as u32, 0),
        _ => (class, c as u32, 0),
    }
}

/// 한국어 문자열 비교
pub fn korean_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match char_key(x).cmp(&char_key(y)) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_order() {
        assert_eq!(korean_cmp("가", "나"), Ordering::Less);
        assert_eq!(korean_cmp("각", "간"), Ordering::Less);
        assert_eq!(korean_cmp("하", "가"), Ordering::Greater);
        assert_eq!(korean_cmp("가", "가"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(korean_cmp("가", "가가"), Ordering::Less);
        assert_eq!(korean_cmp("", "가"), Ordering::Less);
    }

    #[test]
    fn test_tense_consonant_order() {
        // ㄱ < ㄲ < ㄴ
        assert_eq!(korean_cmp("기", "끼"), Ordering::Less);
        assert_eq!(korean_cmp("끼", "나"), Ordering::Less);
    }

    #[test]
    fn test_class_order() {
        assert_eq!(korean_cmp("1", "a"), Ordering::Less);
        assert_eq!(korean_cmp("a", "가"), Ordering::Less);
        assert_eq!(korean_cmp("가", "家"), Ordering::Less);
        assert_eq!(korean_cmp("-", "1"), Ordering::Less);
    }

    #[test]
    fn test_jamo_before_syllable() {
        assert_eq!(korean_cmp("ㄱ", "가"), Ordering::Less);
        assert_eq!(korean_cmp("ㄴ", "가"), Ordering::Greater);
    }
}
