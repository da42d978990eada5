//! 유니코드 한글 음절 분해 유틸리티
//!
//! 완성형 한글 음절에서 초성을 뽑아내고, 된소리 초성을 예사소리로
//! 접어서 14개 초성 버튼과 대응시킵니다.

/// 한글 음절 시작 코드포인트 (가)
const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 오프셋 (힣 - 가)
const HANGUL_SYLLABLE_LAST: u32 = 11171;

/// 초성 개수
const CHOSEONG_COUNT: u32 = 19;
/// 중성 개수
const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
const JONGSEONG_COUNT: u32 = 28;

/// 초성 19자 (호환용 자모, 유니코드 초성 인덱스 순서)
pub const CHOSEONG: [char; CHOSEONG_COUNT as usize] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// 필터 버튼에 노출되는 예사소리 초성 14자
pub const PLAIN_CHOSEONG: [char; 14] = [
    'ㄱ', 'ㄴ', 'ㄷ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅅ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    let code = c as u32;
    if !(HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_BASE + HANGUL_SYLLABLE_LAST).contains(&code) {
        return None;
    }
    let offset = code - HANGUL_SYLLABLE_BASE;
    let jongseong = offset % JONGSEONG_COUNT;
    let jungseong = (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT;
    let choseong = offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
    Some((choseong, jungseong, jongseong))
}

/// 문자가 완성형 한글(가-힣)인지 확인
pub fn is_complete_hangul(ch: char) -> bool {
    decompose_syllable(ch).is_some()
}

/// 완성형 한글 음절의 초성 (19자 중 하나)
///
/// 완성형 한글이 아니면 `None`.
pub fn initial_consonant(c: char) -> Option<char> {
    let (choseong, _, _) = decompose_syllable(c)?;
    CHOSEONG.get(choseong as usize).copied()
}

/// 된소리 초성을 예사소리로 접기 (ㄲ→ㄱ, ㄸ→ㄷ, ㅃ→ㅂ, ㅆ→ㅅ, ㅉ→ㅈ)
///
/// 그 외 문자는 그대로 반환합니다.
pub fn normalize_initial(consonant: char) -> char {
    match consonant {
        'ㄲ' => 'ㄱ',
        'ㄸ' => 'ㄷ',
        'ㅃ' => 'ㅂ',
        'ㅆ' => 'ㅅ',
        'ㅉ' => 'ㅈ',
        other => other,
    }
}

/// 문자열 첫 글자의 정규화된 초성
///
/// 빈 문자열이거나 첫 글자가 완성형 한글이 아니면 `None`.
pub fn leading_chosung(text: &str) -> Option<char> {
    text.chars().next().and_then(initial_consonant).map(normalize_initial)
}

/// 14개 필터 초성 중 하나인지 확인
pub fn is_plain_choseong(c: char) -> bool {
    PLAIN_CHOSEONG.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_syllable() {
        assert_eq!(decompose_syllable('가'), Some((0, 0, 0)));
        assert_eq!(decompose_syllable('한'), Some((18, 0, 4)));
        assert_eq!(decompose_syllable('힣'), Some((18, 20, 27)));

        // 한글이 아닌 문자
        assert_eq!(decompose_syllable('a'), None);
        assert_eq!(decompose_syllable('ㄱ'), None);
    }

    #[test]
    fn test_initial_consonant() {
        assert_eq!(initial_consonant('가'), Some('ㄱ'));
        assert_eq!(initial_consonant('까'), Some('ㄲ'));
        assert_eq!(initial_consonant('령'), Some('ㄹ'));
        assert_eq!(initial_consonant('힣'), Some('ㅎ'));
        assert_eq!(initial_consonant('쯤'), Some('ㅉ'));
    }

    #[test]
    fn test_initial_consonant_outside_block() {
        assert_eq!(initial_consonant('令'), None);
        assert_eq!(initial_consonant('ㄱ'), None);
        assert_eq!(initial_consonant('-'), None);
        assert_eq!(initial_consonant('\u{ABFF}'), None);
        assert_eq!(initial_consonant('\u{D7A4}'), None);
    }

    #[test]
    fn test_normalize_initial() {
        assert_eq!(normalize_initial('ㄲ'), 'ㄱ');
        assert_eq!(normalize_initial('ㄸ'), 'ㄷ');
        assert_eq!(normalize_initial('ㅃ'), 'ㅂ');
        assert_eq!(normalize_initial('ㅆ'), 'ㅅ');
        assert_eq!(normalize_initial('ㅉ'), 'ㅈ');
        assert_eq!(normalize_initial('ㅎ'), 'ㅎ');
    }

    #[test]
    fn test_normalize_initial_idempotent() {
        for c in CHOSEONG {
            assert_eq!(normalize_initial(normalize_initial(c)), normalize_initial(c));
            assert!(is_plain_choseong(normalize_initial(c)));
        }
    }

    #[test]
    fn test_leading_chosung() {
        assert_eq!(leading_chosung("쌍"), Some('ㅅ'));
        assert_eq!(leading_chosung("가나"), Some('ㄱ'));
        assert_eq!(leading_chosung(""), None);
        assert_eq!(leading_chosung("abc"), None);
    }
}
