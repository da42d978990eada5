//! 데이터 로드 에러

use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// 데이터 로드 실패 (세션 전체에 치명적)
#[derive(Debug, Error)]
pub enum LoadError {
    /// 파일 읽기 실패
    #[error("파일 읽기 실패 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 파싱 실패
    #[error("JSON 파싱 실패: {0}")]
    Json(#[from] serde_json::Error),
    /// 조각 base64 디코딩 실패
    #[error("조각 {index} base64 디코딩 실패: {source}")]
    Base64 {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },
    /// 조각 UTF-8 디코딩 실패 (XOR 키가 틀린 경우 포함)
    #[error("조각 {index} UTF-8 디코딩 실패: {source}")]
    Utf8 {
        index: usize,
        #[source]
        source: FromUtf8Error,
    },
    /// 조각 파일 없음
    #[error("조각 {0} 로드 실패")]
    MissingChunk(usize),
    /// 빈 데이터 또는 배열이 아닌 데이터
    #[error("데이터 형식이 올바르지 않습니다")]
    Empty,
}
