//! 레코드 원본 로드
//!
//! 단일 JSON 배열 파일, 또는 매니페스트 + base64(선택적으로 단일 바이트 XOR)
//! 조각 파일 묶음을 읽어 [`Dataset`]을 만듭니다.
//!
//! # 조각 디렉토리 구조
//! ```text
//! <dir>/chunks_metadata.json      {"total_chunks": N}
//! <dir>/data_chunks/c_0.bin       base64 텍스트
//! <dir>/data_chunks/c_{N-1}.bin
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use super::dataset::Dataset;
use super::error::LoadError;
use super::record::HanjaRecord;

/// 매니페스트 파일 이름
pub const MANIFEST_FILE: &str = "chunks_metadata.json";
/// 조각 파일 디렉토리 이름
pub const CHUNK_DIR: &str = "data_chunks";

/// 레코드 원본 위치
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// 단일 JSON 배열 파일
    Json(PathBuf),
    /// 조각 디렉토리
    Chunks(PathBuf),
}

/// 조각 매니페스트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChunkManifest {
    pub total_chunks: usize,
}

/// 조각 파일 경로
pub fn chunk_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(CHUNK_DIR).join(format!("c_{}.bin", index))
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON 배열 문자열을 레코드 목록으로 파싱
///
/// 객체가 아니거나 해석할 수 없는 원소는 경고 후 건너뜁니다. 배열이 아니면 [`LoadError::Empty`].
pub fn parse_records(json: &str) -> Result<Vec<HanjaRecord>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(LoadError::Empty),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            log::warn!("레코드 {}: 객체가 아니므로 건너뜀", index);
            continue;
        }
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("레코드 {}: 해석 실패로 건너뜀 ({})", index, e),
        }
    }
    Ok(records)
}

/// base64 조각 하나를 디코딩
///
/// `xor_key`가 있으면 디코딩된 모든 바이트에 XOR을 적용한 뒤 UTF-8로 해석합니다.
pub fn decode_chunk(
    index: usize,
    encoded: &str,
    xor_key: Option<u8>,
) -> Result<Vec<HanjaRecord>, LoadError> {
    // atob처럼 공백 무시
    let compact: String = encoded.split_ascii_whitespace().collect();
    let mut bytes = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|source| LoadError::Base64 { index, source })?;

    if let Some(key) = xor_key {
        for byte in bytes.iter_mut() {
            *byte ^= key;
        }
    }

    let text = String::from_utf8(bytes).map_err(|source| LoadError::Utf8 { index, source })?;
    parse_records(&text)
}

/// 조각을 인코딩 (데이터 배포 도구 및 테스트용)
pub fn encode_chunk(records: &[HanjaRecord], xor_key: Option<u8>) -> Result<String, LoadError> {
    let mut bytes = serde_json::to_vec(records)?;
    if let Some(key) = xor_key {
        for byte in bytes.iter_mut() {
            *byte ^= key;
        }
    }
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// 단일 JSON 파일 로드
pub fn load_json_file(path: &Path) -> Result<Vec<HanjaRecord>, LoadError> {
    parse_records(&read_file(path)?)
}

/// 조각 디렉토리 로드 (인덱스 순서대로 이어 붙임)
pub fn load_chunks(dir: &Path, xor_key: Option<u8>) -> Result<Vec<HanjaRecord>, LoadError> {
    let manifest: ChunkManifest = serde_json::from_str(&read_file(&dir.join(MANIFEST_FILE))?)?;
    log::debug!("조각 {}개 로드 시작", manifest.total_chunks);

    let mut records = Vec::new();
    for index in 0..manifest.total_chunks {
        let path = chunk_path(dir, index);
        let encoded = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                log::error!("조각 {} 읽기 실패 ({}): {}", index, path.display(), e);
                return Err(LoadError::MissingChunk(index));
            }
        };
        records.extend(decode_chunk(index, &encoded, xor_key)?);
    }
    Ok(records)
}

/// 원본을 읽어 정렬된 [`Dataset`] 생성
///
/// 레코드가 하나도 없으면 [`LoadError::Empty`].
pub fn load(source: &Source, xor_key: Option<u8>) -> Result<Dataset, LoadError> {
    let records = match source {
        Source::Json(path) => load_json_file(path)?,
        Source::Chunks(dir) => load_chunks(dir, xor_key)?,
    };
    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let dataset = Dataset::new(records);
    log::info!("한자 레코드 {}개 로드 완료", dataset.len());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HanjaRecord> {
        vec![
            HanjaRecord {
                id: Some(1),
                character: "家".into(),
                sound: "가".into(),
                ..Default::default()
            },
            HanjaRecord {
                id: Some(2),
                character: "女".into(),
                sound: "녀".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_parse_records_skips_non_objects() {
        let records = parse_records(r#"[{"id": 1, "hanja": "一"}, 3, "x"]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_records_skips_unreadable_record() {
        // 새 키와 옛 한국어 키가 함께 있으면 해당 레코드만 건너뜀
        let json = r#"[
            {"id": 1, "hanja": "家", "한자": "家", "sound": "가"},
            {"id": 2, "hanja": "女", "sound": "녀"}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, Some(2));
        assert_eq!(records[0].character, "女");
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        assert!(matches!(parse_records(r#"{"id": 1}"#), Err(LoadError::Empty)));
        assert!(matches!(parse_records("not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_decode_chunk_with_xor() {
        let encoded = encode_chunk(&sample(), Some(185)).unwrap();
        let decoded = decode_chunk(0, &encoded, Some(185)).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_chunk_plain_with_whitespace() {
        let encoded = encode_chunk(&sample(), None).unwrap();
        let wrapped = format!("{}\n{}\n", &encoded[..10], &encoded[10..]);
        assert_eq!(decode_chunk(0, &wrapped, None).unwrap().len(), 2);
    }

    #[test]
    fn test_decode_chunk_wrong_key_fails() {
        let encoded = encode_chunk(&sample(), Some(185)).unwrap();
        // 한글 멀티바이트가 깨지면서 UTF-8 또는 JSON 에러
        assert!(decode_chunk(3, &encoded, Some(7)).is_err());
    }

    #[test]
    fn test_decode_chunk_bad_base64() {
        assert!(matches!(
            decode_chunk(4, "!!!", None),
            Err(LoadError::Base64 { index: 4, .. })
        ));
    }

    #[test]
    fn test_load_chunks_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CHUNK_DIR)).unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), r#"{"total_chunks": 2}"#).unwrap();
        let records = sample();
        fs::write(chunk_path(dir.path(), 0), encode_chunk(&records[..1], Some(185)).unwrap()).unwrap();
        fs::write(chunk_path(dir.path(), 1), encode_chunk(&records[1..], Some(185)).unwrap()).unwrap();

        let dataset = load(&Source::Chunks(dir.path().to_path_buf()), Some(185)).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_load_chunks_missing_chunk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), r#"{"total_chunks": 1}"#).unwrap();
        let result = load_chunks(dir.path(), None);
        assert!(matches!(result, Err(LoadError::MissingChunk(0))));
    }

    #[test]
    fn test_load_empty_array_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "[]").unwrap();
        assert!(matches!(load(&Source::Json(path), None), Err(LoadError::Empty)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(&Source::Json(PathBuf::from("/nonexistent/data.json")), None);
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
