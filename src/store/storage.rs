//! 키-값 영속 저장소
//!
//! 브라우저 localStorage에 해당합니다. 값은 JSON 문자열로 저장하며,
//! 읽을 때 값이 없거나 깨져 있으면 기본값으로 대체합니다.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

/// 즐겨찾기 식별자 목록 키
pub const FAVORITES_KEY: &str = "hanja-favorites";
/// 최근 본 한자 목록 키
pub const RECENT_KEY: &str = "hanja-recent-view";
/// 다크모드 플래그 키
pub const DARK_MODE_KEY: &str = "darkMode";

/// 저장 실패
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("저장소 입출력 실패 ({key}): {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("직렬화 실패 ({key}): {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// 저장 공간 초과
    #[error("저장 공간 부족 ({key}): {needed}바이트 필요, {available}바이트 남음")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
}

/// 문자열 키-값 저장소
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// 메모리 변경 결과와 영속화 실패 여부
///
/// 저장에 실패해도 메모리 상태 변경은 유지됩니다. `error`가 있으면
/// 새로고침 후 변경이 사라질 수 있음을 사용자에게 알려야 합니다.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub error: Option<StoreError>,
}

impl<T> Persisted<T> {
    pub fn new(value: T, result: Result<(), StoreError>) -> Self {
        let error = result.err();
        if let Some(e) = &error {
            log::warn!("변경 사항 저장 실패: {}", e);
        }
        Self { value, error }
    }

    /// 영속화까지 성공했는지
    pub fn is_durable(&self) -> bool {
        self.error.is_none()
    }
}

/// JSON 값 읽기 (없거나 깨져 있으면 None)
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("{} 읽기 실패: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} 값이 손상되어 기본값 사용: {}", key, e);
            None
        }
    }
}

/// JSON 값 쓰기
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// 디렉토리 기반 저장소: 키마다 `<dir>/<key>.json` 파일 하나
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn io_error(key: &str) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key)(e)),
        }
    }

    /// 임시 파일에 쓴 뒤 교체 (원자적 쓰기)
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(Self::io_error(key))?;
        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(Self::io_error(key))?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(Self::io_error(key))?;
        temp_file
            .persist(self.path_for(key))
            .map_err(|e| Self::io_error(key)(e.error))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key)(e)),
        }
    }
}

/// 메모리 저장소 (선택적 용량 제한)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 전체 값 크기(바이트) 제한
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_except(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_except(key));
            if value.len() > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
