//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::search::PageWindow;

/// 앱 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// 한 페이지에 표시할 행 수
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// 페이지 버튼 블록 크기
    #[serde(default = "default_page_window")]
    pub page_window: usize,
    /// 부수 탐색 화면의 한 페이지 행 수
    #[serde(default = "default_radical_page_size")]
    pub radical_page_size: usize,
    /// 부수 탐색 화면의 페이지 버튼 수 (현재 페이지 중심)
    #[serde(default = "default_radical_page_window")]
    pub radical_page_window: usize,
    /// 검색어 입력 후 필터 실행까지 대기 시간 (ms)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// 최근 기록 최대 개수
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
    /// 데이터 조각 XOR 키 (null이면 XOR 없음)
    #[serde(default = "default_xor_key")]
    pub xor_key: Option<u8>,
    /// 즐겨찾기/기록 저장 디렉토리 (없으면 기본 경로)
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_page_size() -> usize {
    20
}

fn default_page_window() -> usize {
    10
}

fn default_radical_page_size() -> usize {
    50
}

fn default_radical_page_window() -> usize {
    5
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_recent_capacity() -> usize {
    30
}

fn default_xor_key() -> Option<u8> {
    Some(185)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_window: default_page_window(),
            radical_page_size: default_radical_page_size(),
            radical_page_window: default_radical_page_window(),
            debounce_ms: default_debounce_ms(),
            recent_capacity: default_recent_capacity(),
            xor_key: default_xor_key(),
            storage_dir: None,
        }
    }
}

impl AppConfig {
    /// 메인 검색 화면의 페이지 버튼 창
    pub fn search_window(&self) -> PageWindow {
        PageWindow::Block(self.page_window)
    }

    /// 부수 탐색 화면의 페이지 버튼 창
    pub fn radical_window(&self) -> PageWindow {
        PageWindow::Centered(self.radical_page_window)
    }

    /// 저장 디렉토리 (설정값 우선)
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| home_dir().join(".local").join("share").join("hanja-study"))
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        })
}

/// 설정 파일 경로: ~/.config/hanja-study/config.json
pub fn config_path() -> PathBuf {
    home_dir()
        .join(".config")
        .join("hanja-study")
        .join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config_from(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용 ({}): {}", path.display(), e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// 기본 경로의 설정 파일 로드
pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

/// 설정 파일 저장
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("설정 디렉토리 생성 실패: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| format!("직렬화 실패: {}", e))?;
    fs::write(path, json).map_err(|e| format!("설정 파일 저장 실패: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.page_window, 10);
        assert_eq!(config.radical_page_size, 50);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.recent_capacity, 30);
        assert_eq!(config.xor_key, Some(185));
    }

    #[test]
    fn test_backward_compat_missing_field() {
        // 이전 설정 파일에 일부 필드만 있는 경우 나머지는 기본값
        let json = r#"{"page_size": 50, "xor_key": null}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.xor_key, None);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let config = AppConfig {
            page_size: 15,
            storage_dir: Some(dir.path().join("store")),
            ..Default::default()
        };
        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());
    }

    #[test]
    fn test_windows() {
        let config = AppConfig::default();
        assert_eq!(config.search_window(), PageWindow::Block(10));
        assert_eq!(config.radical_window(), PageWindow::Centered(5));
    }
}
