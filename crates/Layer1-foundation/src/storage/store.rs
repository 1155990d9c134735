//! 설정 문서 저장소
//!
//! 디렉토리 하나를 범위로 삼아 설정 문서를 파일명으로 읽고 씁니다.
//! 읽기는 확장자에 따라 JSON(주석 허용) 또는 TOML, 쓰기는 pretty JSON입니다.

use crate::config::ConfigFormat;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 프로젝트 설정 폴더 이름
pub const CONFIG_DIR_NAME: &str = ".visionkit";

/// 글로벌 설정 폴더 이름 (`dirs::config_dir()` 하위)
const GLOBAL_DIR_NAME: &str = "visionkit";

/// 저장소 범위 (병합 시 Global → Project 순)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StoreScope {
    Global,
    Project,
}

impl fmt::Display for StoreScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Project => f.write_str("project"),
        }
    }
}

/// 범위가 정해진 설정 저장소
#[derive(Debug, Clone)]
pub struct ConfigStore {
    scope: StoreScope,
    base_dir: PathBuf,
}

impl ConfigStore {
    /// 글로벌 설정 (<config_dir>/visionkit/)
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join(GLOBAL_DIR_NAME);
        Ok(Self {
            scope: StoreScope::Global,
            base_dir: dir,
        })
    }

    /// 프로젝트 설정 (<root>/.visionkit/)
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self {
            scope: StoreScope::Project,
            base_dir: root.as_ref().join(CONFIG_DIR_NAME),
        }
    }

    /// 현재 디렉토리 프로젝트 설정
    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))?;
        Ok(Self::project(cwd))
    }

    /// 병합 순서대로 나열한 저장소 (글로벌을 찾을 수 없으면 프로젝트만)
    pub fn layered() -> Result<Vec<Self>> {
        let mut stores = Vec::with_capacity(2);
        if let Ok(global) = Self::global() {
            stores.push(global);
        }
        stores.push(Self::current_project()?);
        Ok(stores)
    }

    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).is_file()
    }

    /// 문서 로드 (파일이 없으면 None, 깨졌으면 에러)
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
        let value = ConfigFormat::from_path(&path).parse(&content).map_err(|e| {
            Error::Config(format!(
                "Invalid {} config {}: {}",
                self.scope,
                path.display(),
                e
            ))
        })?;

        debug!("Loaded {} config {}", self.scope, path.display());
        Ok(Some(value))
    }

    /// 문서 저장 (디렉토리 자동 생성), 저장한 경로 반환
    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            Error::Storage(format!(
                "Failed to create {}: {}",
                self.base_dir.display(),
                e
            ))
        })?;

        let path = self.file_path(filename);
        std::fs::write(&path, serde_json::to_string_pretty(data)?)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}
