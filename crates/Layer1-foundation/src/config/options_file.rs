//! Runtime Options File - 일괄 재설정 입력 파일
//!
//! `{ "version": 1, "options": { "<id>": RuntimeOptions, ... } }` 형태의 문서입니다.
//! 글로벌 → 프로젝트 순서로 병합되며, 나중 파일이 같은 식별자를 덮어씁니다.

use super::format::load_from_path;
use crate::core::RuntimeOptions;
use crate::storage::ConfigStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 설정 파일명
pub const RUNTIME_OPTIONS_FILE: &str = "runtime_options.json";

/// 런타임 옵션 파일
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeOptionsFile {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 식별자 → 옵션
    #[serde(default)]
    pub options: HashMap<String, RuntimeOptions>,
}

impl RuntimeOptionsFile {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            options: HashMap::new(),
        }
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        Self::load_layered(&ConfigStore::layered()?)
    }

    /// 주어진 저장소를 순서대로 병합 (없는 파일은 건너뜀, 뒤쪽이 우선)
    pub fn load_layered(stores: &[ConfigStore]) -> Result<Self> {
        let mut file = Self::new();
        for store in stores {
            if let Some(layer) = store.load_optional::<Self>(RUNTIME_OPTIONS_FILE)? {
                debug!(
                    "Merging {} runtime option entries from {} config",
                    layer.options.len(),
                    store.scope()
                );
                file.merge(layer);
            }
        }
        Ok(file)
    }

    /// 특정 경로에서 로드 (JSON/TOML은 확장자로 판단)
    ///
    /// 파일을 읽지 못하거나 파싱에 실패하면 배치 전체를 시작하지 않도록 에러를 반환합니다.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file: Self = load_from_path(path).map_err(|e| {
            Error::Config(format!(
                "Invalid runtime options file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            "Loaded {} runtime option entries from {}",
            file.options.len(),
            path.display()
        );
        Ok(file)
    }

    /// 저장소에 기록, 저장한 경로 반환
    pub fn save_to(&self, store: &ConfigStore) -> Result<PathBuf> {
        store.save(RUNTIME_OPTIONS_FILE, self)
    }

    // ========================================================================
    // Merge / Access
    // ========================================================================

    /// 다른 파일과 병합 (other가 우선)
    pub fn merge(&mut self, other: RuntimeOptionsFile) {
        self.version = self.version.max(other.version);
        self.options.extend(other.options);
    }

    pub fn insert(&mut self, id: impl Into<String>, options: RuntimeOptions) {
        self.options.insert(id.into(), options);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn into_options(self) -> HashMap<String, RuntimeOptions> {
        self.options
    }
}

fn default_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(
            &path,
            r#"{
                // disable blob for maintenance
                "options": {
                    "Blob.VisionFunction": { "index": "Blob.VisionFunction", "enabled": false }
                }
            }"#,
        )
        .unwrap();

        let file = RuntimeOptionsFile::from_path(&path).unwrap();
        assert_eq!(file.version, 1);
        assert_eq!(file.len(), 1);
        assert!(!file.options["Blob.VisionFunction"].enabled());
    }

    #[test]
    fn test_from_toml_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        std::fs::write(
            &path,
            r#"
version = 2

[options."Ocr.VisionFunction"]
index = "Ocr.VisionFunction"
name = "Serial OCR"

[options."Ocr.VisionFunction".parameters]
pattern = "^SN[0-9]{6}$"
minConfidence = 0.8
"#,
        )
        .unwrap();

        let file = RuntimeOptionsFile::from_path(&path).unwrap();
        assert_eq!(file.version, 2);
        let ocr = &file.options["Ocr.VisionFunction"];
        assert_eq!(ocr.name(), "Serial OCR");
        assert_eq!(ocr.parameter("pattern").unwrap(), "^SN[0-9]{6}$");
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            RuntimeOptionsFile::from_path(&path),
            Err(Error::Config(_))
        ));
        assert!(RuntimeOptionsFile::from_path(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base = RuntimeOptionsFile::new();
        base.insert("a", RuntimeOptions::new("a").with_name("old"));
        base.insert("b", RuntimeOptions::new("b"));

        let mut later = RuntimeOptionsFile::new();
        later.insert("a", RuntimeOptions::new("a").with_name("new"));

        base.merge(later);
        assert_eq!(base.len(), 2);
        assert_eq!(base.options["a"].name(), "new");
    }

    #[test]
    fn test_load_layered_later_store_wins() {
        let lower_dir = tempfile::tempdir().unwrap();
        let upper_dir = tempfile::tempdir().unwrap();
        let empty_dir = tempfile::tempdir().unwrap();
        let lower = ConfigStore::project(lower_dir.path());
        let upper = ConfigStore::project(upper_dir.path());
        let empty = ConfigStore::project(empty_dir.path());

        let mut base = RuntimeOptionsFile::new();
        base.insert(
            "Blob.VisionFunction",
            RuntimeOptions::new("Blob.VisionFunction").with_name("lower"),
        );
        base.insert("Ocr.VisionFunction", RuntimeOptions::new("Ocr.VisionFunction"));
        base.save_to(&lower).unwrap();

        let mut over = RuntimeOptionsFile::new();
        over.version = 3;
        over.insert(
            "Blob.VisionFunction",
            RuntimeOptions::new("Blob.VisionFunction").with_name("upper"),
        );
        let path = over.save_to(&upper).unwrap();
        assert!(path.ends_with(RUNTIME_OPTIONS_FILE));

        let merged = RuntimeOptionsFile::load_layered(&[lower, empty, upper]).unwrap();
        assert_eq!(merged.version, 3);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.options["Blob.VisionFunction"].name(), "upper");
        assert!(merged.options.contains_key("Ocr.VisionFunction"));
    }

    #[test]
    fn test_load_layered_broken_layer_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::project(dir.path());
        std::fs::create_dir_all(store.base_dir()).unwrap();
        std::fs::write(store.file_path(RUNTIME_OPTIONS_FILE), "{ nope").unwrap();

        assert!(matches!(
            RuntimeOptionsFile::load_layered(&[store]),
            Err(Error::Config(_))
        ));
        assert!(RuntimeOptionsFile::load_layered(&[]).unwrap().is_empty());
    }
}
