//! Component Manifest - 컴포지션 루트가 설치할 컴포넌트 목록

use super::format::load_from_path;
use crate::core::RuntimeOptions;
use crate::tag::Tag;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// 설정 파일명
pub const COMPONENT_MANIFEST_FILE: &str = "components.json";

/// 설치할 컴포넌트 목록
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentManifest {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

/// 개별 컴포넌트 선언
///
/// 초기 옵션은 index 없이 선언하고, 설치 시 해석된 키가 index가 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// 카테고리 이름 (예: "Blob", "Custom")
    pub category: String,

    /// Custom 카테고리용 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,

    /// 표시 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ComponentSpec {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            custom_name: None,
            name: None,
            description: String::new(),
            enabled: true,
            parameters: Map::new(),
            tags: Vec::new(),
        }
    }

    pub fn custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// 해석된 키를 index로 하는 초기 옵션 생성
    pub fn initial_options(&self, index: &str) -> RuntimeOptions {
        let name = self
            .name
            .clone()
            .or_else(|| self.custom_name.clone())
            .unwrap_or_else(|| self.category.clone());

        self.tags.iter().cloned().fold(
            RuntimeOptions::new(index)
                .with_name(name)
                .with_description(self.description.clone())
                .with_enabled(self.enabled)
                .with_parameters(self.parameters.clone()),
            RuntimeOptions::with_tag,
        )
    }
}

impl ComponentManifest {
    pub fn from_path(path: &Path) -> Result<Self> {
        load_from_path(path).map_err(|e| {
            Error::Config(format!(
                "Invalid component manifest {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn with_component(mut self, spec: ComponentSpec) -> Self {
        self.components.push(spec);
        self
    }
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_options() {
        let spec = ComponentSpec::new("Custom")
            .custom_name("Scratch")
            .parameter("depth", 0.3);
        let options = spec.initial_options("Scratch.VisionFunction");

        assert_eq!(options.index(), "Scratch.VisionFunction");
        assert_eq!(options.name(), "Scratch");
        assert!(options.enabled());
        assert_eq!(options.parameter("depth"), Some(&Value::from(0.3)));
    }

    #[test]
    fn test_manifest_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COMPONENT_MANIFEST_FILE);
        std::fs::write(
            &path,
            r#"{ "components": [
                { "category": "Blob", "parameters": { "minArea": 10.0 } },
                { "category": "Custom", "customName": "Scratch", "enabled": false,
                  "tags": [ { "name": "line", "value": "A3" } ] }
            ] }"#,
        )
        .unwrap();

        let manifest = ComponentManifest::from_path(&path).unwrap();
        assert_eq!(manifest.components.len(), 2);
        assert_eq!(manifest.components[1].custom_name.as_deref(), Some("Scratch"));

        let options = manifest.components[1].initial_options("Scratch.VisionFunction");
        assert!(!options.enabled());
        assert_eq!(options.tags().len(), 1);
    }
}
