//! RuntimeOptions - 런타임 설정 스냅샷
//!
//! 컴포넌트의 설정 가능한 값들을 담는 데이터 전용 타입입니다.
//! 한 번 만들어지면 변경되지 않으며, 새 값이 이전 값을 통째로 대체합니다.

use crate::tag::Tag;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// 컴포넌트 런타임 옵션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeOptions {
    /// 조회 키 (등록 키 또는 호출자가 지정한 식별자)
    index: String,

    /// 표시 이름
    #[serde(default)]
    name: String,

    /// 설명
    #[serde(default)]
    description: String,

    /// 활성화 여부
    #[serde(default = "default_true")]
    enabled: bool,

    /// 컴포넌트별 파라미터
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    parameters: Map<String, Value>,

    /// 태그
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<Tag>,
}

impl RuntimeOptions {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            name: String::new(),
            description: String::new(),
            enabled: true,
            parameters: Map::new(),
            tags: Vec::new(),
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn disabled(self) -> Self {
        self.with_enabled(false)
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// 표시용 라벨 (이름이 없으면 index)
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.index
        } else {
            &self.name
        }
    }

    // ========================================================================
    // Validation / Parsing
    // ========================================================================

    /// 공통 불변식 검사: index는 비어 있으면 안 됨
    pub fn validate(&self) -> Result<()> {
        if self.index.trim().is_empty() {
            return Err(Error::invalid_configuration(
                "<empty>",
                "options index must not be empty",
            ));
        }
        Ok(())
    }

    /// 파라미터 맵을 타입으로 역직렬화
    pub fn parameters_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.parameters.clone()))
            .map_err(|e| Error::invalid_configuration(&self.index, e.to_string()))
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Thresholds {
        low: u8,
        #[serde(default)]
        high: Option<u8>,
    }

    #[test]
    fn test_builder() {
        let options = RuntimeOptions::new("Blob.VisionFunction")
            .with_name("Blob")
            .with_description("blob detector")
            .disabled()
            .with_parameter("low", 10);

        assert_eq!(options.index(), "Blob.VisionFunction");
        assert_eq!(options.label(), "Blob");
        assert!(!options.enabled());
        assert_eq!(options.parameter("low"), Some(&Value::from(10)));
    }

    #[test]
    fn test_defaults_from_json() {
        let options: RuntimeOptions =
            serde_json::from_str(r#"{"index": "Ocr.VisionFunction"}"#).unwrap();
        assert!(options.enabled());
        assert!(options.name().is_empty());
        assert_eq!(options.label(), "Ocr.VisionFunction");
        assert!(options.parameters().is_empty());
    }

    #[test]
    fn test_empty_index_rejected() {
        let err = RuntimeOptions::new("  ").validate().unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(RuntimeOptions::new("x").validate().is_ok());
    }

    #[test]
    fn test_parameters_as() {
        let options = RuntimeOptions::new("k").with_parameter("low", 3);
        let parsed: Thresholds = options.parameters_as().unwrap();
        assert_eq!(parsed.low, 3);
        assert_eq!(parsed.high, None);

        let bad = RuntimeOptions::new("k").with_parameter("low", -1);
        let err = bad.parameters_as::<Thresholds>().unwrap_err();
        assert!(err.is_invalid_configuration());
    }
}
