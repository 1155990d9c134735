//! Tag - 로그 가능한 엔티티에 붙이는 불변 key/value 메타데이터

use serde::{Deserialize, Serialize};
use std::fmt;

/// 이름/값 쌍 (생성 후 변경 불가)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedValue {
    name: String,
    value: String,
}

/// 로그 태그
pub type Tag = NamedValue;

impl NamedValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for NamedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// 태그 목록을 `a=1,b=2` 형태로 렌더링 (tracing 필드용)
pub fn render_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tags() {
        let tags = vec![Tag::new("line", "A3"), Tag::new("station", "7")];
        assert_eq!(render_tags(&tags), "line=A3,station=7");
        assert_eq!(render_tags(&[]), "");
    }

    #[test]
    fn test_serde_shape() {
        let tag = Tag::new("camera", "cam-01");
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json, serde_json::json!({"name": "camera", "value": "cam-01"}));
    }
}
