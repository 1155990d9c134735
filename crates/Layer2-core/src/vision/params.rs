//! Vision function 파라미터
//!
//! 각 타입은 `RuntimeOptions::parameters`에서 역직렬화되며 `prepare`에서
//! 값 범위를 검사합니다. 이미지 처리 자체는 여기서 다루지 않습니다.

use crate::runtime::RuntimeParameters;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// VisionPro tool block 파일 확장자
pub const TOOL_BLOCK_EXTENSION: &str = ".vpp";

/// tool block 최대 타임아웃 (ms)
pub const MAX_TOOL_BLOCK_TIMEOUT_MS: u64 = 600_000;

fn check_unit_interval(name: &str, value: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be within [0, 1] (got {})", name, value));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be a finite value >= 0 (got {})", name, value));
    }
    Ok(())
}

// ============================================================================
// Blob
// ============================================================================

/// Blob 극성
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    #[default]
    DarkOnLight,
    LightOnDark,
}

/// Blob 분석 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BlobParams {
    /// 최소 면적 (px²)
    pub min_area: f64,
    /// 최대 면적 (px², 없으면 무제한)
    pub max_area: Option<f64>,
    /// 이진화 임계값
    pub threshold: u8,
    pub polarity: Polarity,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            min_area: 0.0,
            max_area: None,
            threshold: 128,
            polarity: Polarity::default(),
        }
    }
}

impl BlobParams {
    /// 면적이 허용 범위인지
    pub fn accepts_area(&self, area: f64) -> bool {
        area >= self.min_area && self.max_area.map_or(true, |max| area <= max)
    }
}

impl RuntimeParameters for BlobParams {
    fn prepare(&mut self) -> Result<(), String> {
        check_non_negative("minArea", self.min_area)?;
        if let Some(max) = self.max_area {
            check_non_negative("maxArea", max)?;
            if max < self.min_area {
                return Err(format!(
                    "maxArea ({}) must be >= minArea ({})",
                    max, self.min_area
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// OCR
// ============================================================================

/// OCR 파라미터
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OcrParams {
    /// 기대 문자열 정규식 (없으면 모든 문자열 허용)
    pub pattern: Option<String>,
    /// 최소 신뢰도
    pub min_confidence: f64,
    /// 최대 문자 수
    pub max_characters: usize,

    #[serde(skip)]
    compiled: Option<Regex>,
}

impl Default for OcrParams {
    fn default() -> Self {
        Self {
            pattern: None,
            min_confidence: 0.5,
            max_characters: 32,
            compiled: None,
        }
    }
}

impl OcrParams {
    /// 인식 결과가 현재 설정을 만족하는지
    pub fn accepts(&self, text: &str, confidence: f64) -> bool {
        if confidence < self.min_confidence || text.chars().count() > self.max_characters {
            return false;
        }
        self.compiled.as_ref().map_or(true, |re| re.is_match(text))
    }
}

impl RuntimeParameters for OcrParams {
    fn prepare(&mut self) -> Result<(), String> {
        check_unit_interval("minConfidence", self.min_confidence)?;
        if self.max_characters == 0 {
            return Err("maxCharacters must be > 0".to_string());
        }

        self.compiled = match self.pattern.as_deref() {
            Some(pattern) => Some(
                Regex::new(pattern).map_err(|e| format!("invalid pattern '{}': {}", pattern, e))?,
            ),
            None => None,
        };
        Ok(())
    }
}

// ============================================================================
// Caliper
// ============================================================================

/// 캘리퍼 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CaliperParams {
    /// 에지 대비 임계값
    pub edge_threshold: f64,
    /// 기대 폭 (없으면 측정만)
    pub expected_width: Option<f64>,
    /// 허용 오차
    pub tolerance: f64,
}

impl Default for CaliperParams {
    fn default() -> Self {
        Self {
            edge_threshold: 10.0,
            expected_width: None,
            tolerance: 0.0,
        }
    }
}

impl CaliperParams {
    /// 측정 폭 판정
    pub fn accepts_width(&self, width: f64) -> bool {
        self.expected_width
            .map_or(true, |expected| (width - expected).abs() <= self.tolerance)
    }
}

impl RuntimeParameters for CaliperParams {
    fn prepare(&mut self) -> Result<(), String> {
        if !self.edge_threshold.is_finite() || self.edge_threshold <= 0.0 {
            return Err(format!(
                "edgeThreshold must be > 0 (got {})",
                self.edge_threshold
            ));
        }
        if let Some(width) = self.expected_width {
            check_non_negative("expectedWidth", width)?;
        }
        check_non_negative("tolerance", self.tolerance)
    }
}

// ============================================================================
// Pattern Match
// ============================================================================

/// 패턴 매칭 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PatternMatchParams {
    /// 최소 점수
    pub min_score: f64,
    /// 최대 결과 수
    pub max_results: usize,
    /// 탐색 각도 범위 (±deg)
    pub angle_range_deg: f64,
}

impl Default for PatternMatchParams {
    fn default() -> Self {
        Self {
            min_score: 0.7,
            max_results: 1,
            angle_range_deg: 0.0,
        }
    }
}

impl RuntimeParameters for PatternMatchParams {
    fn prepare(&mut self) -> Result<(), String> {
        check_unit_interval("minScore", self.min_score)?;
        if self.max_results == 0 {
            return Err("maxResults must be >= 1".to_string());
        }
        if !(0.0..=180.0).contains(&self.angle_range_deg) {
            return Err(format!(
                "angleRangeDeg must be within [0, 180] (got {})",
                self.angle_range_deg
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tool Block (VisionPro)
// ============================================================================

/// VisionPro tool block 옵션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolBlockParams {
    /// tool block 파일 경로 (.vpp)
    pub tool_block_path: Option<String>,
    /// 실행 타임아웃 (ms)
    pub timeout_ms: u64,
    /// 결과로 읽어올 출력 터미널 이름
    pub outputs: Vec<String>,
}

impl Default for ToolBlockParams {
    fn default() -> Self {
        Self {
            tool_block_path: None,
            timeout_ms: 5_000,
            outputs: Vec::new(),
        }
    }
}

impl RuntimeParameters for ToolBlockParams {
    fn prepare(&mut self) -> Result<(), String> {
        if let Some(path) = self.tool_block_path.as_deref() {
            if !path.to_ascii_lowercase().ends_with(TOOL_BLOCK_EXTENSION) {
                return Err(format!(
                    "toolBlockPath must point to a {} file (got '{}')",
                    TOOL_BLOCK_EXTENSION, path
                ));
            }
        }
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TOOL_BLOCK_TIMEOUT_MS {
            return Err(format!(
                "timeoutMs must be within 1..={} (got {})",
                MAX_TOOL_BLOCK_TIMEOUT_MS, self.timeout_ms
            ));
        }

        let mut seen = HashSet::new();
        for output in &self.outputs {
            if output.trim().is_empty() {
                return Err("outputs must not contain empty names".to_string());
            }
            if !seen.insert(output.as_str()) {
                return Err(format!("duplicate output terminal '{}'", output));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Custom
// ============================================================================

/// 사용자 정의 함수 파라미터 (검증 없이 그대로 보관)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomParams {
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl CustomParams {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl RuntimeParameters for CustomParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<P: RuntimeParameters>(value: Value) -> Result<P, String> {
        let mut params: P = serde_json::from_value(value).map_err(|e| e.to_string())?;
        params.prepare()?;
        Ok(params)
    }

    #[test]
    fn test_blob_range() {
        let blob: BlobParams = parse(json!({"minArea": 10.0, "maxArea": 50.0})).unwrap();
        assert!(blob.accepts_area(20.0));
        assert!(!blob.accepts_area(5.0));
        assert!(!blob.accepts_area(60.0));
        assert_eq!(blob.threshold, 128);

        assert!(parse::<BlobParams>(json!({"minArea": -1.0})).is_err());
        assert!(parse::<BlobParams>(json!({"minArea": 10.0, "maxArea": 5.0})).is_err());
        assert!(parse::<BlobParams>(json!({"threshold": 300})).is_err());
    }

    #[test]
    fn test_ocr_pattern() {
        let ocr: OcrParams = parse(json!({"pattern": "^SN[0-9]{3}$", "minConfidence": 0.8})).unwrap();
        assert!(ocr.accepts("SN123", 0.9));
        assert!(!ocr.accepts("SN12X", 0.9));
        assert!(!ocr.accepts("SN123", 0.5));

        let err = parse::<OcrParams>(json!({"pattern": "(unclosed"})).unwrap_err();
        assert!(err.contains("invalid pattern"));
        assert!(parse::<OcrParams>(json!({"minConfidence": 1.5})).is_err());
    }

    #[test]
    fn test_ocr_without_pattern() {
        let ocr: OcrParams = parse(json!({})).unwrap();
        assert!(ocr.accepts("anything", 0.6));
        assert!(!ocr.accepts(&"x".repeat(33), 0.6));
    }

    #[test]
    fn test_caliper() {
        let caliper: CaliperParams =
            parse(json!({"expectedWidth": 12.0, "tolerance": 0.5})).unwrap();
        assert!(caliper.accepts_width(12.4));
        assert!(!caliper.accepts_width(13.0));
        assert!(parse::<CaliperParams>(json!({"edgeThreshold": 0.0})).is_err());
    }

    #[test]
    fn test_pattern_match() {
        assert!(parse::<PatternMatchParams>(json!({"minScore": 0.9, "maxResults": 4})).is_ok());
        assert!(parse::<PatternMatchParams>(json!({"maxResults": 0})).is_err());
        assert!(parse::<PatternMatchParams>(json!({"angleRangeDeg": 200.0})).is_err());
    }

    #[test]
    fn test_tool_block() {
        let block: ToolBlockParams = parse(json!({
            "toolBlockPath": "C:/jobs/Inspect.VPP",
            "timeoutMs": 2000,
            "outputs": ["Result", "Score"]
        }))
        .unwrap();
        assert_eq!(block.outputs.len(), 2);

        assert!(parse::<ToolBlockParams>(json!({"toolBlockPath": "job.txt"})).is_err());
        assert!(parse::<ToolBlockParams>(json!({"timeoutMs": 0})).is_err());
        assert!(parse::<ToolBlockParams>(json!({"outputs": ["A", "A"]})).is_err());
    }

    #[test]
    fn test_custom_keeps_values() {
        let custom: CustomParams = parse(json!({"depth": 3, "mode": "fast"})).unwrap();
        assert_eq!(custom.get("mode"), Some(&json!("fast")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(parse::<BlobParams>(json!({"minAera": 1.0})).is_err());
    }
}
