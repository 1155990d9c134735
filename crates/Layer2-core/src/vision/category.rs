//! Vision Function 카테고리 및 키 해석기

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use visionkit_foundation::{ClassCategory, Error, KeyResolver};

/// Vision function 클래스 타입 구분자
pub const VISION_FUNCTION_CLASS_TYPE: &str = "VisionFunction";

/// Vision function 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisionFunctionType {
    /// Blob 분석
    Blob,
    /// 문자 인식
    Ocr,
    /// 캘리퍼 (에지 거리 측정)
    Caliper,
    /// 패턴 매칭
    PatternMatch,
    /// VisionPro tool block
    ToolBlock,
    /// 사용자 정의 (이름 필요)
    Custom,
}

impl VisionFunctionType {
    pub const ALL: [VisionFunctionType; 6] = [
        Self::Blob,
        Self::Ocr,
        Self::Caliper,
        Self::PatternMatch,
        Self::ToolBlock,
        Self::Custom,
    ];

    /// 표시 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blob => "Blob",
            Self::Ocr => "Ocr",
            Self::Caliper => "Caliper",
            Self::PatternMatch => "PatternMatch",
            Self::ToolBlock => "ToolBlock",
            Self::Custom => "Custom",
        }
    }
}

impl ClassCategory for VisionFunctionType {
    fn canonical_name(&self) -> &'static str {
        self.name()
    }

    fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for VisionFunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisionFunctionType {
    type Err = Error;

    /// 대소문자 및 `-`/`_` 구분 없이 파싱
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|t| t.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown vision function type: {}", s)))
    }
}

// ============================================================================
// VisionFunctionKeyResolver
// ============================================================================

/// Vision function 키 해석기 (`"{identity}.VisionFunction"`)
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionFunctionKeyResolver;

impl KeyResolver<VisionFunctionType> for VisionFunctionKeyResolver {
    fn class_type(&self) -> &str {
        VISION_FUNCTION_CLASS_TYPE
    }
}
