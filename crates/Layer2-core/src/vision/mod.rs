//! # Vision Functions
//!
//! 런타임 재설정 가능한 검사 함수 컴포넌트
//!
//! - `category`: 함수 종류 및 `"{identity}.VisionFunction"` 키 해석기
//! - `params`: 종류별 파라미터 및 검증
//! - `function`: `VisionFunction<P>` 컴포넌트
//! - `installer`: 매니페스트 → 레지스트리 등록
//!
//! 이미지 처리 자체는 포함하지 않습니다. 각 함수는 자신의 설정 스냅샷만 관리합니다.

mod category;
mod function;
mod installer;
mod params;

pub use category::{VisionFunctionKeyResolver, VisionFunctionType, VISION_FUNCTION_CLASS_TYPE};
pub use function::{
    build_function, BlobFunction, CaliperFunction, CustomFunction, OcrFunction,
    PatternMatchFunction, ToolBlockFunction, VisionFunction,
};
pub use installer::FunctionInstaller;
pub use params::{
    BlobParams, CaliperParams, CustomParams, OcrParams, PatternMatchParams, Polarity,
    ToolBlockParams, MAX_TOOL_BLOCK_TIMEOUT_MS, TOOL_BLOCK_EXTENSION,
};
