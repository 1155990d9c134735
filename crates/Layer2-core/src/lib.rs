//! visionkit-core: Core Runtime for VisionKit
//!
//! Layer2 - 컴포넌트 레지스트리 및 런타임 재설정 레이어
//!
//! # 주요 모듈
//!
//! - `runtime`: 원자적으로 교체되는 설정 스냅샷 (`RuntimeState`)
//! - `registry`: 키 기반 레지스트리 및 일괄 refresh (`RuntimeConfigurableService`)
//! - `vision`: Vision function 컴포넌트, 키 해석기, 설치기
//!
//! # 사용 예시
//!
//! ```ignore
//! use visionkit_core::{FunctionInstaller, RuntimeConfigurableService};
//! use visionkit_foundation::{ComponentManifest, RuntimeOptionsFile};
//!
//! let registry = Arc::new(RuntimeConfigurableService::new("vision"));
//! FunctionInstaller::new(Arc::clone(&registry))
//!     .install_manifest(&ComponentManifest::from_path(manifest_path)?)?;
//!
//! let report = registry.refresh_from_file(options_path, false)?;
//! println!("{}", report.status());
//! ```

pub mod registry;
pub mod runtime;
pub mod vision;

// Re-exports: Registry
pub use registry::{
    EntryInfo, EntryMetadata, EntryStats, RefreshOutcome, RefreshReport, RefreshStatus,
    RegistryEvent, RegistryStats, RuntimeConfigurableService,
};

// Re-exports: Runtime state
pub use runtime::{RuntimeParameters, RuntimeSnapshot, RuntimeState};

// Re-exports: Vision functions
pub use vision::{
    build_function, BlobFunction, BlobParams, CaliperFunction, CaliperParams, CustomFunction,
    CustomParams, FunctionInstaller, OcrFunction, OcrParams, PatternMatchFunction,
    PatternMatchParams, Polarity, ToolBlockFunction, ToolBlockParams, VisionFunction,
    VisionFunctionKeyResolver, VisionFunctionType, VISION_FUNCTION_CLASS_TYPE,
};

// Layer1 re-exports
pub use visionkit_foundation::{Error, Result};

/// Layer2 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
