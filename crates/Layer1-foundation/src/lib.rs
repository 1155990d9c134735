//! # visionkit-foundation
//!
//! Foundation layer for VisionKit:
//! - Core: 런타임 옵션 계약 (RuntimeOptions, RuntimeConfigurable, KeyResolver)
//! - Tag: 불변 key/value 메타데이터
//! - Storage: ConfigStore (글로벌/프로젝트 범위 설정 문서)
//! - Config: 일괄 재설정 입력 파일, 컴포넌트 매니페스트
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Config (runtime_options.json / components.json)        │
//! │                     │                                   │
//! │                     ▼                                   │
//! │          RuntimeOptions snapshots                       │
//! │                     │                                   │
//! │          ┌──────────┴──────────┐                        │
//! │          ▼                     ▼                        │
//! │     KeyResolver        RuntimeConfigurable              │
//! │   (category → key)    (refresh_runtime_parameters)      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod tag;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core (핵심 Trait 및 타입)
// ============================================================================
pub use crate::core::{
    compose_key, split_key, ClassCategory, KeyResolver, RuntimeConfigurable, RuntimeOptions,
    KEY_SEPARATOR,
};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    load_from_path, strip_json_comments, ComponentManifest, ComponentSpec, ConfigFormat,
    RuntimeOptionsFile, COMPONENT_MANIFEST_FILE, RUNTIME_OPTIONS_FILE,
};

// ============================================================================
// Storage / Tag
// ============================================================================
pub use storage::{ConfigStore, StoreScope, CONFIG_DIR_NAME};
pub use tag::{render_tags, NamedValue, Tag};
