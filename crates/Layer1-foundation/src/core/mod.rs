//! Core Module - 핵심 인터페이스 및 타입
//!
//! ## 타입 계층
//!
//! - `options.rs`: 런타임 옵션 스냅샷 (RuntimeOptions)
//! - `traits.rs`: 인터페이스 (ClassCategory, KeyResolver, RuntimeConfigurable)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  (category, custom name)                                 │
//! │          │                                               │
//! │          ▼                                               │
//! │   KeyResolver ──► "Blob.VisionFunction"                  │
//! │                          │                               │
//! │                          ▼                               │
//! │   Registry[key] ──► RuntimeConfigurable                  │
//! │                          ▲                               │
//! │                          │ refresh_runtime_parameters    │
//! │                   RuntimeOptions                         │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod options;
pub mod traits;

pub use options::RuntimeOptions;
pub use traits::{
    compose_key, split_key, ClassCategory, KeyResolver, RuntimeConfigurable, KEY_SEPARATOR,
};
