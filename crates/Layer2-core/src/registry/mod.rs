//! # Runtime Configurable Registry
//!
//! 키로 조회되는 런타임 재설정 가능 컴포넌트 레지스트리
//!
//! ## 개요
//!
//! 컴포지션 루트가 컴포넌트를 키와 함께 등록하고, 이후 설정 로더가
//! `식별자 → RuntimeOptions` 묶음을 전달하면 각 컴포넌트에 독립적으로 적용합니다.
//!
//! ## 설계 원칙
//!
//! 1. **독립 적용**: 한 항목의 실패가 다른 항목의 적용을 막지 않음
//! 2. **결과 수집**: NotFound / ConfigError는 예외가 아니라 `RefreshReport`에 기록
//! 3. **테이블 보호**: 조회 테이블은 `RwLock`, 컴포넌트 호출은 락 밖에서 수행
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               RuntimeConfigurableService                     │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │  RwLock<HashMap<String, RegistryEntry>>                 ││
//! │  │  ┌─────────────────────┬─────────────────────┐          ││
//! │  │  │ Blob.VisionFunction │ Ocr.VisionFunction  │ ...      ││
//! │  │  └─────────────────────┴─────────────────────┘          ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │        refresh_all({id: options})  ──►  RefreshReport        │
//! │        broadcast::Sender<RegistryEvent>                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용 예시
//!
//! ```ignore
//! use visionkit_core::registry::RuntimeConfigurableService;
//!
//! let registry = RuntimeConfigurableService::new("vision");
//! registry.register_simple("Blob.VisionFunction", blob)?;
//!
//! let report = registry.refresh_all(&updates);
//! match report.status() {
//!     RefreshStatus::AllSucceeded { .. } => {}
//!     status => eprintln!("{}: {:?}", status, report.failures()),
//! }
//! ```

mod entry;
mod events;
mod report;
mod service;

pub use entry::{EntryInfo, EntryMetadata, EntryStats};
pub use events::RegistryEvent;
pub use report::{RefreshOutcome, RefreshReport, RefreshStatus};
pub use service::{RegistryStats, RuntimeConfigurableService};
