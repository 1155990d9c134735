//! Storage module for VisionKit
//!
//! - `store`: 범위(글로벌/프로젝트)별 설정 문서 저장소

mod store;

pub use store::{ConfigStore, StoreScope, CONFIG_DIR_NAME};
