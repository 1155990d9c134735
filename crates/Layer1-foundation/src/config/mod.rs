//! Config - 설정 파일 관리
//!
//! - `format.rs` - JSON/TOML 포맷 감지 및 파싱
//! - `options_file.rs` - 일괄 재설정용 RuntimeOptionsFile
//! - `manifest.rs` - 설치할 컴포넌트 목록 (ComponentManifest)

mod format;
mod manifest;
mod options_file;

pub use format::{load_from_path, strip_json_comments, ConfigFormat};
pub use manifest::{ComponentManifest, ComponentSpec, COMPONENT_MANIFEST_FILE};
pub use options_file::{RuntimeOptionsFile, RUNTIME_OPTIONS_FILE};
