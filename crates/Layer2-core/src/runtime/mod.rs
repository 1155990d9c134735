//! Runtime - 컴포넌트 런타임 설정 보관
//!
//! `RuntimeState<P>`는 `ArcSwap`으로 불변 스냅샷을 교체합니다.
//! 쓰기는 검증 → 교체 순서로 진행되어 부분 적용이 일어나지 않습니다.

mod state;

pub use state::{RuntimeParameters, RuntimeSnapshot, RuntimeState};
