//! Registry Events - 레지스트리 변경 이벤트

use super::report::RefreshStatus;
use serde::{Deserialize, Serialize};

/// 레지스트리 이벤트
///
/// `RuntimeConfigurableService::subscribe()`로 수신합니다.
/// 구독자가 없으면 이벤트는 버려집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// 컴포넌트 등록됨
    Registered { key: String, category: String },

    /// 옵션 적용 성공
    Refreshed { key: String, enabled: bool },

    /// 옵션 적용 실패 (이전 설정 유지)
    RefreshFailed { key: String, reason: String },

    /// 일괄 refresh 완료
    BatchCompleted { status: RefreshStatus },
}

impl RegistryEvent {
    pub fn registered(key: impl Into<String>, category: impl Into<String>) -> Self {
        Self::Registered {
            key: key.into(),
            category: category.into(),
        }
    }

    pub fn refresh_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RefreshFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// 이벤트 키 반환
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Registered { key, .. } => Some(key),
            Self::Refreshed { key, .. } => Some(key),
            Self::RefreshFailed { key, .. } => Some(key),
            Self::BatchCompleted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event() {
        let event = RegistryEvent::registered("Blob.VisionFunction", "Blob");
        assert_eq!(event.key(), Some("Blob.VisionFunction"));

        let event = RegistryEvent::BatchCompleted {
            status: RefreshStatus::Empty,
        };
        assert_eq!(event.key(), None);
    }
}
