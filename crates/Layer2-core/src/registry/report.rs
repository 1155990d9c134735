//! Refresh Report - 일괄 refresh 결과
//!
//! 식별자마다 Success / NotFound / ConfigError 중 하나를 기록합니다.
//! 부분 성공은 예외가 아니라 정상적인 결과입니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// RefreshOutcome - 항목별 결과
// ============================================================================

/// 항목 하나의 refresh 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// 적용 성공
    Success,

    /// 식별자에 해당하는 컴포넌트 없음
    NotFound,

    /// 컴포넌트가 옵션을 거부함
    ConfigError(String),
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "ok"),
            Self::NotFound => write!(f, "not found"),
            Self::ConfigError(detail) => write!(f, "config error: {}", detail),
        }
    }
}

// ============================================================================
// RefreshStatus - 배치 전체 상태
// ============================================================================

/// 배치 전체 요약
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefreshStatus {
    /// 입력이 비어 있음
    Empty,

    /// 모두 성공
    AllSucceeded { total: usize },

    /// 일부 실패
    PartialSuccess { succeeded: usize, failed: usize },

    /// 모두 실패
    TotalFailure { failed: usize },
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no updates"),
            Self::AllSucceeded { total } => write!(f, "all {} succeeded", total),
            Self::PartialSuccess { succeeded, failed } => {
                write!(f, "{} succeeded, {} failed", succeeded, failed)
            }
            Self::TotalFailure { failed } => write!(f, "all {} failed", failed),
        }
    }
}

// ============================================================================
// RefreshReport
// ============================================================================

/// 일괄 refresh 결과 (식별자 순 정렬)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    outcomes: BTreeMap<String, RefreshOutcome>,
}

impl RefreshReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: impl Into<String>, outcome: RefreshOutcome) {
        self.outcomes.insert(id.into(), outcome);
    }

    pub fn get(&self, id: &str) -> Option<&RefreshOutcome> {
        self.outcomes.get(id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RefreshOutcome)> {
        self.outcomes.iter().map(|(id, outcome)| (id.as_str(), outcome))
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// 성공한 식별자
    pub fn succeeded(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, o)| o.is_success())
            .map(|(id, _)| id)
            .collect()
    }

    /// 실패한 항목 (식별자, 결과)
    pub fn failures(&self) -> Vec<(&str, &RefreshOutcome)> {
        self.iter().filter(|(_, o)| !o.is_success()).collect()
    }

    /// 컴포넌트를 찾지 못한 식별자
    pub fn not_found(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, o)| matches!(o, RefreshOutcome::NotFound))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn status(&self) -> RefreshStatus {
        let succeeded = self.success_count();
        let failed = self.failure_count();

        match (succeeded, failed) {
            (0, 0) => RefreshStatus::Empty,
            (total, 0) => RefreshStatus::AllSucceeded { total },
            (0, failed) => RefreshStatus::TotalFailure { failed },
            (succeeded, failed) => RefreshStatus::PartialSuccess { succeeded, failed },
        }
    }

    /// 실패가 없는지 (빈 배치 포함)
    pub fn is_complete(&self) -> bool {
        self.failure_count() == 0
    }
}

impl FromIterator<(String, RefreshOutcome)> for RefreshReport {
    fn from_iter<I: IntoIterator<Item = (String, RefreshOutcome)>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}
