//! Registry Entry - 레지스트리 항목 정의

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use visionkit_foundation::{RuntimeConfigurable, Tag};

// ============================================================================
// EntryMetadata - 등록 정보 (등록 후 불변)
// ============================================================================

/// 레지스트리 항목의 등록 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// 고유 키
    pub key: String,

    /// 카테고리 (예: "Blob")
    pub category: String,

    /// 등록 시간
    pub registered_at: DateTime<Utc>,

    /// 태그
    pub tags: Vec<Tag>,
}

impl EntryMetadata {
    pub fn new(key: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            category: category.into(),
            registered_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }
}

// ============================================================================
// EntryStats - refresh 통계
// ============================================================================

/// 항목별 refresh 카운터 (읽기 락만으로 갱신 가능)
#[derive(Debug, Default)]
pub(crate) struct EntryCounters {
    refreshes: AtomicU64,
    failures: AtomicU64,
    last_refreshed_at: Mutex<Option<DateTime<Utc>>>,
}

impl EntryCounters {
    pub(crate) fn record_success(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        *self.last_refreshed_at.lock() = Some(Utc::now());
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> EntryStats {
        EntryStats {
            refresh_count: self.refreshes.load(Ordering::Relaxed),
            failure_count: self.failures.load(Ordering::Relaxed),
            last_refreshed_at: *self.last_refreshed_at.lock(),
        }
    }
}

/// 항목별 refresh 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryStats {
    pub refresh_count: u64,
    pub failure_count: u64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

// ============================================================================
// RegistryEntry - 레지스트리 항목
// ============================================================================

/// 레지스트리 항목 - 컴포넌트 핸들과 메타데이터
pub(crate) struct RegistryEntry {
    pub(crate) component: Arc<dyn RuntimeConfigurable>,
    pub(crate) metadata: EntryMetadata,
    pub(crate) counters: Arc<EntryCounters>,
}

impl RegistryEntry {
    pub(crate) fn new(component: Arc<dyn RuntimeConfigurable>, metadata: EntryMetadata) -> Self {
        Self {
            component,
            metadata,
            counters: Arc::new(EntryCounters::default()),
        }
    }

    pub(crate) fn info(&self) -> EntryInfo {
        EntryInfo {
            metadata: self.metadata.clone(),
            stats: self.counters.snapshot(),
            enabled: self.component.is_enabled(),
        }
    }
}

/// 조회용 항목 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInfo {
    pub metadata: EntryMetadata,
    pub stats: EntryStats,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_metadata() {
        let meta = EntryMetadata::new("Blob.VisionFunction", "Blob")
            .with_tag(Tag::new("line", "A3"))
            .with_tags(vec![Tag::new("station", "7")]);

        assert_eq!(meta.key, "Blob.VisionFunction");
        assert_eq!(meta.category, "Blob");
        assert_eq!(meta.tags.len(), 2);
    }

    #[test]
    fn test_counters() {
        let counters = EntryCounters::default();
        assert_eq!(counters.snapshot(), EntryStats::default());

        counters.record_success();
        counters.record_success();
        counters.record_failure();

        let stats = counters.snapshot();
        assert_eq!(stats.refresh_count, 2);
        assert_eq!(stats.failure_count, 1);
        assert!(stats.last_refreshed_at.is_some());
    }
}
