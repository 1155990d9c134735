//! RuntimeConfigurableService - 컴포넌트 레지스트리 및 일괄 refresh

use super::entry::{EntryInfo, EntryMetadata, RegistryEntry};
use super::events::RegistryEvent;
use super::report::{RefreshOutcome, RefreshReport};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use visionkit_foundation::{
    render_tags, split_key, ClassCategory, Error, KeyResolver, Result, RuntimeConfigurable,
    RuntimeOptions, RuntimeOptionsFile,
};

/// 이벤트 채널 용량
const EVENT_CHANNEL_CAPACITY: usize = 256;

// ============================================================================
// RuntimeConfigurableService
// ============================================================================

/// 런타임 재설정 가능한 컴포넌트 레지스트리
///
/// 키 → 컴포넌트 조회 테이블은 `RwLock`으로 보호됩니다.
/// refresh는 읽기 락 안에서 핸들만 복제하고, 컴포넌트 호출은 락 밖에서 수행하므로
/// 컴포넌트의 실패가 조회 테이블에 영향을 주지 않습니다.
pub struct RuntimeConfigurableService {
    /// 레지스트리 이름 (로그용)
    name: String,

    /// 키 → 항목
    entries: RwLock<HashMap<String, RegistryEntry>>,

    /// 이벤트 채널
    event_tx: broadcast::Sender<RegistryEvent>,
}

impl RuntimeConfigurableService {
    pub fn new(name: impl Into<String>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
            event_tx,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // 등록
    // ========================================================================

    /// 컴포넌트 등록
    ///
    /// 키가 비어 있으면 `InvalidArgument`, 이미 등록된 키면 `DuplicateKey`.
    pub fn register(
        &self,
        key: impl Into<String>,
        component: Arc<dyn RuntimeConfigurable>,
        mut metadata: EntryMetadata,
    ) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "registry key must not be empty".to_string(),
            ));
        }
        metadata.key = key.clone();
        let category = metadata.category.clone();
        let tags = render_tags(&metadata.tags);

        {
            let mut entries = self.entries.write();
            if entries.contains_key(&key) {
                return Err(Error::DuplicateKey(key));
            }
            entries.insert(key.clone(), RegistryEntry::new(component, metadata));
        }

        debug!("[{}] Registered: {} ({}) [{}]", self.name, key, category, tags);
        self.emit(RegistryEvent::registered(key, category));
        Ok(())
    }

    /// 간단한 등록 (카테고리는 키의 identity 부분)
    pub fn register_simple(
        &self,
        key: impl Into<String>,
        component: Arc<dyn RuntimeConfigurable>,
    ) -> Result<()> {
        let key = key.into();
        let category = split_key(&key)
            .map(|(identity, _)| identity.to_string())
            .unwrap_or_else(|| "default".to_string());
        let metadata = EntryMetadata::new(&key, category);
        self.register(key, component, metadata)
    }

    /// 키 해석기로 키를 계산한 뒤 등록하고, 해석된 키를 반환
    pub fn register_resolved<T, R>(
        &self,
        resolver: &R,
        category: T,
        custom_name: &str,
        component: Arc<dyn RuntimeConfigurable>,
    ) -> Result<String>
    where
        T: ClassCategory,
        R: KeyResolver<T> + ?Sized,
    {
        let key = resolver.resolve(category, custom_name)?;
        let label = if category.is_custom() {
            custom_name.trim()
        } else {
            category.canonical_name()
        };
        let metadata = EntryMetadata::new(&key, label);
        self.register(key.clone(), component, metadata)?;
        Ok(key)
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 컴포넌트 조회
    pub fn get(&self, key: &str) -> Option<Arc<dyn RuntimeConfigurable>> {
        let entries = self.entries.read();
        entries.get(key).map(|e| Arc::clone(&e.component))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// 모든 키 (정렬됨)
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// 현재 활성화된 컴포넌트의 키 (정렬됨)
    pub fn enabled_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .iter()
            .filter(|(_, e)| e.component.is_enabled())
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 등록 메타데이터
    pub fn metadata(&self, key: &str) -> Option<EntryMetadata> {
        self.entries.read().get(key).map(|e| e.metadata.clone())
    }

    /// 메타데이터 + 통계 + 활성화 상태
    pub fn entry_info(&self, key: &str) -> Option<EntryInfo> {
        self.entries.read().get(key).map(RegistryEntry::info)
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// 단일 식별자에 옵션 적용
    pub fn refresh(&self, id: &str, options: &RuntimeOptions) -> RefreshOutcome {
        // 읽기 락은 핸들 복제 동안만 유지
        let handle = {
            let entries = self.entries.read();
            entries
                .get(id)
                .map(|e| (Arc::clone(&e.component), Arc::clone(&e.counters)))
        };

        let Some((component, counters)) = handle else {
            warn!("[{}] Refresh target not found: {}", self.name, id);
            return RefreshOutcome::NotFound;
        };

        match component.refresh_runtime_parameters(options) {
            Ok(()) => {
                counters.record_success();
                let enabled = component.is_enabled();
                debug!("[{}] Refreshed: {} (enabled={})", self.name, id, enabled);
                self.emit(RegistryEvent::Refreshed {
                    key: id.to_string(),
                    enabled,
                });
                RefreshOutcome::Success
            }
            Err(e) => {
                counters.record_failure();
                let detail = match e {
                    Error::InvalidConfiguration { message, .. } => message,
                    other => other.to_string(),
                };
                warn!("[{}] Refresh rejected: {} ({})", self.name, id, detail);
                self.emit(RegistryEvent::refresh_failed(id, detail.clone()));
                RefreshOutcome::ConfigError(detail)
            }
        }
    }

    /// 일괄 refresh
    ///
    /// 각 항목은 독립적이며, 하나가 실패해도 나머지는 계속 시도합니다.
    pub fn refresh_all(&self, updates: &HashMap<String, RuntimeOptions>) -> RefreshReport {
        let report: RefreshReport = updates
            .iter()
            .map(|(id, options)| (id.clone(), self.refresh(id, options)))
            .collect();
        self.finish_batch(report)
    }

    /// 일괄 refresh (rayon 병렬)
    ///
    /// 결과는 `refresh_all`과 같습니다.
    pub fn refresh_all_parallel(&self, updates: &HashMap<String, RuntimeOptions>) -> RefreshReport {
        let outcomes: Vec<(String, RefreshOutcome)> = updates
            .par_iter()
            .map(|(id, options)| (id.clone(), self.refresh(id, options)))
            .collect();
        self.finish_batch(outcomes.into_iter().collect())
    }

    /// 옵션 파일을 읽어 일괄 refresh
    ///
    /// 파일을 읽거나 파싱하지 못하면 어떤 컴포넌트도 건드리지 않고 에러를 반환합니다.
    pub fn refresh_from_file(&self, path: &Path, parallel: bool) -> Result<RefreshReport> {
        let file = RuntimeOptionsFile::from_path(path)?;
        let updates = file.into_options();
        Ok(if parallel {
            self.refresh_all_parallel(&updates)
        } else {
            self.refresh_all(&updates)
        })
    }

    fn finish_batch(&self, report: RefreshReport) -> RefreshReport {
        let status = report.status();
        if report.is_complete() {
            info!("[{}] Bulk refresh: {}", self.name, status);
        } else {
            warn!(
                "[{}] Bulk refresh: {} (not found: {:?})",
                self.name,
                status,
                report.not_found()
            );
        }
        self.emit(RegistryEvent::BatchCompleted { status });
        report
    }

    // ========================================================================
    // 이벤트 / 통계
    // ========================================================================

    /// 이벤트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: RegistryEvent) {
        // 구독자가 없으면 send는 실패하며 이벤트는 버려짐
        let _ = self.event_tx.send(event);
    }

    /// 레지스트리 통계
    pub fn stats(&self) -> RegistryStats {
        let entries = self.entries.read();
        let mut stats = RegistryStats {
            name: self.name.clone(),
            total: entries.len(),
            ..Default::default()
        };

        for entry in entries.values() {
            if entry.component.is_enabled() {
                stats.enabled += 1;
            } else {
                stats.disabled += 1;
            }
            let counters = entry.counters.snapshot();
            stats.refreshes += counters.refresh_count;
            stats.failures += counters.failure_count;
        }

        stats
    }
}

impl std::fmt::Debug for RuntimeConfigurableService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfigurableService")
            .field("name", &self.name)
            .field("keys", &self.keys())
            .finish()
    }
}

// ============================================================================
// RegistryStats
// ============================================================================

/// 레지스트리 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub name: String,
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub refreshes: u64,
    pub failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RefreshStatus;
    use crate::vision::{BlobFunction, VisionFunctionKeyResolver, VisionFunctionType};

    fn blob(key: &str) -> Arc<dyn RuntimeConfigurable> {
        Arc::new(BlobFunction::new(VisionFunctionType::Blob, RuntimeOptions::new(key)).unwrap())
    }

    #[test]
    fn test_register_and_lookup() {
        let service = RuntimeConfigurableService::new("test");
        service
            .register_simple("Blob.VisionFunction", blob("Blob.VisionFunction"))
            .unwrap();

        assert!(service.contains("Blob.VisionFunction"));
        assert!(service.get("Blob.VisionFunction").is_some());
        assert!(service.get("Ocr.VisionFunction").is_none());
        assert_eq!(service.len(), 1);
        assert_eq!(
            service.metadata("Blob.VisionFunction").unwrap().category,
            "Blob"
        );
    }

    #[test]
    fn test_register_rejects_duplicates_and_empty_keys() {
        let service = RuntimeConfigurableService::new("test");
        service.register_simple("a.X", blob("a.X")).unwrap();

        assert!(matches!(
            service.register_simple("a.X", blob("a.X")),
            Err(Error::DuplicateKey(_))
        ));
        assert!(matches!(
            service.register_simple("  ", blob("b.X")),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn test_register_resolved() {
        let service = RuntimeConfigurableService::new("test");
        let resolver = VisionFunctionKeyResolver;

        let key = service
            .register_resolved(
                &resolver,
                VisionFunctionType::Custom,
                "Gauge",
                blob("Gauge.VisionFunction"),
            )
            .unwrap();
        assert_eq!(key, "Gauge.VisionFunction");
        assert_eq!(service.metadata(&key).unwrap().category, "Gauge");

        let padded = service
            .register_resolved(
                &resolver,
                VisionFunctionType::Custom,
                " Foo ",
                blob("Foo.VisionFunction"),
            )
            .unwrap();
        assert_eq!(padded, "Foo.VisionFunction");
        assert!(service.contains("Foo.VisionFunction"));
        assert_eq!(service.metadata("Foo.VisionFunction").unwrap().category, "Foo");

        let err = service
            .register_resolved(&resolver, VisionFunctionType::Custom, "", blob("x"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_refresh_outcomes_and_stats() {
        let service = RuntimeConfigurableService::new("test");
        service.register_simple("Blob.VisionFunction", blob("Blob.VisionFunction")).unwrap();

        let ok = RuntimeOptions::new("Blob.VisionFunction").disabled();
        assert_eq!(service.refresh("Blob.VisionFunction", &ok), RefreshOutcome::Success);

        let bad = RuntimeOptions::new("Blob.VisionFunction").with_parameter("minArea", -1.0);
        assert!(matches!(
            service.refresh("Blob.VisionFunction", &bad),
            RefreshOutcome::ConfigError(_)
        ));

        assert_eq!(service.refresh("Nope", &ok), RefreshOutcome::NotFound);

        let stats = service.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.disabled, 1);
        assert_eq!(stats.refreshes, 1);
        assert_eq!(stats.failures, 1);
        assert!(service.enabled_keys().is_empty());

        let info = service.entry_info("Blob.VisionFunction").unwrap();
        assert!(!info.enabled);
        assert!(info.stats.last_refreshed_at.is_some());
    }

    #[test]
    fn test_empty_batch() {
        let service = RuntimeConfigurableService::new("test");
        let report = service.refresh_all(&HashMap::new());
        assert!(report.is_empty());
        assert_eq!(report.status(), RefreshStatus::Empty);
    }
}
