//! Options file watcher
//!
//! 파일 스탬프(수정 시각 + 크기)를 주기적으로 확인하고, 바뀌었을 때만 일괄 refresh를 수행합니다.
//! 스탬프는 적용에 성공한 뒤에만 확정되며, 실패한 스탬프는 파일이 다시 바뀔 때까지 재시도하지 않습니다.

use crate::commands::print_report;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};
use visionkit_core::{RefreshReport, RuntimeConfigurableService};

/// 파일 변경 판별용 스탬프
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    modified: SystemTime,
    len: u64,
}

impl FileStamp {
    fn read(path: &Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        Some(Self {
            modified: meta.modified().ok()?,
            len: meta.len(),
        })
    }
}

/// 옵션 파일 변경 감지
#[derive(Debug)]
pub struct OptionsFileWatcher {
    path: PathBuf,
    applied: Option<FileStamp>,
    rejected: Option<FileStamp>,
}

impl OptionsFileWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            applied: None,
            rejected: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 적용/거부된 적 없는 새 스탬프 (처음 발견한 경우 포함). 확정은 호출자 몫
    pub fn poll(&self) -> Option<FileStamp> {
        let stamp = FileStamp::read(&self.path)?;
        if self.applied == Some(stamp) || self.rejected == Some(stamp) {
            return None;
        }
        Some(stamp)
    }

    pub fn mark_applied(&mut self, stamp: FileStamp) {
        self.applied = Some(stamp);
        self.rejected = None;
    }

    pub fn mark_rejected(&mut self, stamp: FileStamp) {
        self.rejected = Some(stamp);
    }
}

/// 변경이 감지되면 옵션 파일을 적용
///
/// 읽기/파싱 실패는 로그만 남기고 다음 변경을 기다립니다.
pub fn apply_if_changed(
    registry: &RuntimeConfigurableService,
    watcher: &mut OptionsFileWatcher,
) -> Option<RefreshReport> {
    let stamp = watcher.poll()?;

    debug!("Options file changed: {}", watcher.path().display());
    match registry.refresh_from_file(watcher.path(), false) {
        Ok(report) => {
            watcher.mark_applied(stamp);
            Some(report)
        }
        Err(e) => {
            warn!("Skipping options file update: {}", e);
            watcher.mark_rejected(stamp);
            None
        }
    }
}

/// 종료 신호 대기
///
/// 신호 핸들러 설치에 실패하면 경고만 남기고 영원히 대기합니다 (감시는 계속).
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Shutdown signal unavailable, watching until killed: {}", e);
        std::future::pending::<()>().await;
    }
}

/// `shutdown`이 완료될 때까지 `period` 간격으로 확인
pub async fn run_watch_loop<F>(
    registry: &RuntimeConfigurableService,
    mut watcher: OptionsFileWatcher,
    period: Duration,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if let Some(report) = apply_if_changed(registry, &mut watcher) {
                    if let Err(e) = print_report(&report) {
                        warn!("Failed to print report: {}", e);
                    }
                }
            }
        }
    }
}
