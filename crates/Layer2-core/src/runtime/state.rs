//! Runtime State - 원자적으로 교체되는 설정 스냅샷
//!
//! 컴포넌트는 설정을 불변 스냅샷으로 보관하고, 새 옵션이 오면
//! 검증을 모두 끝낸 뒤 한 번의 포인터 교체로 게시합니다.
//! 읽기 쪽은 락 없이 현재 스냅샷을 가져갑니다.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use visionkit_foundation::{Error, Result, RuntimeOptions};

// ============================================================================
// RuntimeParameters - 컴포넌트별 타입 파라미터
// ============================================================================

/// `RuntimeOptions::parameters`에서 역직렬화되는 컴포넌트별 파라미터
pub trait RuntimeParameters:
    DeserializeOwned + Serialize + Default + Clone + Send + Sync + 'static
{
    /// 값 범위를 검사하고 파생 값을 준비
    ///
    /// 에러 메시지는 `Error::InvalidConfiguration`으로 감싸집니다.
    fn prepare(&mut self) -> std::result::Result<(), String> {
        Ok(())
    }
}

// ============================================================================
// RuntimeSnapshot - 한 시점의 설정
// ============================================================================

/// 적용된 옵션과 파싱된 파라미터
#[derive(Debug, Clone)]
pub struct RuntimeSnapshot<P> {
    /// 원본 옵션
    pub options: Arc<RuntimeOptions>,

    /// 파싱/검증된 파라미터
    pub params: P,

    /// 적용 횟수 (초기값 0)
    pub revision: u64,

    /// 적용 시각
    pub applied_at: DateTime<Utc>,
}

// ============================================================================
// RuntimeState - 스냅샷 보관소
// ============================================================================

/// 컴포넌트 하나의 런타임 설정 상태
pub struct RuntimeState<P: RuntimeParameters> {
    /// 컴포넌트 등록 키
    key: String,

    /// 현재 스냅샷 (읽기는 lock-free)
    current: ArcSwap<RuntimeSnapshot<P>>,

    /// 쓰기 직렬화 (revision 단조 증가 보장)
    write_lock: Mutex<()>,
}

impl<P: RuntimeParameters> RuntimeState<P> {
    /// 초기 옵션으로 생성 (검증 실패 시 에러)
    pub fn new(key: impl Into<String>, options: RuntimeOptions) -> Result<Self> {
        let key = key.into();
        let params = parse_parameters::<P>(&key, &options)?;

        Ok(Self {
            current: ArcSwap::from_pointee(RuntimeSnapshot {
                options: Arc::new(options),
                params,
                revision: 0,
                applied_at: Utc::now(),
            }),
            key,
            write_lock: Mutex::new(()),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 현재 스냅샷
    pub fn load(&self) -> Arc<RuntimeSnapshot<P>> {
        self.current.load_full()
    }

    /// 현재 옵션
    pub fn options(&self) -> Arc<RuntimeOptions> {
        Arc::clone(&self.current.load().options)
    }

    pub fn revision(&self) -> u64 {
        self.current.load().revision
    }

    /// 새 옵션 적용
    ///
    /// 파싱과 검증이 모두 성공해야 스냅샷이 교체됩니다.
    /// 실패하면 이전 스냅샷이 그대로 남습니다.
    pub fn apply(&self, options: &RuntimeOptions) -> Result<Arc<RuntimeSnapshot<P>>> {
        if options.index() != self.key {
            warn!(
                "[{}] Options index '{}' does not match component key",
                self.key,
                options.index()
            );
        }

        let params = parse_parameters::<P>(&self.key, options)?;

        let _guard = self.write_lock.lock();
        let revision = self.current.load().revision + 1;
        let snapshot = Arc::new(RuntimeSnapshot {
            options: Arc::new(options.clone()),
            params,
            revision,
            applied_at: Utc::now(),
        });
        self.current.store(Arc::clone(&snapshot));

        debug!("[{}] Applied runtime options (rev {})", self.key, revision);
        Ok(snapshot)
    }
}

/// 옵션 공통 검사 + 파라미터 역직렬화 + prepare
fn parse_parameters<P: RuntimeParameters>(key: &str, options: &RuntimeOptions) -> Result<P> {
    options.validate().map_err(|e| rekey(key, e))?;

    let mut params: P = options.parameters_as().map_err(|e| rekey(key, e))?;

    params
        .prepare()
        .map_err(|message| Error::invalid_configuration(key, message))?;

    Ok(params)
}

/// 옵션 쪽 에러를 컴포넌트 키 기준으로 다시 붙임
fn rekey(key: &str, err: Error) -> Error {
    match err {
        Error::InvalidConfiguration { message, .. } => Error::invalid_configuration(key, message),
        other => other,
    }
}
