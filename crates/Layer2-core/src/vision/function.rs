//! Vision Function - 런타임 재설정 가능한 검사 함수 컴포넌트

use super::category::VisionFunctionType;
use super::params::{
    BlobParams, CaliperParams, CustomParams, OcrParams, PatternMatchParams, ToolBlockParams,
};
use crate::runtime::{RuntimeParameters, RuntimeSnapshot, RuntimeState};
use std::fmt;
use std::sync::Arc;
use visionkit_foundation::{Result, RuntimeConfigurable, RuntimeOptions};

/// 파라미터 타입 `P`를 갖는 vision function
///
/// 설정은 `RuntimeState`에 보관되며, 실행 중인 검사는 `snapshot()`으로
/// 얻은 스냅샷 하나를 끝까지 사용합니다.
pub struct VisionFunction<P: RuntimeParameters> {
    category: VisionFunctionType,
    state: RuntimeState<P>,
}

pub type BlobFunction = VisionFunction<BlobParams>;
pub type OcrFunction = VisionFunction<OcrParams>;
pub type CaliperFunction = VisionFunction<CaliperParams>;
pub type PatternMatchFunction = VisionFunction<PatternMatchParams>;
pub type ToolBlockFunction = VisionFunction<ToolBlockParams>;
pub type CustomFunction = VisionFunction<CustomParams>;

impl<P: RuntimeParameters> VisionFunction<P> {
    /// 초기 옵션으로 생성 (키 = `options.index()`)
    pub fn new(category: VisionFunctionType, options: RuntimeOptions) -> Result<Self> {
        let key = options.index().to_string();
        Ok(Self {
            category,
            state: RuntimeState::new(key, options)?,
        })
    }

    pub fn key(&self) -> &str {
        self.state.key()
    }

    pub fn category(&self) -> VisionFunctionType {
        self.category
    }

    /// 현재 설정 스냅샷
    pub fn snapshot(&self) -> Arc<RuntimeSnapshot<P>> {
        self.state.load()
    }

    /// 현재 파라미터 (복제)
    pub fn params(&self) -> P {
        self.state.load().params.clone()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }
}

impl<P: RuntimeParameters> RuntimeConfigurable for VisionFunction<P> {
    fn refresh_runtime_parameters(&self, options: &RuntimeOptions) -> Result<()> {
        self.state.apply(options).map(|_| ())
    }

    fn runtime_options(&self) -> Arc<RuntimeOptions> {
        self.state.options()
    }
}

impl<P: RuntimeParameters> fmt::Debug for VisionFunction<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionFunction")
            .field("key", &self.key())
            .field("category", &self.category)
            .field("revision", &self.revision())
            .finish()
    }
}

/// 카테고리에 맞는 컴포넌트 생성
pub fn build_function(
    category: VisionFunctionType,
    options: RuntimeOptions,
) -> Result<Arc<dyn RuntimeConfigurable>> {
    Ok(match category {
        VisionFunctionType::Blob => Arc::new(BlobFunction::new(category, options)?),
        VisionFunctionType::Ocr => Arc::new(OcrFunction::new(category, options)?),
        VisionFunctionType::Caliper => Arc::new(CaliperFunction::new(category, options)?),
        VisionFunctionType::PatternMatch => {
            Arc::new(PatternMatchFunction::new(category, options)?)
        }
        VisionFunctionType::ToolBlock => Arc::new(ToolBlockFunction::new(category, options)?),
        VisionFunctionType::Custom => Arc::new(CustomFunction::new(category, options)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> BlobFunction {
        BlobFunction::new(
            VisionFunctionType::Blob,
            RuntimeOptions::new("Blob.VisionFunction")
                .with_name("Blob")
                .with_parameter("minArea", 10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_refresh_applies_options() {
        let function = blob();
        assert!(function.is_enabled());

        let next = RuntimeOptions::new("Blob.VisionFunction")
            .disabled()
            .with_parameter("minArea", 25.0)
            .with_parameter("threshold", 90);
        function.refresh_runtime_parameters(&next).unwrap();

        assert!(!function.is_enabled());
        assert_eq!(function.params().min_area, 25.0);
        assert_eq!(function.params().threshold, 90);
        assert_eq!(function.revision(), 1);
    }

    #[test]
    fn test_rejected_refresh_keeps_previous_configuration() {
        let function = blob();

        let bad = RuntimeOptions::new("Blob.VisionFunction")
            .disabled()
            .with_parameter("minArea", -5.0);
        let err = function.refresh_runtime_parameters(&bad).unwrap_err();
        assert!(err.is_invalid_configuration());

        assert!(function.is_enabled());
        assert_eq!(function.params().min_area, 10.0);
        assert_eq!(function.runtime_options().name(), "Blob");
        assert_eq!(function.revision(), 0);
    }

    #[test]
    fn test_build_function_per_category() {
        for category in VisionFunctionType::ALL {
            let component =
                build_function(category, RuntimeOptions::new(format!("{}.VisionFunction", category)))
                    .unwrap();
            assert!(component.is_enabled());
        }
    }

    #[test]
    fn test_build_function_rejects_invalid_initial_options() {
        let options = RuntimeOptions::new("Ocr.VisionFunction").with_parameter("pattern", "[");
        assert!(build_function(VisionFunctionType::Ocr, options).is_err());
    }

    #[test]
    fn test_concurrent_reads_during_refresh() {
        let function = Arc::new(blob());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let function = Arc::clone(&function);
                scope.spawn(move || {
                    for _ in 0..200 {
                        let snap = function.snapshot();
                        // 스냅샷 내부는 항상 일관적: min <= max
                        if let Some(max) = snap.params.max_area {
                            assert!(max >= snap.params.min_area);
                        }
                    }
                });
            }

            for i in 0..50 {
                let area = i as f64;
                let options = RuntimeOptions::new("Blob.VisionFunction")
                    .with_parameter("minArea", area)
                    .with_parameter("maxArea", area + 1.0);
                function.refresh_runtime_parameters(&options).unwrap();
            }
        });

        assert_eq!(function.revision(), 50);
    }
}
