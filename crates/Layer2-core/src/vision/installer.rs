//! Function Installer - 매니페스트를 레지스트리 항목으로 변환

use super::category::{VisionFunctionKeyResolver, VisionFunctionType};
use super::function::build_function;
use crate::registry::{EntryMetadata, RuntimeConfigurableService};
use std::sync::Arc;
use tracing::info;
use visionkit_foundation::{ClassCategory, ComponentManifest, ComponentSpec, KeyResolver, Result};

/// 컴포넌트 선언을 생성하여 레지스트리에 등록
pub struct FunctionInstaller {
    registry: Arc<RuntimeConfigurableService>,
    resolver: VisionFunctionKeyResolver,
}

impl FunctionInstaller {
    pub fn new(registry: Arc<RuntimeConfigurableService>) -> Self {
        Self {
            registry,
            resolver: VisionFunctionKeyResolver,
        }
    }

    pub fn registry(&self) -> &Arc<RuntimeConfigurableService> {
        &self.registry
    }

    /// 선언 하나 설치, 등록된 키 반환
    pub fn install(&self, spec: &ComponentSpec) -> Result<String> {
        let category: VisionFunctionType = spec.category.parse()?;
        let custom_name = spec.custom_name.as_deref().unwrap_or_default();
        let key = self.resolver.resolve(category, custom_name)?;

        let component = build_function(category, spec.initial_options(&key))?;

        let label = if category.is_custom() {
            custom_name.trim().to_string()
        } else {
            category.to_string()
        };
        let metadata = EntryMetadata::new(&key, label).with_tags(spec.tags.iter().cloned());
        self.registry.register(key.clone(), component, metadata)?;

        Ok(key)
    }

    /// 매니페스트 전체 설치
    ///
    /// 첫 번째 실패에서 중단합니다. 이미 설치된 항목은 그대로 남습니다.
    pub fn install_manifest(&self, manifest: &ComponentManifest) -> Result<Vec<String>> {
        let keys = manifest
            .components
            .iter()
            .map(|spec| self.install(spec))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "[{}] Installed {} components",
            self.registry.name(),
            keys.len()
        );
        Ok(keys)
    }
}
