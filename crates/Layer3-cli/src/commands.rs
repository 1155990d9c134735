//! Subcommand implementations

use crate::watch::{run_watch_loop, shutdown_on, OptionsFileWatcher};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use visionkit_core::{
    FunctionInstaller, RefreshReport, RefreshStatus, RuntimeConfigurableService,
    VisionFunctionKeyResolver, VisionFunctionType,
};
use visionkit_foundation::{
    ComponentManifest, ConfigStore, KeyResolver, RuntimeOptionsFile, COMPONENT_MANIFEST_FILE,
    RUNTIME_OPTIONS_FILE,
};

const REGISTRY_NAME: &str = "vision";

/// `visionkit resolve`
pub fn resolve(category: &str, name: Option<&str>) -> anyhow::Result<()> {
    let category: VisionFunctionType = category.parse()?;
    let key = VisionFunctionKeyResolver.resolve(category, name.unwrap_or_default())?;
    println!("{}", key);
    Ok(())
}

/// `visionkit refresh`
pub fn refresh(
    manifest: Option<PathBuf>,
    options: Option<PathBuf>,
    parallel: bool,
) -> anyhow::Result<()> {
    let registry = install_registry(manifest)?;

    let report = match options {
        Some(path) => registry.refresh_from_file(&path, parallel)?,
        None => {
            let updates = RuntimeOptionsFile::load()?.into_options();
            if parallel {
                registry.refresh_all_parallel(&updates)
            } else {
                registry.refresh_all(&updates)
            }
        }
    };

    print_report(&report)?;

    match report.status() {
        RefreshStatus::Empty | RefreshStatus::AllSucceeded { .. } => Ok(()),
        status => anyhow::bail!("Bulk refresh incomplete: {}", status),
    }
}

/// `visionkit watch`
pub async fn watch(
    manifest: Option<PathBuf>,
    options: Option<PathBuf>,
    interval_ms: u64,
) -> anyhow::Result<()> {
    let registry = install_registry(manifest)?;
    let path = match options {
        Some(path) => path,
        None => ConfigStore::current_project()?.file_path(RUNTIME_OPTIONS_FILE),
    };

    println!(
        "Watching {} ({} components, Ctrl+C to stop)",
        path.display(),
        registry.len()
    );

    let watcher = OptionsFileWatcher::new(path);
    run_watch_loop(
        &registry,
        watcher,
        Duration::from_millis(interval_ms.max(1)),
        shutdown_on(tokio::signal::ctrl_c()),
    )
    .await;

    println!("\n{}", serde_json::to_string_pretty(&registry.stats())?);
    Ok(())
}

/// 매니페스트를 읽어 레지스트리 구성
fn install_registry(manifest: Option<PathBuf>) -> anyhow::Result<Arc<RuntimeConfigurableService>> {
    let path = match manifest {
        Some(path) => path,
        None => ConfigStore::current_project()?.file_path(COMPONENT_MANIFEST_FILE),
    };

    let manifest = ComponentManifest::from_path(&path)
        .with_context(|| format!("Run 'visionkit init' or pass --manifest ({})", path.display()))?;

    let registry = Arc::new(RuntimeConfigurableService::new(REGISTRY_NAME));
    FunctionInstaller::new(Arc::clone(&registry)).install_manifest(&manifest)?;
    Ok(registry)
}

pub(crate) fn print_report(report: &RefreshReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    println!("{}", report.status());
    Ok(())
}
