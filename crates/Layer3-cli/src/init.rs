//! VisionKit init command
//!
//! Creates .visionkit/ with a sample component manifest and runtime options file.

use visionkit_core::{VisionFunctionKeyResolver, VisionFunctionType};
use visionkit_foundation::{
    ComponentManifest, ComponentSpec, ConfigStore, KeyResolver, RuntimeOptions,
    RuntimeOptionsFile, COMPONENT_MANIFEST_FILE,
};

/// Initialize VisionKit configuration in the current directory
pub fn init_project(force: bool) -> anyhow::Result<()> {
    let store = ConfigStore::current_project()?;

    if store.exists(COMPONENT_MANIFEST_FILE) && !force {
        println!("✓ VisionKit already initialized in this directory.");
        println!("  Use --force to reinitialize.");
        return Ok(());
    }

    println!("Initializing VisionKit...");

    let manifest = ComponentManifest::default()
        .with_component(ComponentSpec::new("Blob").parameter("minArea", 25.0))
        .with_component(ComponentSpec::new("Ocr").parameter("pattern", "^[A-Z0-9]{6}$"))
        .with_component(ComponentSpec::new("Custom").custom_name("Scratch"));
    let manifest_path = store.save(COMPONENT_MANIFEST_FILE, &manifest)?;

    let blob_key = VisionFunctionKeyResolver.resolve(VisionFunctionType::Blob, "")?;
    let mut options = RuntimeOptionsFile::new();
    options.insert(
        blob_key.clone(),
        RuntimeOptions::new(blob_key)
            .with_name("Blob")
            .with_parameter("minArea", 40.0)
            .with_parameter("threshold", 110),
    );
    let options_path = options.save_to(&store)?;

    println!("\n✓ VisionKit initialized!");
    println!("\nCreated:");
    println!("  {}", manifest_path.display());
    println!("  {}", options_path.display());
    println!("\nNext: 'visionkit refresh' or 'visionkit watch'");

    Ok(())
}
