//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::error::add_xpi_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use xpimport_core::ImportPipeline;
use xpimport_core::catalog::AnyVersion;
use xpimport_core::catalog::MemoryVersionCatalog;
use xpimport_core::catalog::NoAddons;
use xpimport_core::catalog::VersionCatalog;

/// One row of an `--app-versions` file.
#[derive(Deserialize)]
struct VersionEntry {
    application: u32,
    version: String,
}

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let scratch_root = match &args.scratch_dir {
        Some(dir) => dir.clone(),
        None => env::temp_dir(),
    };

    let catalog = load_version_catalog(args.app_versions.as_deref())?;
    let pipeline = ImportPipeline::new(scratch_root, &*catalog, &NoAddons);

    let file = File::open(&args.xpi)
        .with_context(|| format!("failed to open package '{}'", args.xpi.display()))?;
    let record = add_xpi_context(pipeline.import(BufReader::new(file), None), &args.xpi)?;

    if !record.has_identifier() {
        formatter.format_warning("manifest declares no add-on identifier");
    }

    formatter.format_record(&record)?;

    Ok(())
}

/// Loads the version catalog named on the command line, or falls back to
/// accepting every version string.
fn load_version_catalog(path: Option<&Path>) -> Result<Box<dyn VersionCatalog>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open version file '{}'", path.display()))?;
            let entries: Vec<VersionEntry> = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid version file '{}'", path.display()))?;
            let catalog: MemoryVersionCatalog = entries
                .into_iter()
                .map(|entry| (entry.application, entry.version))
                .collect();
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(AnyVersion)),
    }
}
