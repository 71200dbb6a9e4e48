//! The package import pipeline.
//!
//! Orchestrates a single import attempt: extract the XPI into a scratch
//! directory, parse its manifest, cross-validate against the catalogs, and
//! remove the scratch directory on every exit path.

use std::fs;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use tempfile::TempDir;

use crate::ImportError;
use crate::Result;
use crate::ValidationError;
use crate::catalog::AddonCatalog;
use crate::catalog::ExistingAddon;
use crate::catalog::VersionCatalog;
use crate::extract::extract_xpi;
use crate::extract::open_xpi;
use crate::manifest;
use crate::manifest::ManifestGraph;
use crate::manifest::ManifestRecord;
use crate::types::DestDir;

/// Imports XPI packages against injected version and add-on catalogs.
///
/// Each `import` call is self-contained: it creates its own uniquely named
/// scratch directory under `scratch_root`, so concurrent imports never
/// touch each other's trees. The pipeline holds no mutable state.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use xpimport_core::ImportPipeline;
/// use xpimport_core::catalog::{AnyVersion, NoAddons};
/// use xpimport_core::test_utils;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rdf = test_utils::install_rdf("{abc-123}", "2", "Test", "1.0");
/// let xpi = test_utils::create_test_xpi(vec![("install.rdf", rdf.as_bytes())]);
///
/// let pipeline = ImportPipeline::new(std::env::temp_dir(), &AnyVersion, &NoAddons);
/// let record = pipeline.import(Cursor::new(xpi), None)?;
/// assert_eq!(record.guid, "{abc-123}");
/// # Ok(())
/// # }
/// ```
pub struct ImportPipeline<'a> {
    scratch_root: PathBuf,
    versions: &'a dyn VersionCatalog,
    addons: &'a dyn AddonCatalog,
}

impl<'a> ImportPipeline<'a> {
    /// Creates a pipeline rooted at `scratch_root` for its temporaries.
    pub fn new(
        scratch_root: impl Into<PathBuf>,
        versions: &'a dyn VersionCatalog,
        addons: &'a dyn AddonCatalog,
    ) -> Self {
        Self {
            scratch_root: scratch_root.into(),
            versions,
            addons,
        }
    }

    /// Runs one import attempt.
    ///
    /// Pass `existing` when the XPI updates a known add-on record; the
    /// parsed identifier and type must then match it. Without `existing`,
    /// the parsed identifier must not already exist in the add-on catalog.
    ///
    /// The scratch directory is removed on every exit path, success or
    /// failure.
    ///
    /// # Errors
    ///
    /// - `ImportError::UnsafePath` — an archive entry attempts traversal
    /// - `ImportError::InvalidArchive` — the ZIP container is unreadable
    /// - `ImportError::Io` — filesystem failure
    /// - `ImportError::ManifestParse` — missing or malformed install.rdf
    /// - `ImportError::RootNotFound` — manifest has no resolvable root
    /// - `ImportError::Validation` — identifier or type cross-validation
    ///   failed
    pub fn import<R: Read + Seek>(
        &self,
        xpi: R,
        existing: Option<&ExistingAddon>,
    ) -> Result<ManifestRecord> {
        let scratch = self.scratch_dir()?;
        let result = self.run(xpi, existing, scratch.path());

        // TempDir::drop removes the scratch tree on the failure paths;
        // close() surfaces removal errors on success.
        match result {
            Ok(record) => {
                scratch.close()?;
                Ok(record)
            }
            Err(err) => Err(err),
        }
    }

    fn run<R: Read + Seek>(
        &self,
        xpi: R,
        existing: Option<&ExistingAddon>,
        scratch: &Path,
    ) -> Result<ManifestRecord> {
        let mut archive = open_xpi(xpi)?;
        let dest = DestDir::new(scratch)?;
        extract_xpi(&mut archive, &dest)?;

        let document = read_manifest(scratch)?;
        let graph = ManifestGraph::load(&document)?;
        let record = manifest::extract(&graph, self.versions)?;

        self.validate(&record, existing)?;
        Ok(record)
    }

    /// Cross-validation, short-circuiting on the first failure.
    fn validate(&self, record: &ManifestRecord, existing: Option<&ExistingAddon>) -> Result<()> {
        if let Some(existing) = existing {
            if existing.guid != record.guid {
                return Err(ValidationError::IdentifierMismatch {
                    expected: existing.guid.clone(),
                    found: record.guid.clone(),
                }
                .into());
            }
        } else if self.addons.exists(&record.guid) {
            return Err(ValidationError::DuplicateIdentifier {
                guid: record.guid.clone(),
            }
            .into());
        }

        if let Some(existing) = existing {
            if existing.addon_type != record.addon_type {
                return Err(ValidationError::TypeMismatch {
                    expected: existing.addon_type,
                    found: record.addon_type,
                }
                .into());
            }
        }

        Ok(())
    }

    /// Creates a uniquely named scratch directory under the configured
    /// root. The prefix carries a timestamp, tempfile adds the
    /// disambiguator, so concurrent imports cannot collide.
    fn scratch_dir(&self) -> Result<TempDir> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        tempfile::Builder::new()
            .prefix(&format!("xpi-{stamp}-"))
            .tempdir_in(&self.scratch_root)
            .map_err(ImportError::Io)
    }
}

fn read_manifest(scratch: &Path) -> Result<Vec<u8>> {
    let path = scratch.join("install.rdf");
    fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::ManifestParse("package has no install.rdf at its top level".to_owned())
        } else {
            ImportError::Io(e)
        }
    })
}
