//! Collaborator traits for the external version and add-on catalogs.
//!
//! The import core never persists anything; it only queries. Both catalogs
//! are injected into the pipeline at construction as trait objects, so the
//! host system decides where the data actually lives. The in-memory
//! implementations here back the CLI and the test suite.

use std::collections::HashSet;

use crate::manifest::AddonType;

/// A known (application, version-string) pair from the version catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// Numeric identifier of the host application.
    pub application: u32,
    /// The version string exactly as catalogued.
    pub version: String,
}

/// Catalog of known host-application versions.
///
/// Manifest min/max version references are resolved against this catalog;
/// a version nobody has recorded makes the declaring target-application
/// block unusable (but never fails the parse).
pub trait VersionCatalog {
    /// Looks up a version string scoped to one application.
    fn lookup(&self, application: u32, version: &str) -> Option<VersionRecord>;
}

/// Catalog of existing add-on records, queried for duplicate identifiers.
pub trait AddonCatalog {
    /// Returns `true` if an add-on with this identifier already exists.
    fn exists(&self, guid: &str) -> bool;
}

/// The existing add-on record an import updates, for cross-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingAddon {
    /// Identifier of the existing record.
    pub guid: String,
    /// Type of the existing record.
    pub addon_type: AddonType,
}

/// A version catalog that accepts every version string.
///
/// Useful when no catalog is available and compatibility blocks should be
/// taken at face value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyVersion;

impl VersionCatalog for AnyVersion {
    fn lookup(&self, application: u32, version: &str) -> Option<VersionRecord> {
        Some(VersionRecord {
            application,
            version: version.to_owned(),
        })
    }
}

/// In-memory version catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryVersionCatalog {
    versions: HashSet<(u32, String)>,
}

impl MemoryVersionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a known version for an application.
    pub fn insert(&mut self, application: u32, version: impl Into<String>) {
        self.versions.insert((application, version.into()));
    }
}

impl FromIterator<(u32, String)> for MemoryVersionCatalog {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

impl VersionCatalog for MemoryVersionCatalog {
    fn lookup(&self, application: u32, version: &str) -> Option<VersionRecord> {
        self.versions
            .contains(&(application, version.to_owned()))
            .then(|| VersionRecord {
                application,
                version: version.to_owned(),
            })
    }
}

/// An add-on catalog with no records at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAddons;

impl AddonCatalog for NoAddons {
    fn exists(&self, _guid: &str) -> bool {
        false
    }
}

/// In-memory add-on catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryAddonCatalog {
    guids: HashSet<String>,
}

impl MemoryAddonCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an existing add-on identifier.
    pub fn insert(&mut self, guid: impl Into<String>) {
        self.guids.insert(guid.into());
    }
}

impl FromIterator<String> for MemoryAddonCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            guids: iter.into_iter().collect(),
        }
    }
}

impl AddonCatalog for MemoryAddonCatalog {
    fn exists(&self, guid: &str) -> bool {
        self.guids.contains(guid)
    }
}
