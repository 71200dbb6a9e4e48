//! Typed add-on metadata recovered from a manifest.

use std::fmt;

use crate::apps::AppDescriptor;
use crate::catalog::VersionRecord;

/// The closed set of add-on types a manifest can declare.
///
/// Manifests carry a numeric type code; anything outside the known codes
/// falls back to `Extension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddonType {
    /// A regular extension (code `"2"`), also the fallback.
    #[default]
    Extension,
    /// A theme (code `"4"`).
    Theme,
    /// A language pack (code `"8"`).
    LanguagePack,
}

impl AddonType {
    /// Maps a raw manifest type code to an `AddonType`.
    ///
    /// Unrecognized and absent codes default to `Extension`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpimport_core::AddonType;
    ///
    /// assert_eq!(AddonType::from_code(Some("4")), AddonType::Theme);
    /// assert_eq!(AddonType::from_code(Some("99")), AddonType::Extension);
    /// assert_eq!(AddonType::from_code(None), AddonType::Extension);
    /// ```
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("4") => Self::Theme,
            Some("8") => Self::LanguagePack,
            _ => Self::Extension,
        }
    }

    /// The manifest code for this type.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Extension => "2",
            Self::Theme => "4",
            Self::LanguagePack => "8",
        }
    }
}

impl fmt::Display for AddonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extension => "extension",
            Self::Theme => "theme",
            Self::LanguagePack => "language pack",
        };
        write!(f, "{name}")
    }
}

/// One resolved target-application compatibility declaration.
///
/// Built only during manifest extraction and never mutated afterwards:
/// the application is a row of the fixed known-applications table and the
/// version bounds are catalog records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetApplication {
    /// The host application this block targets.
    pub application: &'static AppDescriptor,
    /// Resolved minimum supported version.
    pub min: VersionRecord,
    /// Resolved maximum supported version.
    pub max: VersionRecord,
}

/// Structured metadata recovered from an install.rdf manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    /// Declared identifier (GUID form). Empty when the manifest carries
    /// no `em:id`; validity is judged downstream, not here.
    pub guid: String,
    /// Declared add-on type, defaulted when unrecognized.
    pub addon_type: AddonType,
    /// Declared display name.
    pub name: Option<String>,
    /// Declared version string.
    pub version: Option<String>,
    /// Declared homepage URL.
    pub homepage: Option<String>,
    /// Declared description.
    pub description: Option<String>,
    /// Resolved target applications, in manifest enumeration order.
    pub apps: Vec<TargetApplication>,
}

impl ManifestRecord {
    /// Returns `true` if the record carries a usable identifier.
    ///
    /// Downstream validation treats a record without one as invalid; the
    /// extractor itself never fails on a missing `em:id`.
    #[must_use]
    pub fn has_identifier(&self) -> bool {
        !self.guid.is_empty()
    }
}
