//! Validated and normalized archive entry names.

use crate::ImportError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// A sanitized archive entry name, safe to join onto a destination directory.
///
/// Entry names come straight out of the ZIP central directory and are
/// untrusted: they may contain `..` segments, leading separators, drive
/// prefixes or NUL bytes. An `EntryName` can only be obtained through
/// [`EntryName::sanitize`], which rejects all of those and normalizes the
/// remainder into a platform-relative path.
///
/// The normalization is purely textual. It never touches the filesystem and
/// does not resolve symlinks; its job is a deterministic, platform-correct
/// relative path, not a second security check.
///
/// # Examples
///
/// ```
/// use xpimport_core::types::EntryName;
///
/// let name = EntryName::sanitize("chrome/./content/overlay.js").unwrap();
/// assert_eq!(name.as_path(), std::path::Path::new("chrome/content/overlay.js"));
///
/// assert!(EntryName::sanitize("../../../etc/passwd").is_err());
/// assert!(EntryName::sanitize("/etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName(PathBuf);

impl EntryName {
    /// Checks a stored entry name without constructing an `EntryName`.
    ///
    /// This is the pre-check run across every name in an archive before any
    /// extraction side effect occurs: a single malicious entry rejects the
    /// whole archive up front.
    ///
    /// Rejected names:
    /// - containing a NUL byte
    /// - beginning with `/` or `\`
    /// - carrying a drive prefix (`C:`)
    /// - containing a `..` segment (split on either separator)
    ///
    /// # Errors
    ///
    /// Returns `ImportError::UnsafePath` carrying the offending name.
    pub fn check(raw: &str) -> Result<()> {
        if raw.contains('\0') {
            return Err(unsafe_path(raw));
        }
        if raw.starts_with('/') || raw.starts_with('\\') {
            return Err(unsafe_path(raw));
        }
        let bytes = raw.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
            return Err(unsafe_path(raw));
        }
        if raw.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(unsafe_path(raw));
        }
        Ok(())
    }

    /// Validates and normalizes a stored entry name.
    ///
    /// Runs [`EntryName::check`], then rebuilds the name as a relative
    /// `PathBuf`: separators become platform-native, `.` segments and empty
    /// segments (doubled or trailing separators) are dropped. A name that is
    /// empty after normalization is rejected — it would address the
    /// destination directory itself.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::UnsafePath` for any name `check` rejects or
    /// that normalizes to nothing.
    pub fn sanitize(raw: &str) -> Result<Self> {
        Self::check(raw)?;

        let mut normalized = PathBuf::new();
        for segment in raw.split(['/', '\\']) {
            if segment.is_empty() || segment == "." {
                continue;
            }
            normalized.push(segment);
        }

        if normalized.as_os_str().is_empty() {
            return Err(unsafe_path(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized name as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn unsafe_path(raw: &str) -> ImportError {
    ImportError::UnsafePath {
        path: PathBuf::from(raw),
    }
}
