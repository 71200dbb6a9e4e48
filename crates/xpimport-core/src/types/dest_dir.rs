//! Validated extraction destination directory.

use crate::ImportError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

use super::EntryName;

/// A validated destination directory for XPI extraction.
///
/// This type represents a directory that has been validated to:
/// - Exist on the filesystem
/// - Be a directory (not a file)
/// - Be writable by the current process
/// - Be represented as an absolute canonical path
///
/// # Security Properties
///
/// Once constructed, a `DestDir` is guaranteed to be a valid, writable
/// directory. The path is canonicalized so entry paths joined onto it can be
/// compared against a stable prefix.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use xpimport_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new(PathBuf::from("/tmp/xpi-scratch"))?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` after validating the path.
    ///
    /// # Validation
    ///
    /// 1. Verifies the path exists
    /// 2. Verifies the path is a directory
    /// 3. Canonicalizes the path to an absolute path
    /// 4. Checks write permissions (Unix only)
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Io` if:
    /// - The path does not exist
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    /// - The directory is not writable (on Unix)
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ImportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("destination directory does not exist: {}", path.display()),
            )));
        }

        if !path.is_dir() {
            return Err(ImportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ImportError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        // Check effective write permissions with access() (Unix only)
        #[cfg(unix)]
        {
            use std::ffi::CString;
            use std::os::unix::ffi::OsStrExt;

            let path_cstring = CString::new(canonical.as_os_str().as_bytes()).map_err(|_| {
                ImportError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path contains null byte",
                ))
            })?;

            // SAFETY: access() is safe to call with a valid C string.
            // The pointer is valid for the duration of the call and the
            // string is not modified.
            #[allow(unsafe_code)]
            let result = unsafe { libc::access(path_cstring.as_ptr(), libc::W_OK) };

            if result != 0 {
                return Err(ImportError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("directory is not writable: {}", canonical.display()),
                )));
            }
        }

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a sanitized entry name to this destination directory.
    ///
    /// This produces the final extraction path for an archive entry. The
    /// result is guaranteed to stay under the destination because
    /// [`EntryName`] is only constructible through sanitization.
    #[inline]
    #[must_use]
    pub fn join(&self, name: &EntryName) -> PathBuf {
        self.0.join(name.as_path())
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
