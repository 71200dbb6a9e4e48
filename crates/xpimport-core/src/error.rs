//! Error types for XPI import operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::manifest::AddonType;

/// Result type alias using `ImportError`.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Business-rule violations found while cross-validating a parsed manifest.
///
/// These are expected, user-correctable outcomes of an import attempt, as
/// opposed to the structural failures in [`ImportError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The parsed identifier already exists in the add-on catalog.
    #[error("duplicate add-on identifier: {guid}")]
    DuplicateIdentifier {
        /// The identifier declared by the manifest.
        guid: String,
    },

    /// The parsed identifier differs from the record being updated.
    #[error("identifier mismatch: add-on is {expected}, manifest declares {found}")]
    IdentifierMismatch {
        /// Identifier of the existing add-on record.
        expected: String,
        /// Identifier declared by the manifest.
        found: String,
    },

    /// The parsed add-on type differs from the record being updated.
    #[error("type mismatch: add-on is {expected}, manifest declares {found}")]
    TypeMismatch {
        /// Type of the existing add-on record.
        expected: AddonType,
        /// Type declared by the manifest.
        found: AddonType,
    },
}

/// Errors that can occur during an XPI import attempt.
#[derive(Error, Debug)]
pub enum ImportError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container is corrupted or cannot be read.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive entry name would resolve outside the destination directory.
    #[error("unsafe entry path in archive: {path}")]
    UnsafePath {
        /// The stored entry name that attempted traversal.
        path: PathBuf,
    },

    /// Manifest document is missing or not well-formed RDF/XML.
    #[error("manifest parse error: {0}")]
    ManifestParse(String),

    /// Manifest has no resolvable install-manifest root.
    #[error("manifest has no resolvable install-manifest root")]
    RootNotFound,

    /// Cross-validation against existing records failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ImportError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// Only traversal attempts qualify; a corrupt archive or manifest is
    /// merely invalid input.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use xpimport_core::ImportError;
    ///
    /// let err = ImportError::UnsafePath {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ImportError::RootNotFound;
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::UnsafePath { .. })
    }

    /// Returns `true` if this error is a business-rule validation failure.
    ///
    /// Validation failures are terminal for the import attempt but expected
    /// and correctable by the submitter, unlike structural errors.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the validation failure, if this error is one.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImportError::RootNotFound;
        assert_eq!(
            err.to_string(),
            "manifest has no resolvable install-manifest root"
        );
    }

    #[test]
    fn test_unsafe_path_error() {
        let err = ImportError::UnsafePath {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("unsafe entry path"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_security_violation());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ImportError = io_err.into();
        assert!(matches!(err, ImportError::Io(_)));
        assert!(!err.is_security_violation());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ImportError = ValidationError::DuplicateIdentifier {
            guid: "{abc-123}".into(),
        }
        .into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("{abc-123}"));

        let validation = err.validation();
        assert_eq!(
            validation,
            Some(&ValidationError::DuplicateIdentifier {
                guid: "{abc-123}".into()
            })
        );
    }

    #[test]
    fn test_identifier_mismatch_display() {
        let err = ValidationError::IdentifierMismatch {
            expected: "{aaa}".into(),
            found: "{bbb}".into(),
        };
        let display = err.to_string();
        assert!(display.contains("{aaa}"));
        assert!(display.contains("{bbb}"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ValidationError::TypeMismatch {
            expected: AddonType::Extension,
            found: AddonType::Theme,
        };
        let display = err.to_string();
        assert!(display.contains("extension"));
        assert!(display.contains("theme"));
    }

    #[test]
    fn test_manifest_parse_display() {
        let err = ImportError::ManifestParse("unexpected end of document".into());
        assert!(err.to_string().contains("unexpected end of document"));
        assert!(err.validation().is_none());
    }
}
