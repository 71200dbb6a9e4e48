//! Error conversion utilities for CLI.
//!
//! Converts xpimport-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use xpimport_core::ImportError;
use xpimport_core::ValidationError;

/// Converts `ImportError` to user-friendly anyhow error with context
pub fn convert_import_error(err: ImportError, xpi: &Path) -> anyhow::Error {
    match err {
        ImportError::UnsafePath { path } => {
            anyhow!(
                "Security violation: Package '{}' attempted path traversal with '{}'\n\
                 HINT: This package may be malicious. Do not import from untrusted sources.",
                xpi.display(),
                path.display()
            )
        }
        ImportError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid package '{}': {reason}\n\
                 HINT: XPI packages are ZIP containers; the file may be corrupted.",
                xpi.display()
            )
        }
        ImportError::ManifestParse(reason) => {
            anyhow!(
                "Manifest error in '{}': {reason}\n\
                 HINT: A valid package carries an RDF/XML install.rdf at its top level.",
                xpi.display()
            )
        }
        ImportError::RootNotFound => {
            anyhow!(
                "Manifest error in '{}': no install-manifest root found\n\
                 HINT: install.rdf must describe the urn:mozilla:install-manifest resource.",
                xpi.display()
            )
        }
        ImportError::Validation(validation) => convert_validation_error(&validation, xpi),
        ImportError::Io(io_err) => {
            anyhow!("I/O error while processing '{}': {io_err}", xpi.display())
        }
    }
}

fn convert_validation_error(err: &ValidationError, xpi: &Path) -> anyhow::Error {
    match err {
        ValidationError::DuplicateIdentifier { guid } => {
            anyhow!(
                "Validation failed for '{}': an add-on with id {guid} already exists\n\
                 HINT: Use the update path to replace an existing add-on.",
                xpi.display()
            )
        }
        ValidationError::IdentifierMismatch { expected, found } => {
            anyhow!(
                "Validation failed for '{}': manifest id {found} does not match the \
                 existing record {expected}",
                xpi.display()
            )
        }
        ValidationError::TypeMismatch { expected, found } => {
            anyhow!(
                "Validation failed for '{}': package is a {found}, existing record is a \
                 {expected}",
                xpi.display()
            )
        }
    }
}

/// Adds context to a fallible core operation on an XPI file
pub fn add_xpi_context<T>(result: Result<T, ImportError>, xpi: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_import_error(e, xpi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_unsafe_path_error() {
        let err = ImportError::UnsafePath {
            path: PathBuf::from("../../../etc/passwd"),
        };
        let converted = convert_import_error(err, Path::new("malicious.xpi"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("path traversal"));
        assert!(msg.contains("malicious.xpi"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_manifest_parse_error() {
        let err = ImportError::ManifestParse("unexpected end of document".to_owned());
        let converted = convert_import_error(err, Path::new("broken.xpi"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("install.rdf"));
        assert!(msg.contains("unexpected end of document"));
    }

    #[test]
    fn test_convert_duplicate_identifier() {
        let err = ImportError::Validation(ValidationError::DuplicateIdentifier {
            guid: "{abc-123}".to_owned(),
        });
        let converted = convert_import_error(err, Path::new("dup.xpi"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("{abc-123}"));
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ImportError::Io(io_err);
        let converted = convert_import_error(err, Path::new("missing.xpi"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }
}
