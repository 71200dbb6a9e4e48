//! Test utilities for building in-memory XPI packages and manifests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fmt::Write as _;
use std::io::Cursor;
use std::io::Write;

/// Creates an in-memory XPI from a list of `(path, content)` entries.
///
/// Files are stored uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use xpimport_core::test_utils::create_test_xpi;
///
/// let xpi = create_test_xpi(vec![("install.rdf", b"<RDF/>".as_slice())]);
/// assert!(xpi.starts_with(b"PK"));
/// ```
#[must_use]
pub fn create_test_xpi(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut builder = XpiBuilder::new();
    for (path, data) in entries {
        builder = builder.add_file(path, data);
    }
    builder.build()
}

/// Builder for XPI test packages with file and directory entries.
///
/// Entry names are written exactly as given, including names a real
/// extractor must reject — that is the point for security tests.
///
/// # Examples
///
/// ```
/// use xpimport_core::test_utils::XpiBuilder;
///
/// let xpi = XpiBuilder::new()
///     .add_directory("chrome/")
///     .add_file("chrome/chrome.manifest", b"content chrome/")
///     .build();
/// ```
pub struct XpiBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl XpiBuilder {
    /// Creates a new XPI builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file entry.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default();
        self.zip.add_directory(path.trim_end_matches('/'), options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for XpiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a minimal install.rdf with the four scalar fields.
#[must_use]
pub fn install_rdf(id: &str, type_code: &str, name: &str, version: &str) -> String {
    install_rdf_with_apps(id, type_code, name, version, &[])
}

/// Renders an install.rdf with target-application blocks.
///
/// Each app is a `(guid, min_version, max_version)` triple.
#[must_use]
pub fn install_rdf_with_apps(
    id: &str,
    type_code: &str,
    name: &str,
    version: &str,
    target_apps: &[(&str, &str, &str)],
) -> String {
    let mut blocks = String::new();
    for (guid, min, max) in target_apps {
        write!(
            blocks,
            r"
    <em:targetApplication>
      <Description>
        <em:id>{guid}</em:id>
        <em:minVersion>{min}</em:minVersion>
        <em:maxVersion>{max}</em:maxVersion>
      </Description>
    </em:targetApplication>"
        )
        .unwrap();
    }

    format!(
        r#"<?xml version="1.0"?>
<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest">
    <em:id>{id}</em:id>
    <em:type>{type_code}</em:type>
    <em:name>{name}</em:name>
    <em:version>{version}</em:version>{blocks}
  </Description>
</RDF>
"#
    )
}
