//! Safe XPI extraction and install.rdf manifest parsing.
//!
//! `xpimport-core` imports add-on packages (XPI files — ZIP containers) by
//! extracting them into a scratch directory with path-traversal protection,
//! then walking the `install.rdf` triple graph to recover a typed
//! [`ManifestRecord`]: identifier, type, name, version and the supported
//! host-application version ranges.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use xpimport_core::ImportPipeline;
//! use xpimport_core::catalog::{AnyVersion, NoAddons};
//! use xpimport_core::test_utils;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rdf = test_utils::install_rdf("{7a2b1c3d-0000-4000-8000-123456789abc}", "2", "Example", "1.0");
//! let xpi = test_utils::create_test_xpi(vec![("install.rdf", rdf.as_bytes())]);
//!
//! let pipeline = ImportPipeline::new(std::env::temp_dir(), &AnyVersion, &NoAddons);
//! let record = pipeline.import(Cursor::new(xpi), None)?;
//! assert_eq!(record.name.as_deref(), Some("Example"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod apps;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod pipeline;
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use error::ImportError;
pub use error::Result;
pub use error::ValidationError;
pub use extract::extract_xpi;
pub use extract::open_xpi;
pub use manifest::AddonType;
pub use manifest::ManifestGraph;
pub use manifest::ManifestRecord;
pub use manifest::TargetApplication;
pub use pipeline::ImportPipeline;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::EntryName;
