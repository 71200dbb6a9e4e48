//! install.rdf manifest parsing.
//!
//! The manifest is an RDF/XML document. [`graph`] loads it into a minimal
//! in-memory triple store, [`extract`] walks that store into a typed
//! [`ManifestRecord`].

pub mod extract;
pub mod graph;
pub mod record;

pub use extract::extract;
pub use graph::ManifestGraph;
pub use graph::Node;
pub use record::AddonType;
pub use record::ManifestRecord;
pub use record::TargetApplication;
