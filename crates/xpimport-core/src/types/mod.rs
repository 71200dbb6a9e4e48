//! Type-safe wrappers for XPI extraction.
//!
//! This module provides newtypes that enforce path-safety validation at the
//! type level. Both types are validated upon construction and cannot be
//! created from raw values without going through validation.
//!
//! # Design Principles
//!
//! - Type-driven security: invalid states cannot be represented
//! - No `From<RawType>` implementations for security types
//! - All constructors perform validation

pub mod dest_dir;
pub mod entry_name;

pub use dest_dir::DestDir;
pub use entry_name::EntryName;
