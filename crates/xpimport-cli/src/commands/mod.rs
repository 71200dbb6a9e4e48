//! Command implementations.

pub mod extract;
pub mod inspect;
