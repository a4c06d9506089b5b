//! Type registry: the in-process metadata facility.

pub mod store;
pub mod types;

pub use store::*;
pub use types::*;
