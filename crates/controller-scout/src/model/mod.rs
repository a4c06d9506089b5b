//! Discovery domain types: qualified names and markers.

pub mod marker;
pub mod name;

pub use marker::*;
pub use name::*;
