//! Controller discovery for attribute-routed HTTP frameworks.
//!
//! [`ControllerResolver`] walks a source tree, sniffs one qualified type name
//! per source file without loading it, and keeps the names whose metadata
//! shows a controller marker on the type or a route marker on a method.
//! Metadata comes from any [`MetadataFacility`]; [`TypeRegistry`] is the
//! in-process implementation, filled from code or from registration tables
//! loaded by [`manifest`].

pub mod config;
pub mod extract;
pub mod manifest;
pub mod metadata;
pub mod model;
pub mod registry;
pub mod resolver;

pub use extract::extract_qualified_name;
pub use metadata::{MetadataError, MetadataFacility, is_controller};
pub use model::{Marker, MarkerKind, NAMESPACE_SEPARATOR, QualifiedName};
pub use registry::{MethodDescriptor, TypeDescriptor, TypeLoader, TypeRegistry};
pub use resolver::{ControllerResolver, ResolveControllers, ResolveError, ResolverSettings};
