//! Narrow metadata contract the resolver depends on.
//!
//! Implementations answer three questions: does a type with this name exist,
//! which markers sit on the type, and which markers sit on each of its
//! methods. [`crate::registry::TypeRegistry`] is the in-process
//! implementation; callers may plug in their own (for example a table
//! generated at build time).

use std::collections::BTreeMap;

use crate::model::{Marker, MarkerKind, QualifiedName, has_kind};

/// Failure inside the metadata facility itself. Unknown types are not
/// errors; they resolve to `None`.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("type registry lock poisoned")]
    Poisoned,
    #[error("type loader failed for {name}: {reason}")]
    Loader { name: QualifiedName, reason: String },
}

pub trait MetadataFacility {
    /// Handle to a resolved type.
    type Type;

    fn resolve_type(&self, name: &QualifiedName) -> Result<Option<Self::Type>, MetadataError>;
    fn type_markers(&self, ty: &Self::Type) -> Result<Vec<Marker>, MetadataError>;
    fn method_markers(&self, ty: &Self::Type)
    -> Result<BTreeMap<String, Vec<Marker>>, MetadataError>;
}

/// Controller acceptance: a type-level controller marker, or a route marker
/// on any declared method. Either criterion alone is sufficient.
pub fn is_controller<M: MetadataFacility + ?Sized>(
    metadata: &M,
    ty: &M::Type,
) -> Result<bool, MetadataError> {
    if has_kind(&metadata.type_markers(ty)?, MarkerKind::Controller) {
        return Ok(true);
    }
    let methods = metadata.method_markers(ty)?;
    Ok(methods
        .values()
        .any(|markers| has_kind(markers, MarkerKind::Route)))
}

impl<M: MetadataFacility + ?Sized> MetadataFacility for &M {
    type Type = M::Type;

    fn resolve_type(&self, name: &QualifiedName) -> Result<Option<Self::Type>, MetadataError> {
        (**self).resolve_type(name)
    }

    fn type_markers(&self, ty: &Self::Type) -> Result<Vec<Marker>, MetadataError> {
        (**self).type_markers(ty)
    }

    fn method_markers(
        &self,
        ty: &Self::Type,
    ) -> Result<BTreeMap<String, Vec<Marker>>, MetadataError> {
        (**self).method_markers(ty)
    }
}
