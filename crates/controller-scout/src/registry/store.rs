//! In-process type registry backing the metadata facility.
//!
//! The registry is append-only: a name, once registered, keeps its first
//! descriptor for the registry's lifetime. [`TypeRegistry::global`] is the
//! process-wide instance. When a loader is attached, resolving an unknown
//! name asks the loader and appends whatever it returns, so a lookup may
//! grow the registry as a side effect.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::types::TypeDescriptor;
use crate::metadata::{MetadataError, MetadataFacility};
use crate::model::{Marker, QualifiedName};

/// Outcome of asking a loader for a name: `Ok(None)` means "not mine".
pub type LoadResult = Result<Option<TypeDescriptor>, MetadataError>;

/// On-miss source of type descriptors (an autoloader).
pub trait TypeLoader: Send + Sync {
    fn load(&self, name: &QualifiedName) -> LoadResult;
}

impl<F> TypeLoader for F
where
    F: Fn(&QualifiedName) -> LoadResult + Send + Sync,
{
    fn load(&self, name: &QualifiedName) -> LoadResult {
        self(name)
    }
}

static GLOBAL: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::new);

#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<BTreeMap<QualifiedName, Arc<TypeDescriptor>>>,
    loader: Option<Box<dyn TypeLoader>>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len().unwrap_or(0))
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(loader: impl TypeLoader + 'static) -> Self {
        Self {
            types: RwLock::default(),
            loader: Some(Box::new(loader)),
        }
    }

    /// Process-wide registry shared by every resolver that opts into it.
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    /// Append a descriptor. Returns `false` if the name was already taken.
    pub fn register(&self, descriptor: TypeDescriptor) -> Result<bool, MetadataError> {
        let mut types = self.types.write().map_err(|_| MetadataError::Poisoned)?;
        if types.contains_key(&descriptor.name) {
            tracing::debug!("type {} already registered; keeping first", descriptor.name);
            return Ok(false);
        }
        types.insert(descriptor.name.clone(), Arc::new(descriptor));
        Ok(true)
    }

    /// Append many descriptors, returning how many were new.
    pub fn extend(
        &self,
        descriptors: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Result<usize, MetadataError> {
        let mut added = 0;
        for d in descriptors {
            if self.register(d)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> Result<usize, MetadataError> {
        Ok(self.types.read().map_err(|_| MetadataError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, MetadataError> {
        Ok(self.len()? == 0)
    }

    fn lookup(&self, name: &QualifiedName) -> Result<Option<Arc<TypeDescriptor>>, MetadataError> {
        let types = self.types.read().map_err(|_| MetadataError::Poisoned)?;
        Ok(types.get(name).cloned())
    }
}

impl MetadataFacility for TypeRegistry {
    type Type = Arc<TypeDescriptor>;

    fn resolve_type(&self, name: &QualifiedName) -> Result<Option<Self::Type>, MetadataError> {
        if let Some(found) = self.lookup(name)? {
            return Ok(Some(found));
        }
        let Some(loader) = self.loader.as_ref() else {
            return Ok(None);
        };
        let Some(descriptor) = loader.load(name)? else {
            return Ok(None);
        };
        if descriptor.name != *name {
            tracing::warn!(
                "loader returned {} when asked for {}; ignoring",
                descriptor.name,
                name
            );
            return Ok(None);
        }
        tracing::debug!("loaded type {} on demand", name);
        self.register(descriptor)?;
        self.lookup(name)
    }

    fn type_markers(&self, ty: &Self::Type) -> Result<Vec<Marker>, MetadataError> {
        Ok(ty.markers.clone())
    }

    fn method_markers(
        &self,
        ty: &Self::Type,
    ) -> Result<BTreeMap<String, Vec<Marker>>, MetadataError> {
        let mut out: BTreeMap<String, Vec<Marker>> = BTreeMap::new();
        for m in &ty.methods {
            out.entry(m.name.clone())
                .or_default()
                .extend(m.markers.iter().cloned());
        }
        Ok(out)
    }
}
