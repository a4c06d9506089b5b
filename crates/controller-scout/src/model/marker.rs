//! Declarative markers attached to types and methods.

use serde::{Deserialize, Serialize};

/// Kind discriminator for a [`Marker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Type-level controller marker.
    Controller,
    /// Method-level route marker.
    Route,
    /// Any annotation the routing framework does not own.
    Other,
}

/// Annotation value as recorded in a registration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    Controller {
        /// Optional route prefix, e.g. `/admin`.
        #[serde(default)]
        prefix: Option<String>,
    },
    Route {
        #[serde(default)]
        name: Option<String>,
        path: String,
        #[serde(default)]
        methods: Vec<String>,
    },
    Other {
        name: String,
    },
}

impl Marker {
    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::Controller { .. } => MarkerKind::Controller,
            Marker::Route { .. } => MarkerKind::Route,
            Marker::Other { .. } => MarkerKind::Other,
        }
    }

    pub fn controller(prefix: Option<&str>) -> Self {
        Marker::Controller {
            prefix: prefix.map(|s| s.to_string()),
        }
    }

    pub fn route(name: Option<&str>, path: &str, methods: &[&str]) -> Self {
        Marker::Route {
            name: name.map(|s| s.to_string()),
            path: path.to_string(),
            methods: methods.iter().map(|m| m.to_ascii_uppercase()).collect(),
        }
    }

    pub fn other(name: &str) -> Self {
        Marker::Other {
            name: name.to_string(),
        }
    }
}

/// True if any marker in `markers` has the given kind.
pub fn has_kind(markers: &[Marker], kind: MarkerKind) -> bool {
    markers.iter().any(|m| m.kind() == kind)
}
