//! Registration records describing a type and its methods.

use serde::{Deserialize, Serialize};

use crate::model::{Marker, QualifiedName};

/// A registered type with its type-level markers and declared methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: QualifiedName,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl TypeDescriptor {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            markers: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_method(mut self, name: &str, markers: Vec<Marker>) -> Self {
        self.methods.push(MethodDescriptor {
            name: name.to_string(),
            markers,
        });
        self
    }
}
