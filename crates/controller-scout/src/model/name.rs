//! Qualified type names: namespace path plus simple name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator placed between the namespace path and the simple name.
pub const NAMESPACE_SEPARATOR: &str = "\\";

/// Fully-qualified identity of a declared type.
///
/// Ordering compares the namespace first, then the simple name, so sets of
/// names iterate in a stable order across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    namespace: String,
    name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// A name declared outside any namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
        }
    }
}

/// Error returned when a rendered name has no simple-name component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid qualified name '{0}'")]
pub struct InvalidQualifiedName(pub String);

impl FromStr for QualifiedName {
    type Err = InvalidQualifiedName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Registration tables often spell a leading separator for global names.
        let trimmed = s.trim().trim_start_matches(NAMESPACE_SEPARATOR);
        let (namespace, name) = match trimmed.rsplit_once(NAMESPACE_SEPARATOR) {
            Some((ns, name)) => (ns, name),
            None => ("", trimmed),
        };
        if name.is_empty() {
            return Err(InvalidQualifiedName(s.to_string()));
        }
        Ok(Self::new(namespace, name))
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
