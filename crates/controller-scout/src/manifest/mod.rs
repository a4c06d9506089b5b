//! Registration-table loaders.
//!
//! A registration table lists types with their markers and is usually
//! generated at build time. Each format declares a `supports` predicate over
//! file paths and a `parse` function returning a normalized
//! [`RegistrationTable`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataError;
use crate::registry::{TypeDescriptor, TypeRegistry};

pub mod json_table;
pub mod toml_table;
pub mod yaml_table;

use json_table::JsonTableParser;
use toml_table::TomlTableParser;
use yaml_table::YamlTableParser;

/// Parsed registration table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationTable {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read registration table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML registration table {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid YAML registration table {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON registration table {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported registration table format: {0}")]
    Unsupported(PathBuf),
    #[error(transparent)]
    Registry(#[from] MetadataError),
}

/// Parser trait implemented by each table format.
pub trait TableParser {
    fn supports(path: &Path) -> bool;
    fn parse(content: &str, path: &Path) -> Result<RegistrationTable, ManifestError>;
}

pub(crate) fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| exts.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Read and parse a registration table, picking the format by extension.
pub fn load_table(path: &Path) -> Result<RegistrationTable, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if TomlTableParser::supports(path) {
        TomlTableParser::parse(&content, path)
    } else if YamlTableParser::supports(path) {
        YamlTableParser::parse(&content, path)
    } else if JsonTableParser::supports(path) {
        JsonTableParser::parse(&content, path)
    } else {
        Err(ManifestError::Unsupported(path.to_path_buf()))
    }
}

/// Load a table and append its types to `registry`. Returns the number of
/// newly registered types.
pub fn load_into(registry: &TypeRegistry, path: &Path) -> Result<usize, ManifestError> {
    let table = load_table(path)?;
    let total = table.types.len();
    let added = registry.extend(table.types)?;
    tracing::info!(
        "loaded registration table {} (types={}, new={})",
        path.display(),
        total,
        added
    );
    Ok(added)
}
