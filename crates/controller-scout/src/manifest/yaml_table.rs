//! YAML registration tables.

use std::path::Path;

use super::{ManifestError, RegistrationTable, TableParser, has_extension};

pub struct YamlTableParser;

impl TableParser for YamlTableParser {
    fn supports(path: &Path) -> bool {
        has_extension(path, &["yaml", "yml"])
    }

    fn parse(content: &str, path: &Path) -> Result<RegistrationTable, ManifestError> {
        // An empty document is an empty table rather than a parse error.
        if content.trim().is_empty() {
            return Ok(RegistrationTable::default());
        }
        serde_yaml::from_str(content).map_err(|source| ManifestError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
