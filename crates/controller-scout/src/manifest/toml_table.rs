//! TOML registration tables (`[[types]]` arrays).

use std::path::Path;

use super::{ManifestError, RegistrationTable, TableParser, has_extension};

pub struct TomlTableParser;

impl TableParser for TomlTableParser {
    fn supports(path: &Path) -> bool {
        has_extension(path, &["toml"])
    }

    fn parse(content: &str, path: &Path) -> Result<RegistrationTable, ManifestError> {
        toml::from_str(content).map_err(|source| ManifestError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}
