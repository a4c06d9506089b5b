//! JSON registration tables.

use std::path::Path;

use super::{ManifestError, RegistrationTable, TableParser, has_extension};

pub struct JsonTableParser;

impl TableParser for JsonTableParser {
    fn supports(path: &Path) -> bool {
        has_extension(path, &["json"])
    }

    fn parse(content: &str, path: &Path) -> Result<RegistrationTable, ManifestError> {
        serde_json::from_str(content).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
