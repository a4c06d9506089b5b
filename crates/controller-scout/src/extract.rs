//! Lightweight qualified-name sniffing over raw source bytes.
//!
//! This is a lexical scan, not a parser: it finds the first namespace
//! declaration and the first `class` declaration and composes them. Files are
//! never executed or loaded. Only the first declared type is reported, so a
//! file declaring several controllers contributes a single name. Matching
//! runs over bytes, so a stray non-UTF-8 byte elsewhere in the file does not
//! hide the declaration.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::model::QualifiedName;

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"namespace\s+(.+?);").expect("namespace pattern is valid"));
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+(\w+)").expect("class pattern is valid"));

/// Derive a qualified name from file contents, or `None` when no type
/// declaration is found. Captures are decoded lossily.
pub fn extract_qualified_name(contents: impl AsRef<[u8]>) -> Option<QualifiedName> {
    let contents = contents.as_ref();
    let name = CLASS_RE
        .captures(contents)
        .and_then(|c| c.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())?;
    let namespace = NAMESPACE_RE
        .captures(contents)
        .and_then(|c| c.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).trim_end().to_string())
        .unwrap_or_default();
    Some(QualifiedName::new(namespace, name))
}
