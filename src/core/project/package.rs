use std::{fs, path::Path};

use serde_json::Value;

use crate::config::DEFAULT_IMPORT_PATH;

/// Declared `name` of the host package, if `package.json` exists and is valid.
///
/// A missing file, unreadable file, invalid JSON or a missing/non-string
/// `name` all yield `None`.
pub fn read_package_name(root: &Path) -> Option<String> {
    let content = fs::read_to_string(root.join("package.json")).ok()?;
    let json: Value = serde_json::from_str(&content).ok()?;
    json.get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(String::from)
}

/// Resolve the module path consumers import components from.
///
/// Priority: explicit override (CLI or environment) > config file >
/// `package.json` name > built-in default. Empty overrides are ignored.
pub fn resolve_import_path(
    override_path: Option<&str>,
    config_path: Option<&str>,
    root: &Path,
) -> String {
    override_path
        .filter(|p| !p.is_empty())
        .or(config_path.filter(|p| !p.is_empty()))
        .map(String::from)
        .or_else(|| read_package_name(root))
        .unwrap_or_else(|| DEFAULT_IMPORT_PATH.to_string())
}
