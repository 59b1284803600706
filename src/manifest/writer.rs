use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::Manifest;

/// Pretty-printed JSON (2-space indentation) with a trailing newline.
pub fn render_manifest(manifest: &Manifest) -> Result<String> {
    let json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    Ok(format!("{}\n", json))
}

/// Write `content` to `path`, creating parent directories.
///
/// The content goes to a sibling temporary file first and is renamed over the
/// target, so readers never observe a partially written manifest.
pub fn write_manifest(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to write file: {}", path.display()));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
