use std::path::{Component, Path, PathBuf};

/// Lexically normalise a path: drop `.` segments and fold `..` into the parent.
/// Does not touch the filesystem, so it also works for files that do not exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Join `path` onto `root`, keeping relative roots like `.` out of the result
/// so user-facing paths stay short (`docs/x.json` rather than `./docs/x.json`).
pub fn join_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let is_cur_dir = root.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        normalize_path(path)
    } else {
        normalize_path(&root.join(path))
    }
}

/// Path rendered with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Path relative to `root` for display, falling back to the full path.
pub fn display_relative(path: &Path, root: &Path) -> String {
    to_slash(path.strip_prefix(root).unwrap_or(path))
}
