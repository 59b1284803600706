use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{MatchOptions, Pattern, glob};
use walkdir::WalkDir;

use crate::core::utils::{expand_braces, is_glob_pattern, join_root, to_slash};

/// Result of scanning files.
pub struct ScanResult {
    /// Matched files in sorted order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect the source files matched by `includes`, minus `ignore_patterns`.
///
/// Include entries are either glob patterns (with `{a,b}` alternatives) or
/// literal paths. A literal directory, or a glob match that is a directory, is
/// walked recursively for `.ts`/`.tsx` files. Ignore entries are glob patterns
/// matched against the path relative to `base_dir`, or literal path prefixes.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            for expanded in expand_braces(p) {
                match Pattern::new(&expanded) {
                    Ok(pattern) => glob_patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            }
        } else {
            literal_ignore_paths.push(join_root(base_dir, Path::new(p)));
        }
    }

    let is_ignored = |path: &Path| {
        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }
        let relative = to_slash(path.strip_prefix(base_dir).unwrap_or(path));
        glob_patterns
            .iter()
            .any(|p| p.matches_with(&relative, match_options()))
    };

    let mut roots: Vec<PathBuf> = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            for expanded in expand_braces(inc) {
                let full_pattern = to_slash(&join_root(base_dir, Path::new(&expanded)));
                match glob(&full_pattern) {
                    Ok(entries) => {
                        for entry in entries {
                            match entry {
                                Ok(path) => roots.push(path),
                                Err(e) => {
                                    skipped_count += 1;
                                    if verbose {
                                        eprintln!(
                                            "{} Cannot access path: {}",
                                            "warning:".bold().yellow(),
                                            e
                                        );
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid glob pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            }
        } else {
            let path = join_root(base_dir, Path::new(inc));
            if path.exists() {
                roots.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }

    for root in roots {
        if root.is_file() {
            if is_scannable_file(&root) && !is_ignored(&root) {
                files.insert(root);
            }
            continue;
        }

        for entry in WalkDir::new(&root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_scannable_file(path) && !is_ignored(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts")
    )
}
