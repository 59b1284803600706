//! Source project loader.
//!
//! Builds the in-memory model of every file the generator needs:
//! - component files matched by the configured include patterns,
//! - auxiliary files reachable through their imports (local modules outside
//!   the component glob, and declaration files of installed packages), so
//!   props types declared elsewhere can be resolved.
//!
//! Only component files are scanned for components. A parse failure in a
//! component file aborts the load; auxiliary files that fail to parse are
//! skipped.

pub mod package;
pub mod resolve;

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;
use swc_ecma_ast::{Module, ModuleDecl, ModuleItem};

use crate::core::parsers::tsx::{ParsedSource, parse_source};
use crate::core::utils::display_relative;
use resolve::{ModuleResolver, is_relative_specifier};

pub type FileId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Matched by the include patterns; scanned for components.
    Component,
    /// Loaded only to resolve types referenced from component files.
    Auxiliary,
}

pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    pub role: FileRole,
    pub parsed: ParsedSource,
}

impl SourceFile {
    /// Ambient declaration file (`.d.ts`): every declaration counts as exported.
    pub fn is_declaration_file(&self) -> bool {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts")
    }
}

/// An import specifier that could not be mapped to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedImport {
    pub file: FileId,
    pub specifier: String,
}

pub struct Project {
    pub root: PathBuf,
    files: Vec<SourceFile>,
    by_path: HashMap<PathBuf, FileId>,
    imports: HashMap<(FileId, String), FileId>,
    pub unresolved: Vec<UnresolvedImport>,
    pub skipped_auxiliary: Vec<PathBuf>,
}

impl Project {
    /// Parse the component files, then follow their imports to load
    /// auxiliary files until no new file is reachable.
    pub fn load(
        root: &Path,
        component_paths: &[PathBuf],
        resolver: &ModuleResolver,
        verbose: bool,
    ) -> Result<Self> {
        let source_map = Arc::new(SourceMap::default());
        let mut project = Project {
            root: root.to_path_buf(),
            files: Vec::new(),
            by_path: HashMap::new(),
            imports: HashMap::new(),
            unresolved: Vec::new(),
            skipped_auxiliary: Vec::new(),
        };

        let parsed = component_paths
            .par_iter()
            .map(|path| read_and_parse(path, source_map.clone()))
            .collect::<Result<Vec<_>>>()?;
        for (path, parsed) in component_paths.iter().zip(parsed) {
            project.push(path.clone(), FileRole::Component, parsed);
        }

        let mut failed: HashSet<PathBuf> = HashSet::new();
        let mut frontier: Vec<FileId> = (0..project.files.len()).collect();

        while !frontier.is_empty() {
            let mut pending: Vec<PathBuf> = Vec::new();
            let mut links: Vec<(FileId, String, PathBuf)> = Vec::new();
            let mut unresolved: Vec<UnresolvedImport> = Vec::new();

            for &id in &frontier {
                let file = &project.files[id];
                let in_package = is_package_path(&file.path);
                for specifier in module_specifiers(&file.parsed.module) {
                    // Packages pull in their own relative files only
                    if in_package && !is_relative_specifier(specifier) {
                        continue;
                    }
                    match resolver.resolve(&file.path, specifier)? {
                        Some(target) => {
                            if !project.by_path.contains_key(&target)
                                && !failed.contains(&target)
                                && !pending.contains(&target)
                            {
                                pending.push(target.clone());
                            }
                            links.push((id, specifier.to_string(), target));
                        }
                        None => unresolved.push(UnresolvedImport {
                            file: id,
                            specifier: specifier.to_string(),
                        }),
                    }
                }
            }

            let results: Vec<(PathBuf, Result<ParsedSource>)> = pending
                .into_par_iter()
                .map(|path| {
                    let parsed = read_and_parse(&path, source_map.clone());
                    (path, parsed)
                })
                .collect();

            let mut next = Vec::new();
            for (path, result) in results {
                match result {
                    Ok(parsed) => next.push(project.push(path, FileRole::Auxiliary, parsed)),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Skipping {}: {:#}",
                                "warning:".bold().yellow(),
                                display_relative(&path, root),
                                e
                            );
                        }
                        project.skipped_auxiliary.push(path.clone());
                        failed.insert(path);
                    }
                }
            }

            for (from, specifier, target) in links {
                if let Some(&id) = project.by_path.get(&target) {
                    project.imports.insert((from, specifier), id);
                }
            }
            project.unresolved.extend(unresolved);
            frontier = next;
        }

        Ok(project)
    }

    fn push(&mut self, path: PathBuf, role: FileRole, parsed: ParsedSource) -> FileId {
        let id = self.files.len();
        self.by_path.insert(path.clone(), id);
        self.files.push(SourceFile {
            id,
            path,
            role,
            parsed,
        });
        id
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id]
    }

    /// Component files in enumeration (sorted path) order.
    pub fn component_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files
            .iter()
            .filter(|file| file.role == FileRole::Component)
    }

    /// The file an import specifier in `from` refers to, if it was loaded.
    pub fn resolve_import(&self, from: FileId, specifier: &str) -> Option<FileId> {
        self.imports.get(&(from, specifier.to_string())).copied()
    }

    /// Path of a file relative to the project root, for display.
    pub fn display_path(&self, id: FileId) -> String {
        display_relative(&self.files[id].path, &self.root)
    }
}

fn read_and_parse(path: &Path, source_map: Arc<SourceMap>) -> Result<ParsedSource> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_source(code, path, source_map)
}

fn is_package_path(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == "node_modules")
}

/// Module specifiers of `import`/`export ... from` statements, in source order.
pub fn module_specifiers(module: &Module) -> Vec<&str> {
    let mut specifiers = Vec::new();
    for item in &module.body {
        let ModuleItem::ModuleDecl(decl) = item else {
            continue;
        };
        let src = match decl {
            ModuleDecl::Import(import) => Some(&import.src),
            ModuleDecl::ExportNamed(named) => named.src.as_ref(),
            ModuleDecl::ExportAll(all) => Some(&all.src),
            _ => None,
        };
        if let Some(value) = src.and_then(|s| s.value.as_str())
            && !specifiers.contains(&value)
        {
            specifiers.push(value);
        }
    }
    specifiers
}
