//! Cross-file symbol resolution.
//!
//! Follows imports, re-exports and `export *` chains between loaded files.
//! Every walk carries a visited set, so import cycles end with no result
//! instead of recursing forever.

use std::collections::HashSet;

use super::{DeclNode, Declaration, ExportStmt, FileSymbols, ImportBinding};
use crate::core::project::{FileId, Project};

pub struct ProjectIndex<'a> {
    project: &'a Project,
    files: Vec<FileSymbols<'a>>,
}

impl<'a> ProjectIndex<'a> {
    pub fn build(project: &'a Project) -> Self {
        let files = project.files().iter().map(FileSymbols::collect).collect();
        Self { project, files }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn symbols(&self, file: FileId) -> &FileSymbols<'a> {
        &self.files[file]
    }

    /// Exported names of `file` with the declarations behind them, in export
    /// statement order. The first export of a name wins; names that resolve to
    /// nothing are left out.
    pub fn exported_declarations(&self, file: FileId) -> Vec<(&'a str, Vec<Declaration<'a>>)> {
        let mut names = Vec::new();
        self.collect_export_names(file, &mut HashSet::new(), &mut names);

        names
            .into_iter()
            .filter_map(|name| {
                let decls = self.export_lookup(file, name);
                (!decls.is_empty()).then_some((name, decls))
            })
            .collect()
    }

    fn collect_export_names(
        &self,
        file: FileId,
        visited: &mut HashSet<FileId>,
        names: &mut Vec<&'a str>,
    ) {
        if !visited.insert(file) {
            return;
        }
        let top_level = visited.len() == 1;

        for stmt in self.files[file].exports() {
            let name = match *stmt {
                ExportStmt::Declared(name) => name,
                ExportStmt::Local { exported, .. } => exported,
                ExportStmt::From { exported, .. } => exported,
                ExportStmt::All { source } => {
                    if let Some(target) = self.project.resolve_import(file, source) {
                        let mut nested = Vec::new();
                        self.collect_export_names(target, visited, &mut nested);
                        for name in nested {
                            if name != "default" && !names.contains(&name) {
                                names.push(name);
                            }
                        }
                    }
                    continue;
                }
            };
            // `export *` never forwards a default export
            if (top_level || name != "default") && !names.contains(&name) {
                names.push(name);
            }
        }
    }

    /// Declarations exported from `file` under `name`.
    pub fn export_lookup(&self, file: FileId, name: &str) -> Vec<Declaration<'a>> {
        self.lookup_export(file, name, &mut HashSet::new())
    }

    fn lookup_export(
        &self,
        file: FileId,
        name: &str,
        visited: &mut HashSet<(FileId, String)>,
    ) -> Vec<Declaration<'a>> {
        if !visited.insert((file, name.to_string())) {
            return Vec::new();
        }
        let symbols = &self.files[file];

        for stmt in symbols.exports() {
            match *stmt {
                ExportStmt::Declared(declared) if declared == name => {
                    return symbols.local_declarations(name);
                }
                ExportStmt::Local { local, exported } if exported == name => {
                    return self.lookup_name(file, local, visited);
                }
                ExportStmt::From {
                    source,
                    imported,
                    exported,
                } if exported == name => {
                    return match self.project.resolve_import(file, source) {
                        Some(target) => self.lookup_export(target, imported, visited),
                        None => Vec::new(),
                    };
                }
                _ => {}
            }
        }

        if name == "default" {
            return Vec::new();
        }
        for stmt in symbols.exports() {
            if let ExportStmt::All { source } = *stmt
                && let Some(target) = self.project.resolve_import(file, source)
            {
                let found = self.lookup_export(target, name, visited);
                if !found.is_empty() {
                    return found;
                }
            }
        }
        Vec::new()
    }

    /// Declarations a bare name refers to inside `file`: local declarations
    /// first, then whatever an import of that name points at.
    pub fn resolve_name(&self, file: FileId, name: &str) -> Vec<Declaration<'a>> {
        self.lookup_name(file, name, &mut HashSet::new())
    }

    fn lookup_name(
        &self,
        file: FileId,
        name: &str,
        visited: &mut HashSet<(FileId, String)>,
    ) -> Vec<Declaration<'a>> {
        let symbols = &self.files[file];
        let local = symbols.local_declarations(name);
        if !local.is_empty() {
            return local;
        }

        let Some(binding) = symbols.import(name) else {
            return Vec::new();
        };
        let (source, imported) = match binding {
            ImportBinding::Named { source, imported } => (source, imported),
            ImportBinding::Default { source } => (source, "default"),
            ImportBinding::Namespace { .. } => return Vec::new(),
        };
        match self.project.resolve_import(file, source) {
            Some(target) => self.lookup_export(target, imported, visited),
            None => Vec::new(),
        }
    }

    /// Declarations behind a qualified name such as `React.HTMLAttributes`,
    /// where `namespace` is the first segment and `member` the last.
    pub fn resolve_qualified(
        &self,
        file: FileId,
        namespace: &str,
        member: &str,
    ) -> Vec<Declaration<'a>> {
        let symbols = &self.files[file];

        if let Some(binding) = symbols.import(namespace) {
            let source = match binding {
                ImportBinding::Named { source, .. }
                | ImportBinding::Default { source }
                | ImportBinding::Namespace { source } => source,
            };
            let Some(target) = self.project.resolve_import(file, source) else {
                return Vec::new();
            };
            if let ImportBinding::Namespace { .. } = binding {
                return self.export_lookup(target, member);
            }
            // An imported namespace declaration, or a declaration file that
            // exports its namespace with `export =`
            let namespaces = self.resolve_name(file, namespace);
            if let Some(ns) = namespaces
                .iter()
                .find(|d| matches!(d.node, DeclNode::Namespace(_)))
            {
                return self.files[ns.file].local_declarations(member);
            }
            if self.project.file(target).is_declaration_file() {
                return self.export_lookup(target, member);
            }
            return Vec::new();
        }

        let has_local_namespace = symbols
            .local_declarations(namespace)
            .iter()
            .any(|d| matches!(d.node, DeclNode::Namespace(_)));
        if has_local_namespace {
            symbols.local_declarations(member)
        } else {
            Vec::new()
        }
    }
}
