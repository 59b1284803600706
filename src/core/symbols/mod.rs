//! Per-file symbol tables.
//!
//! `FileSymbols` records what a module declares, imports and exports without
//! following anything across files. Cross-file lookups live in
//! [`exports::ProjectIndex`].

pub mod exports;

pub use exports::ProjectIndex;

use std::collections::HashMap;

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    Class, Decl, DefaultDecl, ExportSpecifier, Expr, Function, ImportSpecifier, ModuleDecl, ModuleExportName,
    ModuleItem, Pat, Stmt, TsEnumDecl, TsInterfaceDecl, TsModuleDecl, TsModuleName, TsNamespaceBody,
    TsTypeAliasDecl, VarDeclarator,
};

use crate::core::project::{FileId, SourceFile};

/// The syntax node behind a declaration.
#[derive(Clone, Copy)]
pub enum DeclNode<'a> {
    Function(&'a Function),
    Variable(&'a VarDeclarator),
    Class(&'a Class),
    Interface(&'a TsInterfaceDecl),
    TypeAlias(&'a TsTypeAliasDecl),
    Enum(&'a TsEnumDecl),
    Namespace(&'a TsModuleDecl),
}

impl DeclNode<'_> {
    /// Declarations that introduce a type name.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            DeclNode::Class(_) | DeclNode::Interface(_) | DeclNode::TypeAlias(_) | DeclNode::Enum(_)
        )
    }
}

#[derive(Clone, Copy)]
pub struct Declaration<'a> {
    pub file: FileId,
    pub name: &'a str,
    pub node: DeclNode<'a>,
    /// Start of the statement whose leading comments document this declaration.
    pub doc_pos: BytePos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportBinding<'a> {
    /// `import { imported as local } from "source"`
    Named { source: &'a str, imported: &'a str },
    /// `import local from "source"`
    Default { source: &'a str },
    /// `import * as local from "source"`
    Namespace { source: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStmt<'a> {
    /// `export <declaration>`, or any declaration of an ambient declaration file.
    Declared(&'a str),
    /// `export { local as exported }`, `export default local`
    Local { local: &'a str, exported: &'a str },
    /// `export { imported as exported } from "source"`
    From {
        source: &'a str,
        imported: &'a str,
        exported: &'a str,
    },
    /// `export * from "source"`
    All { source: &'a str },
}

pub struct FileSymbols<'a> {
    pub file: FileId,
    declarations: Vec<Declaration<'a>>,
    imports: HashMap<&'a str, ImportBinding<'a>>,
    /// Imported (not local) names of named imports, in source order.
    named_imports: Vec<&'a str>,
    exports: Vec<ExportStmt<'a>>,
}

impl<'a> FileSymbols<'a> {
    pub fn collect(file: &'a SourceFile) -> Self {
        let mut symbols = FileSymbols {
            file: file.id,
            declarations: Vec::new(),
            imports: HashMap::new(),
            named_imports: Vec::new(),
            exports: Vec::new(),
        };
        let ambient = file.is_declaration_file();

        for item in &file.parsed.module.body {
            let doc_pos = item.span().lo;
            match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => {
                    let first = symbols.declarations.len();
                    symbols.add_decl(decl, doc_pos);
                    if ambient {
                        symbols.export_declared_from(first);
                    }
                }
                ModuleItem::Stmt(_) => {}
                ModuleItem::ModuleDecl(module_decl) => symbols.add_module_decl(module_decl, doc_pos),
            }
        }

        symbols
    }

    fn add_module_decl(&mut self, module_decl: &'a ModuleDecl, doc_pos: BytePos) {
        match module_decl {
            ModuleDecl::Import(import) => {
                let Some(source) = import.src.value.as_str() else {
                    return;
                };
                for specifier in &import.specifiers {
                    match specifier {
                        ImportSpecifier::Named(named) => {
                            let local: &str = &named.local.sym;
                            let imported = match &named.imported {
                                Some(name) => export_name(name),
                                None => Some(local),
                            };
                            if let Some(imported) = imported {
                                self.imports
                                    .insert(local, ImportBinding::Named { source, imported });
                                self.named_imports.push(imported);
                            }
                        }
                        ImportSpecifier::Default(default) => {
                            self.imports
                                .insert(&default.local.sym, ImportBinding::Default { source });
                        }
                        ImportSpecifier::Namespace(namespace) => {
                            self.imports
                                .insert(&namespace.local.sym, ImportBinding::Namespace { source });
                        }
                    }
                }
            }
            ModuleDecl::ExportDecl(export) => {
                let first = self.declarations.len();
                self.add_decl(&export.decl, doc_pos);
                self.export_declared_from(first);
            }
            ModuleDecl::ExportNamed(named) => {
                let source = named.src.as_ref().and_then(|s| s.value.as_str());
                for specifier in &named.specifiers {
                    let ExportSpecifier::Named(spec) = specifier else {
                        // `export * as ns from` and `export v from` bind no declaration
                        continue;
                    };
                    let Some(orig) = export_name(&spec.orig) else {
                        continue;
                    };
                    let exported = spec.exported.as_ref().and_then(export_name).unwrap_or(orig);
                    self.exports.push(match source {
                        Some(source) => ExportStmt::From {
                            source,
                            imported: orig,
                            exported,
                        },
                        None => ExportStmt::Local {
                            local: orig,
                            exported,
                        },
                    });
                }
            }
            ModuleDecl::ExportAll(all) => {
                if let Some(source) = all.src.value.as_str() {
                    self.exports.push(ExportStmt::All { source });
                }
            }
            ModuleDecl::ExportDefaultDecl(default) => {
                let (ident, node) = match &default.decl {
                    DefaultDecl::Fn(f) => (f.ident.as_ref(), DeclNode::Function(&f.function)),
                    DefaultDecl::Class(c) => (c.ident.as_ref(), DeclNode::Class(&c.class)),
                    DefaultDecl::TsInterfaceDecl(i) => (Some(&i.id), DeclNode::Interface(i)),
                };
                if let Some(ident) = ident {
                    self.push(&ident.sym, node, doc_pos);
                    self.exports.push(ExportStmt::Local {
                        local: &ident.sym,
                        exported: "default",
                    });
                }
            }
            ModuleDecl::ExportDefaultExpr(default) => {
                if let Expr::Ident(ident) = &*default.expr {
                    self.exports.push(ExportStmt::Local {
                        local: &ident.sym,
                        exported: "default",
                    });
                }
            }
            // `export = X` and `export as namespace X` only appear in declaration
            // files, where every declaration is already exported
            _ => {}
        }
    }

    fn add_decl(&mut self, decl: &'a Decl, doc_pos: BytePos) {
        match decl {
            Decl::Fn(f) => self.push(&f.ident.sym, DeclNode::Function(&f.function), doc_pos),
            Decl::Class(c) => self.push(&c.ident.sym, DeclNode::Class(&c.class), doc_pos),
            Decl::Var(var) => {
                for declarator in &var.decls {
                    if let Pat::Ident(binding) = &declarator.name {
                        self.push(&binding.id.sym, DeclNode::Variable(declarator), doc_pos);
                    }
                }
            }
            Decl::TsInterface(i) => self.push(&i.id.sym, DeclNode::Interface(i), doc_pos),
            Decl::TsTypeAlias(t) => self.push(&t.id.sym, DeclNode::TypeAlias(t), doc_pos),
            Decl::TsEnum(e) => self.push(&e.id.sym, DeclNode::Enum(e), doc_pos),
            Decl::TsModule(m) => {
                if let TsModuleName::Ident(id) = &m.id {
                    self.push(&id.sym, DeclNode::Namespace(m), doc_pos);
                }
                if let Some(body) = &m.body {
                    self.add_namespace_body(body);
                }
            }
            Decl::Using(_) => {}
        }
    }

    /// Namespace and `declare module` members are flattened into the file so
    /// qualified names such as `React.HTMLAttributes` resolve by their last segment.
    fn add_namespace_body(&mut self, body: &'a TsNamespaceBody) {
        match body {
            TsNamespaceBody::TsModuleBlock(block) => {
                for item in &block.body {
                    let doc_pos = item.span().lo;
                    match item {
                        ModuleItem::Stmt(Stmt::Decl(decl)) => self.add_decl(decl, doc_pos),
                        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                            self.add_decl(&export.decl, doc_pos)
                        }
                        _ => {}
                    }
                }
            }
            TsNamespaceBody::TsNamespaceDecl(nested) => self.add_namespace_body(&nested.body),
        }
    }

    fn push(&mut self, name: &'a str, node: DeclNode<'a>, doc_pos: BytePos) {
        self.declarations.push(Declaration {
            file: self.file,
            name,
            node,
            doc_pos,
        });
    }

    fn export_declared_from(&mut self, first: usize) {
        for i in first..self.declarations.len() {
            let name = self.declarations[i].name;
            if !self.exports.contains(&ExportStmt::Declared(name)) {
                self.exports.push(ExportStmt::Declared(name));
            }
        }
    }

    /// Every declaration of `name` in this file, in source order.
    pub fn local_declarations(&self, name: &str) -> Vec<Declaration<'a>> {
        self.declarations
            .iter()
            .filter(|d| d.name == name)
            .copied()
            .collect()
    }

    pub fn import(&self, local: &str) -> Option<ImportBinding<'a>> {
        self.imports.get(local).copied()
    }

    pub fn named_imports(&self) -> &[&'a str] {
        &self.named_imports
    }

    pub fn exports(&self) -> &[ExportStmt<'a>] {
        &self.exports
    }
}

fn export_name(name: &ModuleExportName) -> Option<&str> {
    match name {
        ModuleExportName::Ident(ident) => Some(ident.sym.as_str()),
        ModuleExportName::Str(s) => s.value.as_str(),
    }
}
