//! Structural member resolution for props types.
//!
//! Computes the property members of an interface or type alias the way the
//! TypeScript checker enumerates them, keeping every declaration site that
//! contributes to a member. Supported shapes:
//! - interfaces with declaration merging and `extends` clauses
//! - type literals, intersections, unions (common members only) and parentheses
//! - references to local, imported and namespace-qualified declarations
//! - the utility types handled in [`builtins`]
//!
//! Anything else (conditional, mapped or indexed types, generic instantiation)
//! contributes no members.

mod builtins;

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    Expr, Lit, MemberProp, TsEntityName, TsInterfaceDecl, TsMethodSignature, TsType,
    TsTypeElement, TsTypeOperatorOp, TsUnionOrIntersectionType,
};

use crate::core::parsers::tsx::ParsedSource;
use crate::core::project::FileId;
use crate::core::symbols::{DeclNode, Declaration, ProjectIndex};

/// Nesting limit for reference chains.
const MAX_DEPTH: usize = 32;

/// One syntactic declaration of a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSite {
    pub file: FileId,
    pub optional: bool,
    /// Declared type as written; `any` when there is no annotation.
    pub type_text: String,
    pub doc_pos: BytePos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub name: String,
    pub sites: Vec<MemberSite>,
}

/// Ordered member list that merges the sites of same-named members.
#[derive(Default)]
struct Shape {
    members: Vec<ResolvedMember>,
}

impl Shape {
    fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    fn merge(&mut self, member: ResolvedMember) {
        match self.members.iter_mut().find(|m| m.name == member.name) {
            Some(existing) => existing.sites.extend(member.sites),
            None => self.members.push(member),
        }
    }

    fn add_site(&mut self, name: String, site: MemberSite) {
        self.merge(ResolvedMember {
            name,
            sites: vec![site],
        });
    }
}

pub struct TypeResolver<'i, 'a> {
    index: &'i ProjectIndex<'a>,
}

/// Declarations currently being expanded, keyed by file and name.
type Stack = Vec<(FileId, String)>;

impl<'i, 'a> TypeResolver<'i, 'a> {
    pub fn new(index: &'i ProjectIndex<'a>) -> Self {
        Self { index }
    }

    /// Members of an interface (merged with its same-named siblings) or a type alias.
    pub fn members_of(&self, decl: &Declaration<'a>) -> Vec<ResolvedMember> {
        self.declaration_members(decl, &mut Vec::new())
    }

    fn parsed(&self, file: FileId) -> &'a ParsedSource {
        &self.index.project().file(file).parsed
    }

    fn declaration_members(&self, decl: &Declaration<'a>, stack: &mut Stack) -> Vec<ResolvedMember> {
        let key = (decl.file, decl.name.to_string());
        if stack.len() >= MAX_DEPTH || stack.contains(&key) {
            return Vec::new();
        }
        stack.push(key);

        let members = match decl.node {
            DeclNode::Interface(_) => self.interface_members(decl.file, decl.name, stack),
            DeclNode::TypeAlias(alias) => self.type_members(&alias.type_ann, decl.file, stack),
            _ => Vec::new(),
        };

        stack.pop();
        members
    }

    /// Own members of every merged declaration first, then inherited members
    /// that are not redeclared.
    fn interface_members(&self, file: FileId, name: &str, stack: &mut Stack) -> Vec<ResolvedMember> {
        let interfaces: Vec<&'a TsInterfaceDecl> = self
            .index
            .symbols(file)
            .local_declarations(name)
            .into_iter()
            .filter_map(|d| match d.node {
                DeclNode::Interface(iface) => Some(iface),
                _ => None,
            })
            .collect();

        let mut shape = Shape::default();
        for iface in &interfaces {
            for element in &iface.body.body {
                if let Some((name, site)) = self.element_member(element, file) {
                    shape.add_site(name, site);
                }
            }
        }

        for iface in &interfaces {
            for heritage in &iface.extends {
                let Some(path) = expr_path(&heritage.expr) else {
                    continue;
                };
                let args = heritage
                    .type_args
                    .as_ref()
                    .map(|a| a.params.as_slice())
                    .unwrap_or_default();
                for member in self.reference_members(&path, args, file, stack) {
                    if !shape.contains(&member.name) {
                        shape.members.push(member);
                    }
                }
            }
        }

        shape.members
    }

    pub(crate) fn type_members(
        &self,
        ty: &'a TsType,
        file: FileId,
        stack: &mut Stack,
    ) -> Vec<ResolvedMember> {
        match ty {
            TsType::TsTypeLit(lit) => {
                let mut shape = Shape::default();
                for element in &lit.members {
                    if let Some((name, site)) = self.element_member(element, file) {
                        shape.add_site(name, site);
                    }
                }
                shape.members
            }
            TsType::TsParenthesizedType(paren) => self.type_members(&paren.type_ann, file, stack),
            TsType::TsTypeOperator(op) if op.op == TsTypeOperatorOp::ReadOnly => {
                self.type_members(&op.type_ann, file, stack)
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => {
                let mut shape = Shape::default();
                for part in &intersection.types {
                    for member in self.type_members(part, file, stack) {
                        shape.merge(member);
                    }
                }
                shape.members
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
                let mut parts = union
                    .types
                    .iter()
                    .map(|part| self.type_members(part, file, stack));
                let Some(first) = parts.next() else {
                    return Vec::new();
                };
                let mut shape = Shape { members: first };
                for part in parts {
                    shape.members.retain(|m| part.iter().any(|p| p.name == m.name));
                    for member in part {
                        if shape.contains(&member.name) {
                            shape.merge(member);
                        }
                    }
                }
                shape.members
            }
            TsType::TsTypeRef(reference) => {
                let path = entity_path(&reference.type_name);
                let args = reference
                    .type_params
                    .as_ref()
                    .map(|a| a.params.as_slice())
                    .unwrap_or_default();
                self.reference_members(&path, args, file, stack)
            }
            _ => Vec::new(),
        }
    }

    /// Members of a named type reference. Utility types apply unless the
    /// referencing file declares the name itself.
    fn reference_members(
        &self,
        path: &[&str],
        args: &'a [Box<TsType>],
        file: FileId,
        stack: &mut Stack,
    ) -> Vec<ResolvedMember> {
        if let [name] = path
            && builtins::is_utility(name)
            && self.index.symbols(file).local_declarations(name).is_empty()
        {
            return builtins::utility_members(self, name, args, file, stack);
        }

        let decls = match path {
            [name] => self.index.resolve_name(file, name),
            [first, .., last] => self.index.resolve_qualified(file, first, last),
            [] => return Vec::new(),
        };
        match decls.iter().find(|d| d.node.is_type()) {
            Some(decl) => self.declaration_members(decl, stack),
            None => Vec::new(),
        }
    }

    fn element_member(&self, element: &TsTypeElement, file: FileId) -> Option<(String, MemberSite)> {
        let parsed = self.parsed(file);
        let (name, optional, type_text, pos) = match element {
            TsTypeElement::TsPropertySignature(prop) => (
                property_key_name(&prop.key, prop.computed)?,
                prop.optional,
                annotation_text(parsed, prop.type_ann.as_deref().map(|a| &*a.type_ann)),
                prop.span.lo,
            ),
            TsTypeElement::TsMethodSignature(method) => (
                property_key_name(&method.key, method.computed)?,
                method.optional,
                method_type_text(parsed, method),
                method.span.lo,
            ),
            TsTypeElement::TsGetterSignature(getter) => (
                property_key_name(&getter.key, getter.computed)?,
                false,
                annotation_text(parsed, getter.type_ann.as_deref().map(|a| &*a.type_ann)),
                getter.span.lo,
            ),
            _ => return None,
        };

        Some((
            name,
            MemberSite {
                file,
                optional,
                type_text,
                doc_pos: pos,
            },
        ))
    }
}

fn annotation_text(parsed: &ParsedSource, ty: Option<&TsType>) -> String {
    match ty {
        Some(ty) => parsed.snippet(ty.span()).to_string(),
        None => "any".to_string(),
    }
}

/// `onChange(value: string): void` renders as `(value: string) => void`.
fn method_type_text(parsed: &ParsedSource, method: &TsMethodSignature) -> String {
    let key_end = method.key.span().hi;
    let (params, ret) = match &method.type_ann {
        Some(ann) => (
            parsed.text_between(key_end, ann.span.lo),
            parsed.snippet(ann.type_ann.span()),
        ),
        None => (parsed.text_between(key_end, method.span.hi), "any"),
    };
    let params = params
        .trim_start_matches([']', '?'])
        .trim()
        .trim_end_matches([';', ',', ':'])
        .trim_end();
    format!("{params} => {ret}")
}

fn property_key_name(key: &Expr, computed: bool) -> Option<String> {
    match key {
        Expr::Ident(ident) if !computed => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string_lossy().into_owned()),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        _ => None,
    }
}

fn entity_path(name: &TsEntityName) -> Vec<&str> {
    match name {
        TsEntityName::Ident(ident) => vec![ident.sym.as_str()],
        TsEntityName::TsQualifiedName(qualified) => {
            let mut path = entity_path(&qualified.left);
            path.push(qualified.right.sym.as_str());
            path
        }
    }
}

/// `React.HTMLAttributes` in an `extends` clause.
fn expr_path(expr: &Expr) -> Option<Vec<&str>> {
    match expr {
        Expr::Ident(ident) => Some(vec![ident.sym.as_str()]),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let mut path = expr_path(&member.obj)?;
            path.push(prop.sym.as_str());
            Some(path)
        }
        _ => None,
    }
}
