//! Props extraction.
//!
//! Locates the `<Component>Props` declaration for a component and turns the
//! resolved members of that type into prop records.

use crate::core::jsdoc::{default_tag_at, description_at};
use crate::core::project::{FileId, Project};
use crate::core::symbols::{DeclNode, Declaration, ProjectIndex};
use crate::core::types::{MemberSite, ResolvedMember, TypeResolver};
use crate::core::utils::to_slash;
use crate::manifest::PropRecord;

/// The props declaration of `component` as seen from `file`.
///
/// An export named `<component>Props` wins; if it is neither an interface nor
/// a type alias the component has no props. Otherwise a local interface, then
/// a local type alias, of that name is used.
pub fn find_props_declaration<'a>(
    index: &ProjectIndex<'a>,
    file: FileId,
    exported: &[(&'a str, Vec<Declaration<'a>>)],
    component: &str,
) -> Option<Declaration<'a>> {
    let props_name = format!("{component}Props");

    if let Some((_, decls)) = exported.iter().find(|(name, _)| *name == props_name) {
        let decl = decls.first()?;
        return is_props_shape(decl).then_some(*decl);
    }

    let local = index.symbols(file).local_declarations(&props_name);
    local
        .iter()
        .find(|d| matches!(d.node, DeclNode::Interface(_)))
        .or_else(|| local.iter().find(|d| matches!(d.node, DeclNode::TypeAlias(_))))
        .copied()
}

fn is_props_shape(decl: &Declaration) -> bool {
    matches!(decl.node, DeclNode::Interface(_) | DeclNode::TypeAlias(_))
}

/// Builds prop records, dropping members declared only in framework typings.
pub struct PropsExtractor<'i, 'a> {
    project: &'a Project,
    resolver: TypeResolver<'i, 'a>,
    framework_type_paths: &'i [String],
}

impl<'i, 'a> PropsExtractor<'i, 'a> {
    pub fn new(index: &'i ProjectIndex<'a>, framework_type_paths: &'i [String]) -> Self {
        Self {
            project: index.project(),
            resolver: TypeResolver::new(index),
            framework_type_paths,
        }
    }

    pub fn extract(&self, props_decl: &Declaration<'a>) -> Vec<PropRecord> {
        self.resolver
            .members_of(props_decl)
            .into_iter()
            .filter_map(|member| self.prop_record(member))
            .collect()
    }

    fn prop_record(&self, member: ResolvedMember) -> Option<PropRecord> {
        let surviving = member.sites.iter().find(|site| !self.is_framework_site(site))?;

        let type_text = surviving.type_text.clone();
        let required =
            !member.sites.iter().any(|site| site.optional) && !type_text.contains("undefined");

        let mut description = None;
        let mut default = None;
        for site in &member.sites {
            let parsed = &self.project.file(site.file).parsed;
            if description.is_none() {
                description = description_at(parsed, site.doc_pos);
            }
            if default.is_none() {
                default = default_tag_at(parsed, site.doc_pos);
            }
        }

        Some(PropRecord {
            name: member.name,
            type_text,
            required,
            default,
            description,
        })
    }

    /// Declared inside the UI framework's bundled type definitions.
    fn is_framework_site(&self, site: &MemberSite) -> bool {
        let path = to_slash(&self.project.file(site.file).path);
        self.framework_type_paths
            .iter()
            .any(|fragment| path.contains(fragment.as_str()))
    }
}
