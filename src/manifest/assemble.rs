use std::collections::HashSet;

use crate::core::{
    classify::ComponentPolicy,
    composition::detect_composes,
    jsdoc::description_at,
    project::{FileId, Project},
    props::{PropsExtractor, find_props_declaration},
    symbols::ProjectIndex,
};

use super::{ComponentRecord, ImportSpec, Manifest};

pub struct ManifestOptions {
    pub policy: ComponentPolicy,
    /// Module path every component is imported from.
    pub import_path: String,
    /// Path fragments identifying the UI framework's bundled type definitions.
    pub framework_type_paths: Vec<String>,
}

/// A component that made it into the manifest, with the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOrigin {
    pub name: String,
    pub file: String,
}

pub struct Assembly {
    pub manifest: Manifest,
    /// Origins of the kept components, in manifest order.
    pub origins: Vec<ComponentOrigin>,
    /// Components dropped because an earlier file already exported the name.
    pub duplicates: Vec<ComponentOrigin>,
}

/// Build the manifest from every component file of `project`.
///
/// Files are visited in enumeration order; when several files export the
/// same component name the first one wins. The result is sorted by name.
pub fn assemble_manifest(project: &Project, options: &ManifestOptions) -> Assembly {
    let index = ProjectIndex::build(project);
    let extractor = PropsExtractor::new(&index, &options.framework_type_paths);

    let mut records: Vec<(ComponentRecord, FileId)> = Vec::new();
    for file in project.component_files() {
        let exported = index.exported_declarations(file.id);
        let composes = detect_composes(&file.parsed.module, index.symbols(file.id).named_imports());

        for (name, decls) in &exported {
            if *name == "default" {
                continue;
            }
            let Some(decl) = decls.first() else {
                continue;
            };
            if !options.policy.is_component(decl) || options.policy.is_excluded(name) {
                continue;
            }

            let props_decl = find_props_declaration(&index, file.id, &exported, name);
            let summary = description_at(&project.file(decl.file).parsed, decl.doc_pos)
                .or_else(|| {
                    props_decl
                        .and_then(|p| description_at(&project.file(p.file).parsed, p.doc_pos))
                });
            let props = props_decl
                .map(|p| extractor.extract(&p))
                .unwrap_or_default();

            records.push((
                ComponentRecord {
                    name: name.to_string(),
                    summary,
                    import: ImportSpec {
                        from: options.import_path.clone(),
                        named: name.to_string(),
                    },
                    props,
                    composes: (!composes.is_empty()).then(|| composes.clone()),
                    examples: Vec::new(),
                },
                file.id,
            ));
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();
    let mut duplicates = Vec::new();
    for (record, file) in records {
        let origin = ComponentOrigin {
            name: record.name.clone(),
            file: project.display_path(file),
        };
        if seen.insert(record.name.clone()) {
            kept.push((record, origin));
        } else {
            duplicates.push(origin);
        }
    }
    kept.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));

    let (components, origins) = kept.into_iter().unzip();
    Assembly {
        manifest: Manifest { components },
        origins,
        duplicates,
    }
}
