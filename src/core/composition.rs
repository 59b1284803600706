//! Composition detection.
//!
//! A file composes a component when it both imports a name (named import,
//! local binding) and renders it as a JSX tag. Detection is file-scoped:
//! every component declared in the file reports the same list.

use std::collections::HashSet;

use swc_ecma_ast::{JSXElementName, JSXOpeningElement, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::utils::starts_with_uppercase;

/// Collects the tag names of opening and self-closing JSX elements.
#[derive(Default)]
struct JsxTagCollector {
    tags: HashSet<String>,
}

impl Visit for JsxTagCollector {
    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        if let JSXElementName::Ident(ident) = &node.name {
            self.tags.insert(ident.sym.to_string());
        }
        node.visit_children_with(self);
    }
}

/// Uppercase named imports rendered as JSX under their imported name, in import order.
pub fn detect_composes(module: &Module, named_imports: &[&str]) -> Vec<String> {
    let mut collector = JsxTagCollector::default();
    module.visit_with(&mut collector);

    let mut composes: Vec<String> = Vec::new();
    for &name in named_imports {
        if starts_with_uppercase(name)
            && collector.tags.contains(name)
            && !composes.iter().any(|c| c == name)
        {
            composes.push(name.to_string());
        }
    }
    composes
}
