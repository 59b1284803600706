//! Manifest model and output.
//!
//! - `assemble`: runs classification, props and composition over a loaded project
//! - `writer`: renders the manifest as JSON and writes it to disk

pub mod assemble;
pub mod writer;

use serde::Serialize;
use serde_json::Value;

pub use assemble::{Assembly, ManifestOptions, assemble_manifest};
pub use writer::{render_manifest, write_manifest};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub components: Vec<ComponentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub import: ImportSpec,
    pub props: Vec<PropRecord>,
    /// `None` when the file composes nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composes: Option<Vec<String>>,
    /// Reserved for hand-written usage samples; always empty.
    pub examples: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSpec {
    pub from: String,
    pub named: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
