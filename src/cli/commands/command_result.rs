use crate::{
    cli::ExitStatus,
    manifest::{Assembly, assemble::ComponentOrigin},
};

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

/// One line of the verbose component table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRow {
    pub name: String,
    pub prop_count: usize,
    pub composes: Vec<String>,
    pub source: String,
}

#[derive(Debug)]
pub struct GenerateSummary {
    /// Output path as configured, for messages.
    pub output: String,
    pub import_path: String,
    pub file_count: usize,
    pub components: Vec<ComponentRow>,
    pub duplicates: Vec<ComponentOrigin>,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub output: String,
    pub up_to_date: bool,
    /// False when the output file does not exist yet.
    pub exists: bool,
    pub file_count: usize,
    pub components: Vec<ComponentRow>,
    pub duplicates: Vec<ComponentOrigin>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a manifest command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}

/// Table rows for the components of an assembled manifest, in manifest order.
pub fn component_rows(assembly: &Assembly) -> Vec<ComponentRow> {
    assembly
        .manifest
        .components
        .iter()
        .zip(&assembly.origins)
        .map(|(component, origin)| ComponentRow {
            name: component.name.clone(),
            prop_count: component.props.len(),
            composes: component.composes.clone().unwrap_or_default(),
            source: origin.file.clone(),
        })
        .collect()
}
