use std::{fs, io::ErrorKind};

use anyhow::{Context, Result};

use super::{CheckSummary, CommandResult, CommandSummary, component_rows};
use crate::{
    cli::{ExitStatus, args::CheckCommand},
    core::context::ManifestContext,
    manifest::render_manifest,
};

/// Build the manifest in memory and compare it with the file on disk.
///
/// A missing output file counts as out of date.
pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ManifestContext::new(&cmd.common)?;
    let assembly = ctx.build()?;
    let expected = render_manifest(&assembly.manifest)?;

    let current = match fs::read_to_string(&ctx.output_path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read file: {}", ctx.output_path.display()));
        }
    };
    let exists = current.is_some();
    let up_to_date = current.as_deref() == Some(expected.as_str());

    Ok(CommandResult {
        summary: CommandSummary::Check(CheckSummary {
            output: ctx.output_display.clone(),
            up_to_date,
            exists,
            file_count: ctx.files.len(),
            components: component_rows(&assembly),
            duplicates: assembly.duplicates,
        }),
        exit_status: ExitStatus::from_outcome(up_to_date),
    })
}
