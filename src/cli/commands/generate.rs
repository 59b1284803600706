use anyhow::Result;

use super::{CommandResult, CommandSummary, GenerateSummary, component_rows};
use crate::{
    cli::{ExitStatus, args::GenerateCommand},
    core::context::ManifestContext,
    manifest::{render_manifest, write_manifest},
};

/// Build the manifest and write it to the configured output file.
pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let ctx = ManifestContext::new(&cmd.common)?;
    let assembly = ctx.build()?;

    let content = render_manifest(&assembly.manifest)?;
    write_manifest(&ctx.output_path, &content)?;

    Ok(CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            output: ctx.output_display.clone(),
            import_path: ctx.import_path.clone(),
            file_count: ctx.files.len(),
            components: component_rows(&assembly),
            duplicates: assembly.duplicates,
        }),
        exit_status: ExitStatus::Success,
    })
}
