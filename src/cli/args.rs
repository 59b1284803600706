//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Write the component manifest
//! - `check`: Verify the manifest on disk matches the sources
//! - `init`: Initialize a configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::IMPORT_PATH_ENV;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `generate` and `check`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root containing package.json and tsconfig.json (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Manifest output path, relative to the root (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Keep components whose name ends with the icon suffix
    #[arg(long)]
    pub include_icons: bool,

    /// Module path components are imported from (overrides package.json name)
    #[arg(long, env = IMPORT_PATH_ENV)]
    pub import_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the component manifest from the component sources
    Generate(GenerateCommand),
    /// Check that the manifest on disk is up to date
    Check(CheckCommand),
    /// Initialize a new .manifestrc.json configuration file
    Init,
}
