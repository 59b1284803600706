use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{
        CONFIG_FILE_NAME, Config, INCLUDE_ICONS_ENV, include_icons_from_env, load_config,
    },
    core::{
        classify::ComponentPolicy,
        file_scanner::scan_files,
        project::{
            Project, package::resolve_import_path, resolve::ModuleResolver,
        },
        utils::join_root,
    },
    manifest::{Assembly, ManifestOptions, assemble_manifest},
};

/// Settings and inputs of one generator run.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (e.g. `--output`, `--import-path`)
/// 2. Environment (`MANIFEST_INCLUDE_ICONS`, `COMPONENT_PACKAGE_IMPORT_PATH`)
/// 3. `.manifestrc.json` config file
/// 4. Built-in defaults
pub struct ManifestContext {
    /// Merged configuration (CLI args > environment > config file > defaults).
    pub config: Config,

    /// Absolute project root; `package.json`, `tsconfig.json` and
    /// `node_modules` are looked up here.
    pub root_dir: PathBuf,

    /// Output file as the user wrote it, for messages.
    pub output_display: String,

    /// Absolute output file.
    pub output_path: PathBuf,

    pub include_icons: bool,

    /// `from` of every component's import specification.
    pub import_path: String,

    /// Component files in sorted order.
    pub files: Vec<PathBuf>,

    pub verbose: bool,
}

impl ManifestContext {
    /// Create a context from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the root does not exist or the config file is invalid.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::with_env(args, env::var(INCLUDE_ICONS_ENV).ok().as_deref())
    }

    /// Like [`ManifestContext::new`], with the value of `MANIFEST_INCLUDE_ICONS` given.
    pub fn with_env(args: &CommonArgs, include_icons_env: Option<&str>) -> Result<Self> {
        let verbose = args.verbose;

        let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let root_dir = fs::canonicalize(&root)
            .with_context(|| format!("Project root not found: {}", root.display()))?;

        let config_result = load_config(&root_dir)?;
        if verbose && config_result.path.is_none() {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if let Some(output) = &args.output {
            config.output = output.to_string_lossy().to_string();
        }
        if args.include_icons {
            config.include_icons = true;
        } else if include_icons_env.is_some() {
            config.include_icons = include_icons_from_env(include_icons_env);
        }

        let import_path = resolve_import_path(
            args.import_path.as_deref(),
            config.import_path.as_deref(),
            &root_dir,
        );

        let scan_result = scan_files(&root_dir, &config.includes, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            output_display: config.output.clone(),
            output_path: join_root(&root_dir, Path::new(&config.output)),
            include_icons: config.include_icons,
            import_path,
            files: scan_result.files,
            root_dir,
            config,
            verbose,
        })
    }

    /// Parse the component files and everything their types depend on.
    pub fn load_project(&self) -> Result<Project> {
        let tsconfig_path = join_root(&self.root_dir, Path::new(&self.config.tsconfig));
        let tsconfig = tsconfig_path.is_file().then_some(tsconfig_path);
        if self.verbose && tsconfig.is_none() {
            eprintln!(
                "Note: {} not found, path aliases are disabled",
                self.config.tsconfig
            );
        }

        let resolver = ModuleResolver::new(tsconfig);
        let project = Project::load(&self.root_dir, &self.files, &resolver, self.verbose)?;

        if !project.skipped_auxiliary.is_empty() {
            eprintln!(
                "Warning: {} imported file(s) skipped due to parse errors{}",
                project.skipped_auxiliary.len(),
                if self.verbose { "" } else { " (use -v for details)" }
            );
        }

        if self.verbose {
            for unresolved in &project.unresolved {
                eprintln!(
                    "{} Cannot resolve '{}' imported from {}",
                    "warning:".bold().yellow(),
                    unresolved.specifier,
                    project.display_path(unresolved.file)
                );
            }
        }

        Ok(project)
    }

    pub fn manifest_options(&self) -> ManifestOptions {
        ManifestOptions {
            policy: ComponentPolicy::new(
                self.include_icons,
                &self.config.icon_suffix,
                &self.config.component_wrappers,
            ),
            import_path: self.import_path.clone(),
            framework_type_paths: self.config.framework_type_paths.clone(),
        }
    }

    /// Load the project and assemble the manifest in memory.
    pub fn build(&self) -> Result<Assembly> {
        let project = self.load_project()?;
        Ok(assemble_manifest(&project, &self.manifest_options()))
    }
}
