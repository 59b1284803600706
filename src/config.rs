use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::utils::{expand_braces, is_glob_pattern};

pub const CONFIG_FILE_NAME: &str = ".manifestrc.json";

/// Set to exactly `"true"` to keep components whose name ends in the icon suffix.
pub const INCLUDE_ICONS_ENV: &str = "MANIFEST_INCLUDE_ICONS";

/// Overrides the `import.from` field of every component.
pub const IMPORT_PATH_ENV: &str = "COMPONENT_PACKAGE_IMPORT_PATH";

/// Import path used when neither an override nor a package name is available.
pub const DEFAULT_IMPORT_PATH: &str = "@components/ui";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,
    #[serde(default)]
    pub include_icons: bool,
    #[serde(default = "default_icon_suffix")]
    pub icon_suffix: String,
    #[serde(default = "default_component_wrappers")]
    pub component_wrappers: Vec<String>,
    #[serde(default = "default_framework_type_paths")]
    pub framework_type_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
}

fn default_includes() -> Vec<String> {
    vec!["src/components/**/*.{ts,tsx}".to_string()]
}

fn default_output() -> String {
    "docs/components.manifest.json".to_string()
}

fn default_tsconfig() -> String {
    "tsconfig.json".to_string()
}

fn default_icon_suffix() -> String {
    "Icon".to_string()
}

fn default_component_wrappers() -> Vec<String> {
    ["forwardRef", "memo"].map(String::from).to_vec()
}

fn default_framework_type_paths() -> Vec<String> {
    vec!["/node_modules/@types/react/".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            output: default_output(),
            tsconfig: default_tsconfig(),
            include_icons: false,
            icon_suffix: default_icon_suffix(),
            component_wrappers: default_component_wrappers(),
            framework_type_paths: default_framework_type_paths(),
            import_path: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `includes` or `ignores` are invalid.
    pub fn validate(&self) -> Result<()> {
        for (field, patterns) in [("includes", &self.includes), ("ignores", &self.ignores)] {
            for pattern in patterns.iter().filter(|p| is_glob_pattern(p)) {
                for expanded in expand_braces(pattern) {
                    Pattern::new(&expanded).with_context(|| {
                        format!("Invalid glob pattern in '{}': \"{}\"", field, pattern)
                    })?;
                }
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

/// `MANIFEST_INCLUDE_ICONS` is honoured only when it is exactly `"true"`.
pub fn include_icons_from_env(value: Option<&str>) -> bool {
    value == Some("true")
}
