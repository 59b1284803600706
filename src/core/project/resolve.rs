//! Module specifier resolution.
//!
//! Specifiers resolve to TypeScript sources or declaration files through
//! `oxc_resolver`: relative paths with extension lookup, `tsconfig`
//! `paths`/`baseUrl` (following `extends`, including package configs),
//! package `exports` under the `types` condition, `types`/`typings` fields,
//! and finally the `@types/` package of a bare specifier.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use oxc_resolver::{
    ResolveError, ResolveOptions, Resolver, TsconfigDiscovery, TsconfigOptions,
    TsconfigReferences,
};

pub struct ModuleResolver {
    resolver: Resolver,
}

impl ModuleResolver {
    /// A resolver applying `tsconfig` (when given) to every specifier.
    pub fn new(tsconfig: Option<PathBuf>) -> Self {
        let resolver = Resolver::new(ResolveOptions {
            tsconfig: tsconfig.map(|config_file| {
                TsconfigDiscovery::Manual(TsconfigOptions {
                    config_file,
                    references: TsconfigReferences::Auto,
                })
            }),
            condition_names: vec![
                "types".into(),
                "import".into(),
                "require".into(),
                "default".into(),
            ],
            extensions: vec![".ts".into(), ".tsx".into(), ".d.ts".into()],
            // `./button.js` in ESM-style TypeScript refers to `./button.ts(x)`
            extension_alias: vec![
                (
                    ".js".into(),
                    vec![".ts".into(), ".tsx".into(), ".d.ts".into(), ".js".into()],
                ),
                (".jsx".into(), vec![".tsx".into(), ".jsx".into()]),
            ],
            main_fields: vec![
                "types".into(),
                "typings".into(),
                "module".into(),
                "main".into(),
            ],
            ..ResolveOptions::default()
        });

        Self { resolver }
    }

    /// Resolve `specifier` imported from `from_file` to a TypeScript file.
    ///
    /// Returns `Ok(None)` for specifiers without a TypeScript target. A
    /// malformed tsconfig is an error.
    pub fn resolve(&self, from_file: &Path, specifier: &str) -> Result<Option<PathBuf>> {
        let Some(dir) = from_file.parent() else {
            return Ok(None);
        };

        if let Some(found) = self.lookup(dir, specifier)? {
            return Ok(Some(found));
        }
        match types_package_specifier(specifier) {
            Some(types) => self.lookup(dir, &types),
            None => Ok(None),
        }
    }

    fn lookup(&self, dir: &Path, specifier: &str) -> Result<Option<PathBuf>> {
        match self.resolver.resolve(dir, specifier) {
            Ok(resolution) => {
                let path = resolution.path().to_path_buf();
                Ok(is_typescript_file(&path).then_some(path))
            }
            Err(ResolveError::Json(err)) if !is_package_manifest(&err.path) => {
                Err(ResolveError::Json(err))
                    .with_context(|| format!("Failed to read tsconfig while resolving '{}'", specifier))
            }
            Err(_) => Ok(None),
        }
    }
}

pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// `react` → `@types/react`, `@acme/icons/solid` → `@types/acme__icons/solid`.
fn types_package_specifier(specifier: &str) -> Option<String> {
    if is_relative_specifier(specifier)
        || specifier.starts_with('/')
        || specifier.starts_with("@types/")
        || specifier.starts_with('#')
    {
        return None;
    }

    match specifier.strip_prefix('@') {
        Some(scoped) => {
            let (scope, rest) = scoped.split_once('/')?;
            if scope.is_empty() || rest.is_empty() {
                return None;
            }
            Some(format!("@types/{}__{}", scope, rest))
        }
        None => Some(format!("@types/{}", specifier)),
    }
}

fn is_typescript_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts" | "tsx" | "mts" | "cts")
    )
}

fn is_package_manifest(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "package.json")
}
