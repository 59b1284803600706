//! Shared helpers for the analysis pipeline.
//!
//! - `glob_pattern`: brace expansion and glob detection for include/ignore patterns
//! - `paths`: path normalisation helpers

pub mod glob_pattern;
pub mod paths;

pub use glob_pattern::*;
pub use paths::*;

/// True when the first character of `name` is an ASCII uppercase letter.
pub fn starts_with_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
