//! component-manifest - React component manifest generator
//!
//! Scans a UI library's component sources and writes a machine-readable JSON
//! manifest describing every exported component: its props (type, required,
//! default, description), import location and the components it composes.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (generate, check, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Source analysis engine
//! - `manifest`: Manifest model, assembly and JSON output

pub mod cli;
pub mod config;
pub mod core;
pub mod manifest;
