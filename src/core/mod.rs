//! Source analysis engine.
//!
//! ## Module Structure
//!
//! - `file_scanner`: Include/ignore driven discovery of component files
//! - `parsers`: swc-based TypeScript parsing
//! - `project`: Loaded files plus the auxiliary modules their types depend on
//! - `symbols`: Per-file declarations, imports and exports; cross-file export index
//! - `classify`: Component classification policy
//! - `types`: Structural member resolution of props types
//! - `props`: Props type lookup and prop record extraction
//! - `jsdoc`: Documentation comment reading
//! - `composition`: Imported components used in markup
//! - `context`: Merged configuration for one run
//!
//! ## Pipeline
//!
//! 1. **Discovery** (`file_scanner::scan_files`)
//! 2. **Loading** (`project::Project::load`)
//!    - Parse component files in parallel, then follow imports to auxiliary files
//! 3. **Indexing** (`symbols::ProjectIndex`)
//! 4. **Extraction** (`crate::manifest::assemble_manifest`)
//!    - Classify exports, resolve props, detect composition

pub mod classify;
pub mod composition;
pub mod context;
pub mod file_scanner;
pub mod jsdoc;
pub mod parsers;
pub mod project;
pub mod props;
pub mod symbols;
pub mod types;
pub mod utils;
