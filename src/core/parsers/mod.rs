//! File parsers.
//!
//! - `tsx`: TypeScript/TSX source parser (uses swc for AST generation)

pub mod tsx;
