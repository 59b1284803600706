use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, Span, Spanned,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Comments extracted from SingleThreadedComments during parsing and stored
/// independently of swc types so parsed files can cross threads.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, _) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }
}

/// A parsed TypeScript/TSX module together with the text it was parsed from.
pub struct ParsedSource {
    pub module: Module,
    pub source: String,
    /// Position of the first byte of `source` in the shared source map.
    pub start_pos: BytePos,
    pub comments: ExtractedComments,
}

impl ParsedSource {
    /// Source text covered by `span`, or an empty string for spans outside this file.
    pub fn snippet(&self, span: Span) -> &str {
        let start = span.lo.0.saturating_sub(self.start_pos.0) as usize;
        let end = span.hi.0.saturating_sub(self.start_pos.0) as usize;
        self.source.get(start..end).unwrap_or_default()
    }

    /// Source text between two positions.
    pub fn text_between(&self, lo: BytePos, hi: BytePos) -> &str {
        self.snippet(Span::new(lo, hi))
    }

    /// Comments attached in front of the token starting at `pos`.
    pub fn leading_comments(&self, pos: BytePos) -> &[Comment] {
        self.comments
            .leading
            .get(&pos)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Pick the swc syntax for a file based on its extension.
///
/// `.tsx` enables JSX, `.d.ts` enables declaration mode, everything else is
/// parsed as plain TypeScript so generic arrow functions stay unambiguous.
pub fn syntax_for_path(path: &Path) -> Syntax {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    Syntax::Typescript(TsSyntax {
        tsx: name.ends_with(".tsx") || name.ends_with(".jsx"),
        dts: name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts"),
        ..Default::default()
    })
}

/// Parse TypeScript/TSX source code into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_source(code: String, path: &Path, source_map: Arc<SourceMap>) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // The source map drops a leading BOM; `source` must match its offsets
    let code = match code.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => code,
    };

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(path.to_path_buf()).into(),
            code.clone(),
        );

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for_path(path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "Failed to parse {}:{}:{}: {}",
                path.display(),
                loc.line,
                loc.col.0 + 1,
                e.kind().msg()
            )
        })?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source: code,
            start_pos: source_file.start_pos,
            comments,
        })
    })
}

/// Parse a snippet of TSX with a private source map. Used by tests across the crate.
#[cfg(test)]
pub fn parse_test_source(code: &str) -> ParsedSource {
    parse_source(
        code.to_string(),
        Path::new("test.tsx"),
        Arc::new(SourceMap::default()),
    )
    .unwrap()
}
