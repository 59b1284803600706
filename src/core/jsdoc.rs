//! JSDoc reading for declarations and members.
//!
//! Only block comments opening with `/**` count. A comment's description is
//! the text before its first block tag; tags run until the next tag line.

use std::sync::LazyLock;

use regex::Regex;
use swc_common::{
    BytePos,
    comments::{Comment, CommentKind},
};

use crate::core::parsers::tsx::ParsedSource;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(?:\s+(.*))?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDoc {
    pub description: String,
    pub tags: Vec<JsDocTag>,
}

impl JsDoc {
    /// Parse the text of a block comment (without `/*` and `*/`).
    /// Returns `None` when the comment is not a JSDoc comment.
    pub fn parse(comment: &Comment) -> Option<Self> {
        if comment.kind != CommentKind::Block {
            return None;
        }
        let body = comment.text.strip_prefix('*')?;

        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<(String, Vec<&str>)> = Vec::new();

        for line in body.lines().map(strip_gutter) {
            if let Some(caps) = TAG_REGEX.captures(line) {
                let name = caps[1].to_string();
                let first = caps.get(2).map_or("", |m| m.as_str());
                tags.push((name, vec![first]));
            } else if let Some((_, lines)) = tags.last_mut() {
                lines.push(line);
            } else {
                description.push(line);
            }
        }

        Some(JsDoc {
            description: join_lines(&description),
            tags: tags
                .into_iter()
                .map(|(name, lines)| JsDocTag {
                    name,
                    text: join_lines(&lines),
                })
                .collect(),
        })
    }

    pub fn tag(&self, name: &str) -> Option<&JsDocTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}

/// Remove leading whitespace, the `*` gutter and the space after it.
fn strip_gutter(line: &str) -> &str {
    let line = line.trim_start();
    let line = match line.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    };
    line.trim_end()
}

fn join_lines(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// JSDoc comments attached in front of the token at `pos`, in source order.
pub fn jsdocs_at(parsed: &ParsedSource, pos: BytePos) -> Vec<JsDoc> {
    parsed
        .leading_comments(pos)
        .iter()
        .filter_map(JsDoc::parse)
        .collect()
}

/// Non-empty descriptions of every JSDoc at `pos`, separated by a blank line.
pub fn description_at(parsed: &ParsedSource, pos: BytePos) -> Option<String> {
    let text = jsdocs_at(parsed, pos)
        .iter()
        .map(|doc| doc.description.as_str())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    (!text.is_empty()).then_some(text)
}

/// Value of the `@default` tag of the first JSDoc at `pos`.
pub fn default_tag_at(parsed: &ParsedSource, pos: BytePos) -> Option<String> {
    let docs = jsdocs_at(parsed, pos);
    let value = docs.first()?.tag("default")?.text.trim();
    (!value.is_empty()).then(|| value.to_string())
}
