//! Markdown integration.
//!
//! Rendering a document happens in two passes. [`collect`] parses every
//! ` ```shaahmaat ` fence into a [`BoardRegistry`] and relabels the fence with
//! the board's key. [`CollectedDocument::render`] then swaps each relabelled
//! fence for the board markup. Other fences and text pass through unchanged.

use std::sync::LazyLock;

use regex::Regex;
use shaahmaat_core::{BoardKey, BoardRegistry, FormatError, NotationParser};
use thiserror::Error;
use tracing::{debug, warn};

use crate::renderer::render;
use crate::style::StyleConfig;

pub const SHAAHMAAT_LANGUAGE: &str = "shaahmaat";

static FENCE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(`{3,}|~{3,})\s*([^\s`]*)").expect("valid fence regex")
});

#[derive(Error, Debug)]
#[error("ShaahMaat block {block}: {source}")]
pub struct DocumentError {
    /// 1-based position among the document's ShaahMaat blocks.
    pub block: usize,
    pub source: FormatError,
}

/// Result of the parse pass.
#[derive(Debug, Clone)]
pub struct CollectedDocument {
    markdown: String,
    registry: BoardRegistry,
}

impl CollectedDocument {
    /// Markdown with each ShaahMaat fence relabelled to its board key.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn registry(&self) -> &BoardRegistry {
        &self.registry
    }

    /// Replace every relabelled fence with its rendered board.
    pub fn render(&self, style: &StyleConfig) -> String {
        rewrite_fences(&self.markdown, |fence| {
            let Ok(key) = fence.info.parse::<BoardKey>() else {
                return Ok::<_, std::convert::Infallible>(None);
            };
            let Some(info) = self.registry.get(key) else {
                warn!(%key, "No board registered for key, leaving fence as is");
                return Ok(None);
            };
            let board = render(info, style).with_attr("id", key.to_string());
            Ok(Some(board.to_string()))
        })
        .unwrap_or_else(|never| match never {})
    }
}

/// Parse pass: register every ShaahMaat fence and relabel it.
pub fn collect(markdown: &str) -> Result<CollectedDocument, DocumentError> {
    collect_with(markdown, &NotationParser::new())
}

pub fn collect_with(
    markdown: &str,
    parser: &NotationParser,
) -> Result<CollectedDocument, DocumentError> {
    let mut registry = BoardRegistry::new();

    let markdown = rewrite_fences(markdown, |fence| -> Result<_, DocumentError> {
        if fence.info != SHAAHMAAT_LANGUAGE {
            return Ok(None);
        }
        let info = parser.parse(&fence.body).map_err(|source| DocumentError {
            block: registry.len() + 1,
            source,
        })?;
        let key = registry.insert(info);
        Ok(Some(fence.relabel(&key.to_string())))
    })?;

    debug!(boards = registry.len(), "Collected ShaahMaat boards");
    Ok(CollectedDocument { markdown, registry })
}

/// Both passes with default parser options.
pub fn render_document(markdown: &str, style: &StyleConfig) -> Result<String, DocumentError> {
    Ok(collect(markdown)?.render(style))
}

/// A fenced code block, split into its lines.
struct Fence<'a> {
    opening: &'a str,
    marker: &'a str,
    info: &'a str,
    body: String,
    closing: Option<&'a str>,
    body_lines: &'a [&'a str],
}

impl Fence<'_> {
    /// The same block with its info string replaced.
    fn relabel(&self, info: &str) -> String {
        let indent = &self.opening[..self.opening.len() - self.opening.trim_start().len()];
        let mut lines = vec![format!("{indent}{}{info}", self.marker)];
        lines.extend(self.body_lines.iter().map(|line| line.to_string()));
        lines.push(self.closing.unwrap_or(self.marker).to_string());
        lines.join("\n")
    }
}

/// Drop up to `width` leading spaces, the indentation of the opening fence.
fn strip_indent(line: &str, width: usize) -> &str {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    &line[spaces.min(width)..]
}

fn is_closing(line: &str, marker: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let Some(fence_char) = marker.chars().next() else {
        return false;
    };
    let run = trimmed.len() - trimmed.trim_start_matches(fence_char).len();
    run >= marker.len() && trimmed[run..].trim().is_empty()
}

/// Walk the fences of `markdown`; `replace` returns the text to put in place
/// of a fence, or `None` to keep it. Everything outside fences is kept as is.
fn rewrite_fences<E>(
    markdown: &str,
    mut replace: impl FnMut(&Fence<'_>) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let lines: Vec<&str> = markdown.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let Some(caps) = FENCE_OPEN_RE.captures(lines[i]) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };
        let (Some(marker), Some(info)) = (caps.get(1), caps.get(2)) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };
        let marker = marker.as_str();

        // An unclosed fence runs to the end of the document.
        let body_start = i + 1;
        let close = (body_start..lines.len()).find(|&j| is_closing(lines[j], marker));
        let body_end = close.unwrap_or(lines.len());
        let next = close.map_or(lines.len(), |j| j + 1);
        let body_lines = &lines[body_start..body_end];
        let indent = lines[i].len() - lines[i].trim_start_matches(' ').len();

        let fence = Fence {
            opening: lines[i],
            marker,
            info: info.as_str(),
            body: body_lines
                .iter()
                .map(|line| strip_indent(line, indent))
                .collect::<Vec<_>>()
                .join("\n"),
            closing: close.map(|j| lines[j]),
            body_lines,
        };

        match replace(&fence)? {
            Some(replacement) => out.push(replacement),
            None => out.extend(lines[i..next].iter().map(|line| line.to_string())),
        }
        i = next;
    }

    Ok(out.join("\n"))
}
