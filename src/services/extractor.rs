//! Raw Comment Extractor
//!
//! Reads the documentation comment run directly above a declaration:
//! `///` lines and `/** */` blocks. Blank lines and ordinary comments break
//! adjacency.

use tree_sitter::Node;

use crate::error::ResolveError;
use crate::infra::syntax::SourceFile;
use crate::infra::syntax::source::is_comment;
use crate::models::{DeclarationPiece, RawComment};

/// Extract the leading documentation comment of a declaration piece
pub fn extract(file: &SourceFile, piece: &DeclarationPiece) -> Result<RawComment, ResolveError> {
    let node = file
        .declaration_node(piece)
        .ok_or_else(|| ResolveError::DeclarationNotFound {
            path: file.path().to_path_buf(),
            offset: piece.position.offset,
        })?;
    Ok(extract_from_node(node, file.text()))
}

pub(crate) fn extract_from_node(node: Node<'_>, source: &str) -> RawComment {
    let mut blocks = leading_doc_comments(node, source);
    if blocks.is_empty() {
        blocks = scan_doc_lines(node.start_byte(), source);
    }

    if blocks.is_empty() {
        RawComment::Absent
    } else {
        RawComment::Text(blocks.join("\n"))
    }
}

/// Walk preceding sibling comment nodes
fn leading_doc_comments(node: Node<'_>, source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut boundary_row = node.start_position().row;
    let mut current = node.prev_sibling();

    while let Some(sibling) = current {
        if !is_comment(sibling) {
            break;
        }
        // Anything between the comment and the next line breaks the run.
        if boundary_row > sibling.end_position().row + 1 {
            break;
        }
        if !starts_line(source, sibling.start_byte()) {
            break;
        }
        let Some(block) = source
            .get(sibling.byte_range())
            .and_then(doc_comment_content)
        else {
            break;
        };

        blocks.push(block);
        boundary_row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }

    blocks.reverse();
    blocks
}

/// Line-based fallback for `///` runs above `start`
fn scan_doc_lines(start: usize, source: &str) -> Vec<String> {
    let Some(before) = source.get(..start) else {
        return Vec::new();
    };
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    if !before[line_start..].trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut rest = &before[..line_start];
    while let Some(stripped) = rest.strip_suffix('\n') {
        let stripped = stripped.strip_suffix('\r').unwrap_or(stripped);
        let begin = stripped.rfind('\n').map_or(0, |i| i + 1);
        match line_comment_content(stripped[begin..].trim_start()) {
            Some(content) => lines.push(content.to_string()),
            None => break,
        }
        rest = &stripped[..begin];
    }

    lines.reverse();
    lines
}

fn starts_line(source: &str, offset: usize) -> bool {
    let Some(before) = source.get(..offset) else {
        return false;
    };
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    before[line_start..].trim().is_empty()
}

/// Content of a single documentation comment token, or `None` when the
/// comment is not a documentation comment
fn doc_comment_content(text: &str) -> Option<String> {
    if let Some(content) = line_comment_content(text) {
        return Some(content.to_string());
    }
    delimited_comment_content(text)
}

fn line_comment_content(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("///")?;
    if rest.starts_with('/') {
        return None;
    }
    let rest = rest.strip_suffix('\r').unwrap_or(rest);
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn delimited_comment_content(text: &str) -> Option<String> {
    let inner = text.strip_prefix("/**")?.strip_suffix("*/")?;
    if inner.starts_with('*') || inner.is_empty() {
        return None;
    }

    let raw: Vec<&str> = inner
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let last = raw.len() - 1;

    let mut lines = Vec::with_capacity(raw.len());
    for (i, line) in raw.iter().enumerate() {
        if (i == 0 || i == last) && line.trim().is_empty() {
            continue;
        }
        let content = if i == 0 {
            line.strip_prefix(' ').unwrap_or(line)
        } else {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => trimmed,
            }
        };
        // Spacing before the closing `*/` belongs to the delimiter
        lines.push(if i == last { content.trim_end() } else { content });
    }

    Some(lines.join("\n"))
}
