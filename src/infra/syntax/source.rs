//! Parsed C# source files

use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree};

use super::node_types::{COMMENT, MODIFIER};
use crate::error::SyntaxError;
use crate::models::{DeclarationPiece, FileId};

/// Create a parser loaded with the C# grammar
pub fn create_parser() -> Result<Parser, SyntaxError> {
    let language: Language = tree_sitter_c_sharp::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| SyntaxError::Grammar(e.to_string()))?;
    Ok(parser)
}

/// A source file with its immutable syntax tree
#[derive(Debug)]
pub struct SourceFile {
    id: FileId,
    path: PathBuf,
    text: String,
    tree: Tree,
}

impl SourceFile {
    pub fn parse(
        parser: &mut Parser,
        id: FileId,
        path: PathBuf,
        text: String,
    ) -> Result<Self, SyntaxError> {
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| SyntaxError::ParseFailed(path.clone()))?;

        if tree.root_node().has_error() {
            tracing::debug!("Syntax errors in {}, continuing", path.display());
        }

        Ok(Self {
            id,
            path,
            text,
            tree,
        })
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }

    /// Locate the syntax node a declaration piece was collected from
    pub fn declaration_node(&self, piece: &DeclarationPiece) -> Option<Node<'_>> {
        let start = piece.position.offset;
        let end = piece.end_offset;
        let mut node = self
            .tree
            .root_node()
            .descendant_for_byte_range(start, end)?;

        // The smallest spanning node can be a child with the same extent,
        // e.g. the identifier of an enum member.
        loop {
            if node.start_byte() < start || node.end_byte() > end {
                return None;
            }
            if node.kind() == piece.node_kind && node.start_byte() == start && node.end_byte() == end
            {
                return Some(node);
            }
            node = node.parent()?;
        }
    }
}

/// Whether a declaration carries the given modifier keyword
pub fn has_modifier(node: Node<'_>, source: &str, keyword: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| {
        (child.kind() == MODIFIER && source.get(child.byte_range()) == Some(keyword))
            || child.kind() == keyword
    })
}

/// First named child of the given kind
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() == kind)
}

/// Field child, falling back to the first named child of a kind
pub fn field_or_kind<'t>(node: Node<'t>, field: &str, kind: &str) -> Option<Node<'t>> {
    node.child_by_field_name(field)
        .or_else(|| child_of_kind(node, kind))
}

/// Whether a node is a comment extra
pub fn is_comment(node: Node<'_>) -> bool {
    node.kind() == COMMENT
}

/// Collapse whitespace in a type as written: `List < int >` becomes `List<int>`,
/// `(int a, string b)` becomes `(int a,string b)`.
pub fn normalize_type_text(text: &str) -> String {
    const PUNCTUATION: &[char] = &['<', '>', ',', '[', ']', '(', ')', '?', '*', '.', ':'];

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            let prev_is_punct = out.chars().last().is_none_or(|p| PUNCTUATION.contains(&p));
            if !prev_is_punct && !PUNCTUATION.contains(&c) {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
    }
    out
}
