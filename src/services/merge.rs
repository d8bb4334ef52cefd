//! Merge Policy Engine
//!
//! Combines the per-piece raw comments of one symbol into a single
//! documentation body. Partial types concatenate every piece, partial
//! methods let the implementation override the definition.

use crate::models::{DeclarationPiece, DeclarationRole, MergedDocumentation, RawComment, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep every present comment in declaration order
    Concatenate,
    /// Implementation is authoritative over the definition
    Override,
    /// Single declaration, comment used as is
    PassThrough,
}

impl MergePolicy {
    pub fn for_symbol(symbol: &Symbol) -> Self {
        if symbol.kind.is_type() {
            Self::Concatenate
        } else if symbol.is_partial_method() {
            Self::Override
        } else {
            Self::PassThrough
        }
    }
}

/// Merge raw comments collected in declaration order
pub fn merge(
    policy: MergePolicy,
    pieces: &[(&DeclarationPiece, RawComment)],
) -> MergedDocumentation {
    match policy {
        MergePolicy::Concatenate => concatenate(pieces),
        MergePolicy::Override => override_by_implementation(pieces),
        MergePolicy::PassThrough => pieces
            .first()
            .map(|(_, comment)| MergedDocumentation::from(comment.clone()))
            .unwrap_or_default(),
    }
}

fn concatenate(pieces: &[(&DeclarationPiece, RawComment)]) -> MergedDocumentation {
    let texts: Vec<&str> = pieces
        .iter()
        .filter_map(|(_, comment)| comment.text())
        .collect();

    if texts.is_empty() {
        MergedDocumentation::None
    } else {
        MergedDocumentation::Body(texts.join("\n"))
    }
}

fn override_by_implementation(pieces: &[(&DeclarationPiece, RawComment)]) -> MergedDocumentation {
    let mut defining = None;
    let mut implementing = None;
    for (piece, comment) in pieces {
        match piece.role {
            DeclarationRole::Implementing => implementing = Some(comment),
            DeclarationRole::Defining => defining = Some(comment),
            DeclarationRole::Whole | DeclarationRole::Part => {
                tracing::debug!("Unexpected {} piece on a partial method", piece.role);
            }
        }
    }

    match (implementing, defining) {
        (Some(RawComment::Text(text)), _) => MergedDocumentation::Body(text.clone()),
        // An uncommented implementation hides the definition's comment.
        (Some(RawComment::Absent), _) => MergedDocumentation::None,
        (None, Some(comment)) => MergedDocumentation::from(comment.clone()),
        (None, None) => MergedDocumentation::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileId, SourcePosition, SymbolKind};

    fn piece(file: u32, role: DeclarationRole) -> DeclarationPiece {
        DeclarationPiece {
            position: SourcePosition {
                file: FileId(file),
                offset: 0,
                line: 0,
                column: 0,
            },
            end_offset: 1,
            node_kind: "method_declaration",
            role,
        }
    }

    fn text(s: &str) -> RawComment {
        RawComment::Text(s.to_string())
    }

    #[test]
    fn test_policy_selection() {
        let class = Symbol::new("Foo", SymbolKind::Class).partial(true);
        let method = Symbol::new("Run", SymbolKind::Method).partial(true);
        let property = Symbol::new("Name", SymbolKind::Property);

        assert_eq!(MergePolicy::for_symbol(&class), MergePolicy::Concatenate);
        assert_eq!(
            MergePolicy::for_symbol(&Symbol::new("Bar", SymbolKind::Struct)),
            MergePolicy::Concatenate
        );
        assert_eq!(MergePolicy::for_symbol(&method), MergePolicy::Override);
        assert_eq!(MergePolicy::for_symbol(&property), MergePolicy::PassThrough);
    }

    #[test]
    fn test_concatenate_in_order() {
        let a = piece(0, DeclarationRole::Part);
        let b = piece(1, DeclarationRole::Part);
        let merged = merge(
            MergePolicy::Concatenate,
            &[(&a, text("<summary>A</summary>")), (&b, text("<summary>B</summary>"))],
        );
        assert_eq!(
            merged,
            MergedDocumentation::Body("<summary>A</summary>\n<summary>B</summary>".to_string())
        );
    }

    #[test]
    fn test_concatenate_skips_absent() {
        let a = piece(0, DeclarationRole::Part);
        let b = piece(1, DeclarationRole::Part);
        let c = piece(2, DeclarationRole::Part);
        let merged = merge(
            MergePolicy::Concatenate,
            &[
                (&a, RawComment::Absent),
                (&b, text("<remarks>B</remarks>")),
                (&c, RawComment::Absent),
            ],
        );
        assert_eq!(merged.body(), Some("<remarks>B</remarks>"));
    }

    #[test]
    fn test_concatenate_does_not_deduplicate() {
        let a = piece(0, DeclarationRole::Part);
        let b = piece(1, DeclarationRole::Part);
        let merged = merge(
            MergePolicy::Concatenate,
            &[(&a, text("<summary>Same</summary>")), (&b, text("<summary>Same</summary>"))],
        );
        assert_eq!(
            merged.body(),
            Some("<summary>Same</summary>\n<summary>Same</summary>")
        );
    }

    #[test]
    fn test_concatenate_all_absent_is_none() {
        let a = piece(0, DeclarationRole::Part);
        let b = piece(1, DeclarationRole::Part);
        let merged = merge(
            MergePolicy::Concatenate,
            &[(&a, RawComment::Absent), (&b, RawComment::Absent)],
        );
        assert!(merged.is_none());
    }

    #[test]
    fn test_override_prefers_implementation() {
        let def = piece(0, DeclarationRole::Defining);
        let imp = piece(1, DeclarationRole::Implementing);
        let merged = merge(
            MergePolicy::Override,
            &[(&def, text("<summary>X</summary>")), (&imp, text("<summary>Y</summary>"))],
        );
        assert_eq!(merged.body(), Some("<summary>Y</summary>"));
    }

    #[test]
    fn test_override_implementation_first_in_file_order() {
        let imp = piece(0, DeclarationRole::Implementing);
        let def = piece(1, DeclarationRole::Defining);
        let merged = merge(
            MergePolicy::Override,
            &[(&imp, text("<summary>Y</summary>")), (&def, text("<summary>X</summary>"))],
        );
        assert_eq!(merged.body(), Some("<summary>Y</summary>"));
    }

    #[test]
    fn test_absent_implementation_suppresses_definition() {
        let def = piece(0, DeclarationRole::Defining);
        let imp = piece(1, DeclarationRole::Implementing);
        let merged = merge(
            MergePolicy::Override,
            &[(&def, text("<summary>X</summary>")), (&imp, RawComment::Absent)],
        );
        assert!(merged.is_none());
    }

    #[test]
    fn test_override_without_implementation_uses_definition() {
        let def = piece(0, DeclarationRole::Defining);
        let merged = merge(MergePolicy::Override, &[(&def, text("<summary>X</summary>"))]);
        assert_eq!(merged.body(), Some("<summary>X</summary>"));

        let merged = merge(MergePolicy::Override, &[(&def, RawComment::Absent)]);
        assert!(merged.is_none());
    }

    #[test]
    fn test_pass_through_preserves_whitespace() {
        let whole = piece(0, DeclarationRole::Whole);
        let merged = merge(
            MergePolicy::PassThrough,
            &[(&whole, text("<summary>\n  indented  \n</summary>"))],
        );
        assert_eq!(merged.body(), Some("<summary>\n  indented  \n</summary>"));
        assert!(merge(MergePolicy::PassThrough, &[]).is_none());
    }
}
