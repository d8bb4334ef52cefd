//! Declaration pieces
//!
//! One syntactic occurrence of a symbol's declaration. A partial class split
//! over three files has three pieces; a partial method has a defining and an
//! implementing piece.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal of a source file within a compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub(crate) u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a declaration start.
///
/// Ordering is (file ordinal, byte offset); line and column follow from the
/// offset and never change the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourcePosition {
    pub file: FileId,
    pub offset: usize,
    /// Zero-based
    pub line: usize,
    /// Zero-based, in bytes
    pub column: usize,
}

/// How a piece takes part in its symbol's declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationRole {
    /// Sole declaration of a non-partial symbol
    Whole,
    /// One part of a partial type
    Part,
    /// Partial method declaration without a body
    Defining,
    /// Partial method declaration with a body
    Implementing,
}

impl DeclarationRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::Part => "part",
            Self::Defining => "defining",
            Self::Implementing => "implementing",
        }
    }
}

impl fmt::Display for DeclarationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationPiece {
    pub position: SourcePosition,
    /// End byte of the declaration node
    pub end_offset: usize,
    /// Grammar node kind of the declaration
    pub node_kind: &'static str,
    pub role: DeclarationRole,
}

impl DeclarationPiece {
    pub fn file(&self) -> FileId {
        self.position.file
    }

    pub fn is_implementation(&self) -> bool {
        self.role == DeclarationRole::Implementing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(file: u32, offset: usize) -> SourcePosition {
        SourcePosition {
            file: FileId(file),
            offset,
            line: 0,
            column: 0,
        }
    }

    #[test]
    fn test_position_orders_by_file_first() {
        assert!(position(0, 500) < position(1, 0));
        assert!(position(1, 10) < position(1, 20));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(DeclarationRole::Implementing.to_string(), "implementing");
        assert_eq!(DeclarationRole::Part.to_string(), "part");
    }
}
