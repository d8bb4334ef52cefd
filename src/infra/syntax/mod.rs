//! C# syntax infrastructure for csdoc
//!
//! Tree-sitter based parsing. The grammar is the only lexer and parser the
//! crate uses; everything downstream reads the immutable trees.

pub mod node_types;
pub mod source;

pub use source::{SourceFile, create_parser, normalize_type_text};
