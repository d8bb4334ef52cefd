//! Data models for csdoc
//!
//! Contains core type definitions used throughout the application.

pub mod config;
pub mod declaration;
pub mod documentation;
pub mod symbol;

// Re-export commonly used types
pub use config::{CsdocConfig, UnimplementedPartialPolicy};
pub use declaration::{DeclarationPiece, DeclarationRole, FileId, SourcePosition};
pub use documentation::{MergedDocumentation, RawComment};
pub use symbol::{Parameter, Symbol, SymbolId, SymbolKind};
