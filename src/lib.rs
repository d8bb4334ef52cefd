//! csdoc - C# documentation comment resolver
//!
//! Parses C# sources with tree-sitter, groups partial declarations into
//! symbols and produces the `<member>` XML a documentation file would hold.
//! Partial types concatenate the comments of all their parts; a partial
//! method takes its documentation from the implementation.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infra;
pub mod models;
pub mod services;

pub use error::{CsdocError, CsdocResult};
pub use models::{MergedDocumentation, RawComment, Symbol, SymbolId, SymbolKind};
pub use services::{
    Compilation, DocumentationResolver, ResolverOptions, SourceText, write_documentation_file,
};
