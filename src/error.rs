//! Error types for csdoc

use std::path::PathBuf;

use thiserror::Error;

pub type CsdocResult<T> = std::result::Result<T, CsdocError>;

#[derive(Debug, Error)]
pub enum CsdocError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("Failed to load C# grammar: {0}")]
    Grammar(String),

    #[error("Failed to parse {0}")]
    ParseFailed(PathBuf),
}

/// Faults raised while resolving documentation for a symbol.
///
/// Every variant signals a broken invariant of the compilation snapshot, not
/// a user mistake. Absent comments are never errors.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Internal error: symbol '{symbol}' has no declarations")]
    SymbolHasNoDeclarations { symbol: String },

    #[error("Unknown symbol id {0}")]
    UnknownSymbol(usize),

    #[error("Internal error: declaration at byte {offset} not found in {path}")]
    DeclarationNotFound { path: PathBuf, offset: usize },
}

impl ResolveError {
    /// Whether this is an internal-compiler-error class fault.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::SymbolHasNoDeclarations { .. } | Self::DeclarationNotFound { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("File too large ({size_mb}MB > {limit_mb}MB limit): {path}")]
    FileTooLarge {
        path: String,
        size_mb: u64,
        limit_mb: u64,
    },

    #[error("No C# sources found under: {0}")]
    Empty(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
