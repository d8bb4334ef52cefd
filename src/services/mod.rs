//! Service layer for csdoc

pub mod assembler;
mod collector;
pub mod compilation;
pub mod config;
pub mod doc_file;
pub mod doc_id;
pub mod extractor;
pub mod index;
pub mod loader;
pub mod merge;
pub mod resolver;

pub use compilation::{Compilation, SourceText};
pub use config::{ConfigService, DefaultConfigService};
pub use doc_file::{DocumentationFile, write_documentation_file};
pub use index::SymbolIndex;
pub use loader::{DefaultSourceLoader, SourceLoader};
pub use merge::MergePolicy;
pub use resolver::{DocumentationResolver, ResolverOptions};
