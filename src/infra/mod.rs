//! Infrastructure layer for csdoc
//!
//! Parsing and filesystem concerns.

pub mod file_filter;
pub mod syntax;
