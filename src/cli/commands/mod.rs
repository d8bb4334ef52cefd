//! Command implementations for csdoc
//!
//! Each command is implemented in its own module.

pub mod config;
pub mod emit;
pub mod symbols;
pub mod xml;
