//! CLI module for csdoc
//!
//! Provides command-line interface using clap derive macros.

pub mod commands;
pub mod output;

pub use output::{OutputContext, OutputFormat};

use clap::{Parser, Subcommand};

use commands::{config::ConfigArgs, emit::EmitArgs, symbols::SymbolsArgs, xml::XmlArgs};

const LONG_ABOUT: &str = r#"
csdoc - C# documentation comment resolver

Reads C# sources, merges the /// comments of partial declarations and prints
the <member> XML a documentation file would contain.

QUICK START:
  1. List documented symbols:  csdoc symbols --documented
  2. Show one symbol:          csdoc xml "T:Acme.Widget"
  3. Write the doc file:       csdoc emit --assembly Acme --output Acme.xml

PATHS:
  Every command takes optional files or directories. Without paths the
  current directory is scanned for *.cs files (bin/ and obj/ are skipped).
"#;

/// csdoc - C# documentation comment resolver
#[derive(Parser, Debug)]
#[command(name = "csdoc")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'csdoc <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, text). Defaults to the configured format.
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Verbose output (show debug info)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List symbols with their documentation IDs and declarations
    Symbols(SymbolsArgs),

    /// Print the documentation XML of one symbol
    Xml(XmlArgs),

    /// Write the documentation file of all documented symbols
    Emit(EmitArgs),

    /// Configuration management
    Config(ConfigArgs),
}
