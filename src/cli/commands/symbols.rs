//! Symbols command implementation
//!
//! List every declared symbol with its documentation ID and declaration pieces.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::services::resolver::DocumentationResolver;

#[derive(Args, Debug)]
pub struct SymbolsArgs {
    /// Source files or directories (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Only list symbols that produce documentation XML
    #[arg(short, long)]
    pub documented: bool,
}

#[derive(Serialize)]
struct SymbolOutput {
    id: String,
    kind: String,
    partial: bool,
    documented: bool,
    declarations: Vec<DeclarationOutput>,
}

#[derive(Serialize)]
struct DeclarationOutput {
    file: String,
    line: usize,
    role: String,
    has_comment: bool,
}

#[derive(Serialize)]
struct SymbolsResponse {
    count: usize,
    symbols: Vec<SymbolOutput>,
}

pub async fn execute(args: SymbolsArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let compilation = app.compile(&args.paths).await?;
    let resolver = DocumentationResolver::with_options(&compilation, app.resolver_options());

    let mut symbols = Vec::new();
    for (id, symbol) in compilation.index().iter() {
        let documented = !resolver.documentation_xml(id)?.is_empty();
        if args.documented && !documented {
            continue;
        }

        let declarations = resolver
            .raw_comments(id)?
            .into_iter()
            .map(|(piece, comment)| DeclarationOutput {
                file: compilation
                    .file(piece.file())
                    .map(|f| ctx.relative_path(f.path()))
                    .unwrap_or_default(),
                line: piece.position.line + 1,
                role: piece.role.to_string(),
                has_comment: !comment.is_absent(),
            })
            .collect();

        symbols.push(SymbolOutput {
            id: compilation.doc_id(id)?,
            kind: symbol.kind.to_string(),
            partial: symbol.is_partial,
            documented,
            declarations,
        });
    }

    if ctx.is_text() {
        for symbol in &symbols {
            let locations: Vec<String> = symbol
                .declarations
                .iter()
                .map(|d| format!("{}:{} ({})", d.file, d.line, d.role))
                .collect();
            println!("{}\t{}\t{}", symbol.id, symbol.kind, locations.join(", "));
        }
        return Ok(());
    }

    ctx.print_success(SymbolsResponse {
        count: symbols.len(),
        symbols,
    });
    Ok(())
}
