//! Emit command implementation
//!
//! Write the documentation XML file for all documented symbols.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::services::doc_file::write_documentation_file;

#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Source files or directories (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Assembly name written to <assembly> (default: config, then directory name)
    #[arg(short, long)]
    pub assembly: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct EmitResponse {
    assembly: String,
    members: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xml: Option<String>,
}

pub async fn execute(args: EmitArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let compilation = app.compile(&args.paths).await?;

    let assembly = args
        .assembly
        .or_else(|| app.config().output.assembly_name.clone())
        .or_else(|| {
            app.root()
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Assembly".to_string());

    let file = write_documentation_file(&compilation, &assembly, app.resolver_options())?;

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &file.xml).await?;
            tracing::debug!("Wrote {}", path.display());

            if ctx.is_text() {
                println!("{} member(s) written to {}", file.members, path.display());
            } else {
                ctx.print_success_flat(EmitResponse {
                    assembly: file.assembly,
                    members: file.members,
                    path: Some(ctx.relative_path(&path)),
                    xml: None,
                });
            }
        }
        None if ctx.is_text() => ctx.print_raw(&file.xml),
        None => ctx.print_success_flat(EmitResponse {
            assembly: file.assembly,
            members: file.members,
            path: None,
            xml: Some(file.xml),
        }),
    }

    Ok(())
}
