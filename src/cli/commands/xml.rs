//! Xml command implementation

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::services::resolver::DocumentationResolver;

#[derive(Args, Debug)]
pub struct XmlArgs {
    /// Documentation ID, e.g. "T:Acme.Widget" or "M:Acme.Widget.Run(System.Int32)"
    pub doc_id: String,

    /// Source files or directories (default: current directory)
    pub paths: Vec<PathBuf>,
}

#[derive(Serialize)]
struct XmlResponse {
    id: String,
    documented: bool,
    xml: String,
}

pub async fn execute(args: XmlArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let compilation = app.compile(&args.paths).await?;

    let id = compilation
        .find_by_doc_id(&args.doc_id)
        .ok_or_else(|| anyhow!("Symbol not found: {}", args.doc_id))?;
    let xml = DocumentationResolver::with_options(&compilation, app.resolver_options())
        .documentation_xml(id)?;

    if ctx.is_text() {
        ctx.print_raw(&xml);
        return Ok(());
    }

    ctx.print_success_flat(XmlResponse {
        id: args.doc_id,
        documented: !xml.is_empty(),
        xml,
    });
    Ok(())
}
