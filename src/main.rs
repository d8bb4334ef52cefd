//! csdoc - C# documentation comment resolver CLI
//!
//! Merges the documentation comments of partial C# declarations and prints
//! them as documentation-file XML.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use csdoc::app::App;
use csdoc::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Quiet by default; RUST_LOG overrides, -v turns on debug output
    let default_filter = if cli.verbose { "csdoc=debug" } else { "csdoc=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    // Run async main and handle errors with JSON output
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!(
                r#"{{"success":false,"error":"Failed to create runtime: {}"}}"#,
                e
            );
            std::process::exit(1);
        }
    };
    let result = runtime.block_on(async_main(cli));

    if let Err(e) = result {
        let response = serde_json::json!({
            "success": false,
            "error": e.to_string()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| { format!(r#"{{"success":false,"error":"{}"}}"#, e) })
        );
        std::process::exit(2);
    }
}

async fn async_main(cli: Cli) -> anyhow::Result<()> {
    let app = App::new(cli.format.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize: {}", e))?;

    execute_command(cli.command, &app).await
}

async fn execute_command(command: Commands, app: &App) -> anyhow::Result<()> {
    use csdoc::cli::commands;

    match command {
        Commands::Symbols(args) => commands::symbols::execute(args, app).await,
        Commands::Xml(args) => commands::xml::execute(args, app).await,
        Commands::Emit(args) => commands::emit::execute(args, app).await,
        Commands::Config(args) => commands::config::execute(args, app).await,
    }
}
