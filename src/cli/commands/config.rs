//! Config command implementation

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::App;
use crate::models::config::CsdocConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Initialize configuration file
    Init {
        /// Initialize global config (~/.config/csdoc)
        #[arg(long)]
        global: bool,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Show {
        /// Show global config only
        #[arg(long)]
        global: bool,
    },

    /// Show config file path
    Path {
        /// Show global config path
        #[arg(long)]
        global: bool,
    },
}

#[derive(Serialize)]
struct ConfigInitResponse {
    status: String,
    path: String,
    level: &'static str,
}

#[derive(Serialize)]
struct ConfigShowResponse<'a> {
    level: &'static str,
    config: &'a CsdocConfig,
}

#[derive(Serialize)]
struct ConfigPathResponse {
    level: &'static str,
    path: String,
    exists: bool,
}

pub async fn execute(args: ConfigArgs, app: &App) -> Result<()> {
    let ctx = &app.output;

    match args.command {
        ConfigCommand::Init { global, force } => {
            let level = if global { "global" } else { "project" };
            match app.config_service.init(global, force).await {
                Ok(path) => {
                    let response = ConfigInitResponse {
                        status: "created".to_string(),
                        path: if global {
                            path.display().to_string()
                        } else {
                            ctx.relative_path(&path)
                        },
                        level,
                    };
                    ctx.print_success_flat(response);
                }
                Err(e) => ctx.print_error(&e.to_string()),
            }
        }

        ConfigCommand::Show { global } => {
            let level = if global { "global" } else { "merged" };
            match app.config_service.load(global).await {
                Ok(config) if ctx.is_text() => {
                    let content = toml::to_string_pretty(&config)?;
                    println!("# {level}\n{content}");
                }
                Ok(config) => ctx.print_success_flat(ConfigShowResponse {
                    level,
                    config: &config,
                }),
                Err(e) => ctx.print_error(&e.to_string()),
            }
        }

        ConfigCommand::Path { global } => {
            let level = if global { "global" } else { "project" };
            let path = app.config_service.config_path(global);
            let response = ConfigPathResponse {
                level,
                path: if global {
                    path.display().to_string()
                } else {
                    ctx.relative_path(&path)
                },
                exists: path.exists(),
            };
            ctx.print_success_flat(response);
        }
    }

    Ok(())
}
