//! Application container for csdoc

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::{OutputContext, OutputFormat};
use crate::config;
use crate::error::CsdocResult;
use crate::models::config::CsdocConfig;
use crate::services::compilation::Compilation;
use crate::services::config::{ConfigService, DefaultConfigService};
use crate::services::loader::{DefaultSourceLoader, SourceLoader};
use crate::services::resolver::ResolverOptions;

pub struct App {
    root: PathBuf,
    pub(crate) output: OutputContext,
    pub(crate) config_service: Arc<dyn ConfigService>,
    pub(crate) loader: Arc<dyn SourceLoader>,
    pub(crate) config: CsdocConfig,
}

impl App {
    pub async fn new(format: Option<&str>) -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;

        tracing::debug!("Initializing csdoc at {:?}", root);

        let config_service = Arc::new(DefaultConfigService::new(&root));
        let config = match config_service.load(false).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                CsdocConfig::default()
            }
        };

        // Initialize global config singleton (thread-safe, no unsafe)
        config::init(&config);

        let format = OutputFormat::parse(format.unwrap_or(&config.output.format));
        let output = OutputContext::new(root.clone(), format);
        let loader = Arc::new(DefaultSourceLoader::new(&root, config.sources.clone()));

        Ok(Self {
            root,
            output,
            config_service,
            loader,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &CsdocConfig {
        &self.config
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        config::resolver_options()
    }

    /// Load and parse the C# sources under `paths`
    pub async fn compile(&self, paths: &[PathBuf]) -> CsdocResult<Compilation> {
        let sources = self.loader.load(paths).await?;
        let compilation = Compilation::parse(sources)?;
        tracing::debug!(
            "Compiled {} file(s), {} symbol(s)",
            compilation.files().len(),
            compilation.index().len()
        );
        Ok(compilation)
    }
}
