//! Configuration service for csdoc

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ConfigError;
use crate::models::config::CsdocConfig;

#[async_trait]
pub trait ConfigService: Send + Sync {
    async fn load(&self, global_only: bool) -> Result<CsdocConfig, ConfigError>;
    fn config_path(&self, global: bool) -> PathBuf;
    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError>;
}

pub struct DefaultConfigService {
    root: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/csdoc/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csdoc")
            .join("config.toml")
    }

    fn project_config_path(&self) -> PathBuf {
        self.root.join(".csdoc").join("config.toml")
    }

    async fn load_from_path(path: &Path) -> Result<Option<CsdocConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(path).await?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    async fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let config = CsdocConfig::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigService for DefaultConfigService {
    async fn load(&self, global_only: bool) -> Result<CsdocConfig, ConfigError> {
        let global = Self::load_from_path(&Self::global_config_path())
            .await?
            .unwrap_or_default();
        if global_only {
            return Ok(global);
        }

        let config = match Self::load_from_path(&self.project_config_path()).await? {
            Some(project) => merge_config(global, project),
            None => global,
        };
        apply_env_overrides(config)
    }

    fn config_path(&self, global: bool) -> PathBuf {
        if global {
            Self::global_config_path()
        } else {
            self.project_config_path()
        }
    }

    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!(
                    "Config already exists: {}. Use --force to overwrite.",
                    path.display()
                ),
            });
        }

        Self::write_default_config(&path).await?;
        Ok(path)
    }
}

/// Project settings replace global ones section by section. The assembly
/// name falls back to the global value.
fn merge_config(base: CsdocConfig, overlay: CsdocConfig) -> CsdocConfig {
    CsdocConfig {
        resolver: overlay.resolver,
        sources: overlay.sources,
        output: crate::models::config::OutputConfig {
            format: overlay.output.format,
            assembly_name: overlay.output.assembly_name.or(base.output.assembly_name),
        },
    }
}

fn apply_env_overrides(mut config: CsdocConfig) -> Result<CsdocConfig, ConfigError> {
    if let Ok(val) = std::env::var("CSDOC_OUTPUT_FORMAT") {
        config.output.format = val;
    }
    if let Ok(val) = std::env::var("CSDOC_UNIMPLEMENTED_PARTIAL_METHODS") {
        config.resolver.unimplemented_partial_methods =
            val.parse().map_err(|message| ConfigError::InvalidValue {
                key: "CSDOC_UNIMPLEMENTED_PARTIAL_METHODS".to_string(),
                message,
            })?;
    }
    if let Ok(val) = std::env::var("CSDOC_MAX_FILE_SIZE_MB")
        && let Ok(limit) = val.parse()
    {
        config.sources.max_file_size_mb = limit;
    }
    Ok(config)
}
