//! Global Configuration Singleton

use std::sync::OnceLock;

use crate::models::config::CsdocConfig;
use crate::services::resolver::ResolverOptions;

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub max_file_size_bytes: u64,
    pub resolver: ResolverOptions,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from(&CsdocConfig::default())
    }
}

impl From<&CsdocConfig> for RuntimeConfig {
    fn from(config: &CsdocConfig) -> Self {
        Self {
            max_file_size_bytes: config.sources.max_file_size_bytes(),
            resolver: ResolverOptions::from(&config.resolver),
        }
    }
}

pub fn init(config: &CsdocConfig) {
    let _ = CONFIG.set(RuntimeConfig::from(config));
}

pub fn max_file_size_bytes() -> u64 {
    config().max_file_size_bytes
}

pub fn resolver_options() -> ResolverOptions {
    config().resolver
}

pub fn is_initialized() -> bool {
    CONFIG.get().is_some()
}

fn config() -> RuntimeConfig {
    CONFIG.get().cloned().unwrap_or_default()
}
