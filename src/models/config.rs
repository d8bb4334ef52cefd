//! Configuration model for csdoc

use serde::{Deserialize, Serialize};

/// csdoc configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CsdocConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// What to emit for a partial method that was never implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnimplementedPartialPolicy {
    /// The method is not emitted, so it has no documentation
    #[default]
    Omit,
    /// Use the comment on the defining declaration
    Defining,
}

impl std::str::FromStr for UnimplementedPartialPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "defining" => Ok(Self::Defining),
            other => Err(format!("expected 'omit' or 'defining', got '{other}'")),
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResolverConfig {
    #[serde(default)]
    pub unimplemented_partial_methods: UnimplementedPartialPolicy,
}

/// Source discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "defaults::extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "defaults::ignored_paths")]
    pub ignored_paths: Vec<String>,

    #[serde(default = "defaults::max_file_size_mb")]
    pub max_file_size_mb: u32,

    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            extensions: defaults::extensions(),
            ignored_paths: defaults::ignored_paths(),
            max_file_size_mb: defaults::max_file_size_mb(),
            include_hidden: false,
        }
    }
}

impl SourcesConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        if self.max_file_size_mb == 0 {
            u64::MAX
        } else {
            u64::from(self.max_file_size_mb) * 1024 * 1024
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::format")]
    pub format: String,

    #[serde(default)]
    pub assembly_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: defaults::format(),
            assembly_name: None,
        }
    }
}

mod defaults {
    // Sources
    pub fn extensions() -> Vec<String> {
        vec!["cs".to_string()]
    }
    pub fn ignored_paths() -> Vec<String> {
        vec![
            "bin".to_string(),
            "obj".to_string(),
            "packages".to_string(),
            ".vs".to_string(),
            ".git".to_string(),
            ".csdoc".to_string(),
        ]
    }
    pub fn max_file_size_mb() -> u32 {
        5
    }

    // Output
    pub fn format() -> String {
        "json".to_string()
    }
}
