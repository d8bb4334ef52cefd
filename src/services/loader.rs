//! Source loading for the CLI

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::compilation::SourceText;
use crate::error::SourceError;
use crate::infra::file_filter::FileFilter;
use crate::models::config::SourcesConfig;

#[async_trait]
pub trait SourceLoader: Send + Sync {
    /// Read every C# source under `paths`. Directories are walked, files are
    /// read as given. The result is sorted by path.
    async fn load(&self, paths: &[PathBuf]) -> Result<Vec<SourceText>, SourceError>;
}

pub struct DefaultSourceLoader {
    root: PathBuf,
    sources: SourcesConfig,
}

impl DefaultSourceLoader {
    pub fn new(root: &Path, sources: SourcesConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            sources,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, SourceError> {
        let roots = if paths.is_empty() {
            vec![self.root.clone()]
        } else {
            paths.iter().map(|p| self.resolve(p)).collect()
        };

        let mut files = Vec::new();
        for path in roots {
            if path.is_dir() {
                files.extend(
                    FileFilter::from_sources(&path, &self.sources)
                        .discover_files(&self.sources.extensions),
                );
            } else if path.is_file() {
                files.push(path);
            } else {
                return Err(SourceError::NotFound(path));
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    async fn read_source(path: &Path, limit: u64) -> Result<Option<SourceText>, SourceError> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > limit {
            let err = SourceError::FileTooLarge {
                path: path.display().to_string(),
                size_mb: size / (1024 * 1024),
                limit_mb: limit / (1024 * 1024),
            };
            tracing::warn!("Skipping: {}", err);
            return Ok(None);
        }

        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(SourceText::new(path, text))),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!("Skipping non-UTF-8 file {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SourceLoader for DefaultSourceLoader {
    async fn load(&self, paths: &[PathBuf]) -> Result<Vec<SourceText>, SourceError> {
        let files = self.discover(paths)?;
        let limit = crate::config::max_file_size_bytes();

        let mut sources = Vec::with_capacity(files.len());
        for path in &files {
            if let Some(source) = Self::read_source(path, limit).await? {
                sources.push(source);
            }
        }

        if sources.is_empty() {
            return Err(SourceError::Empty(self.root.clone()));
        }
        tracing::debug!("Loaded {} source file(s)", sources.len());
        Ok(sources)
    }
}
