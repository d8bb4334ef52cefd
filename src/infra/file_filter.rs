//! Source file discovery with .gitignore integration
//!
//! Uses the `ignore` crate (from ripgrep) for gitignore-style pattern matching.
//! `.csdoc/ignore` adds project-specific patterns on top of `.gitignore`.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::models::config::SourcesConfig;

/// File filter configuration
#[derive(Debug, Clone)]
pub struct FileFilterConfig {
    /// Root directory for relative path resolution
    pub root: PathBuf,
    /// Use .gitignore files for filtering
    pub respect_gitignore: bool,
    /// Use .csdoc/ignore file for filtering
    pub respect_csdoc_ignore: bool,
    /// Directory or file names skipped anywhere below the root
    pub ignored_paths: Vec<String>,
    /// Hidden files/directories (starting with .)
    pub include_hidden: bool,
}

impl Default for FileFilterConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            respect_gitignore: true,
            respect_csdoc_ignore: true,
            ignored_paths: DEFAULT_IGNORED_PATHS.iter().map(|s| s.to_string()).collect(),
            include_hidden: false,
        }
    }
}

pub struct FileFilter {
    config: FileFilterConfig,
    gitignore: Option<Gitignore>,
    csdoc_ignore: Option<Gitignore>,
}

impl FileFilter {
    pub fn new(config: FileFilterConfig) -> Self {
        let gitignore = if config.respect_gitignore {
            Self::load_ignore_file(&config.root, &config.root.join(".gitignore"))
        } else {
            None
        };

        let csdoc_ignore = if config.respect_csdoc_ignore {
            Self::load_ignore_file(&config.root, &config.root.join(".csdoc").join("ignore"))
        } else {
            None
        };

        Self {
            config,
            gitignore,
            csdoc_ignore,
        }
    }

    /// Filter for a project root using the `[sources]` configuration
    pub fn from_sources(root: impl AsRef<Path>, sources: &SourcesConfig) -> Self {
        Self::new(FileFilterConfig {
            root: root.as_ref().to_path_buf(),
            ignored_paths: sources.ignored_paths.clone(),
            include_hidden: sources.include_hidden,
            ..Default::default()
        })
    }

    fn load_ignore_file(root: &Path, path: &Path) -> Option<Gitignore> {
        if !path.exists() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(path) {
            tracing::warn!("Failed to parse {}: {}", path.display(), err);
        }

        builder.build().ok()
    }

    /// Check if a path should be ignored
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.config.root).unwrap_or(path);
        let is_dir = path.is_dir();

        for component in relative.components() {
            let std::path::Component::Normal(name) = component else {
                continue;
            };
            let Some(name) = name.to_str() else {
                continue;
            };
            if self.config.ignored_paths.iter().any(|p| p == name) {
                return true;
            }
            if !self.config.include_hidden && name.starts_with('.') {
                return true;
            }
        }

        // .csdoc/ignore wins over .gitignore
        for matcher in [&self.csdoc_ignore, &self.gitignore].into_iter().flatten() {
            match matcher.matched_path_or_any_parents(relative, is_dir) {
                ignore::Match::Ignore(_) => return true,
                ignore::Match::Whitelist(_) => return false,
                ignore::Match::None => {}
            }
        }

        false
    }

    pub fn should_include(&self, path: &Path) -> bool {
        !self.is_ignored(path)
    }

    fn walk_builder(&self) -> WalkBuilder {
        let mut builder = WalkBuilder::new(&self.config.root);
        builder
            .hidden(!self.config.include_hidden)
            .require_git(false)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore);
        builder
    }

    /// Files under the root with one of the given extensions, sorted by path
    pub fn discover_files(&self, extensions: &[String]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .walk_builder()
            .build()
            .filter_map(|e| e.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file())
            .filter(|path| {
                extensions.is_empty()
                    || path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|ext| extensions.iter().any(|x| x == ext))
            })
            .filter(|path| self.should_include(path))
            .collect();

        files.sort();
        files
    }
}

/// Build and tooling directories of .NET projects
pub const DEFAULT_IGNORED_PATHS: &[&str] = &["bin", "obj", "packages", ".vs", ".git", ".csdoc"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cs_extensions() -> Vec<String> {
        vec!["cs".to_string()]
    }

    #[test]
    fn test_gitignore_integration() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join(".gitignore"), "Generated/\n*.g.cs\n").unwrap();
        fs::write(root.join("Program.cs"), "class Program { }").unwrap();
        fs::write(root.join("Model.g.cs"), "class Model { }").unwrap();
        fs::create_dir(root.join("Generated")).unwrap();
        fs::write(root.join("Generated/Api.cs"), "class Api { }").unwrap();

        let filter = FileFilter::new(FileFilterConfig {
            root: root.to_path_buf(),
            ..Default::default()
        });

        assert!(filter.should_include(&root.join("Program.cs")));
        assert!(!filter.should_include(&root.join("Model.g.cs")));
        assert!(!filter.should_include(&root.join("Generated/Api.cs")));
    }

    #[test]
    fn test_csdoc_ignore() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join(".csdoc")).unwrap();
        fs::write(root.join(".csdoc/ignore"), "*.Tests.cs\n").unwrap();
        fs::write(root.join("Foo.cs"), "class Foo { }").unwrap();
        fs::write(root.join("Foo.Tests.cs"), "class FooTests { }").unwrap();

        let filter = FileFilter::from_sources(root, &SourcesConfig::default());
        assert!(filter.should_include(&root.join("Foo.cs")));
        assert!(!filter.should_include(&root.join("Foo.Tests.cs")));
    }

    #[test]
    fn test_discover_skips_build_output_and_sorts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("obj/Debug")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("obj/Debug/AssemblyInfo.cs"), "").unwrap();
        fs::write(root.join("src/B.cs"), "class B { }").unwrap();
        fs::write(root.join("src/A.cs"), "class A { }").unwrap();
        fs::write(root.join("src/readme.md"), "# readme").unwrap();

        let filter = FileFilter::from_sources(root, &SourcesConfig::default());
        let files = filter.discover_files(&cs_extensions());
        assert_eq!(files, vec![root.join("src/A.cs"), root.join("src/B.cs")]);
    }
}
