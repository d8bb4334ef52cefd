//! Output formatting for CLI commands

use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    /// Plain text for humans: raw XML, one line per symbol
    Text,
}

impl OutputFormat {
    /// Parse a format name, falling back to JSON for unknown values
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "text" | "plain" => Self::Text,
            "json" => Self::Json,
            other => {
                tracing::warn!("Unknown output format '{}', using json", other);
                Self::Json
            }
        }
    }
}

/// Output context for consistent formatting across commands
///
/// This is the single source of truth for output formatting.
/// All commands should use this context for output.
#[derive(Debug, Clone)]
pub struct OutputContext {
    /// Project root for relative path calculation
    root: PathBuf,
    format: OutputFormat,
}

impl OutputContext {
    pub fn new(root: PathBuf, format: OutputFormat) -> Self {
        Self { root, format }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Convert an absolute path to relative (if within project root)
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }

    /// Print a successful response
    pub fn print_success<T: Serialize>(&self, data: T) {
        let response = serde_json::json!({
            "success": true,
            "data": data
        });
        print_json(&response);
    }

    /// Print a successful response with flat structure (data fields at top level)
    pub fn print_success_flat<T: Serialize>(&self, data: T) {
        let mut response = serde_json::to_value(data).unwrap_or(serde_json::json!({}));
        if let Some(obj) = response.as_object_mut() {
            obj.insert("success".to_string(), serde_json::json!(true));
        }
        print_json(&response);
    }

    /// Print an error response
    pub fn print_error(&self, message: &str) {
        if self.is_text() {
            eprintln!("error: {message}");
            return;
        }
        let response = serde_json::json!({
            "success": false,
            "error": message
        });
        print_json(&response);
    }

    /// Print text as is, without a trailing newline of its own
    pub fn print_raw(&self, text: &str) {
        print!("{text}");
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}
