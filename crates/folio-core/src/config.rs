//! Loader configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Content source settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Content source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the documents.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// Whether to descend into subdirectories.
    #[serde(default)]
    pub recursive: bool,

    /// File extensions treated as documents.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether draft documents are kept in the collection.
    #[serde(default)]
    pub drafts: bool,
}

// Default value functions
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            recursive: false,
            extensions: default_extensions(),
            drafts: false,
        }
    }
}

impl ContentConfig {
    /// Whether `path` has one of the configured document extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    ///
    /// The file is optional here; a missing file yields the defaults plus any
    /// environment overrides. `FOLIO__CONTENT__EXTENSIONS` takes a
    /// comma-separated list.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("FOLIO")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("content.extensions")
    }

    fn load_layered(path: &Path, environment: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(environment)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.content.dir.as_os_str().is_empty() {
            return Err(CoreError::config("content.dir cannot be empty"));
        }

        if self.content.extensions.is_empty() {
            return Err(CoreError::config(
                "content.extensions must list at least one extension",
            ));
        }

        for ext in &self.content.extensions {
            if ext.starts_with('.') {
                tracing::warn!(%ext, "content.extensions entries should not start with a dot");
            }
        }

        Ok(())
    }
}
