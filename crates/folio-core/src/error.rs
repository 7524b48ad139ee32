//! Error types for the Folio core library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Folio.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A single front matter field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: invalid `{field}` in `{slug}`: {reason}", .path.display())]
pub struct SchemaError {
    /// Slug of the offending document (or its raw file stem when no slug
    /// could be derived).
    pub slug: String,

    /// Source file of the offending document.
    pub path: PathBuf,

    /// Name of the offending front matter key.
    pub field: String,

    /// Human-readable explanation.
    pub reason: String,
}

impl SchemaError {
    /// Create a new schema error.
    pub fn new(
        slug: impl Into<String>,
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            path: path.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Two or more source files resolved to the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSlugError {
    /// The contested slug.
    pub slug: String,

    /// Every source file claiming the slug, sorted.
    pub paths: Vec<PathBuf>,
}

impl fmt::Display for DuplicateSlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate slug `{}` shared by ", self.slug)?;
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for DuplicateSlugError {}
