//! Load failures.

use std::{fmt, io, path::PathBuf};

use folio_core::{DuplicateSlugError, SchemaError};
use thiserror::Error;

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// One problem found while loading a collection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A document file could not be read.
    #[error("{}: failed to read file: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document failed front matter validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Several files resolved to the same slug.
    #[error(transparent)]
    DuplicateSlug(#[from] DuplicateSlugError),
}

/// Every problem found during one load, in a stable order.
#[derive(Debug, Default)]
pub struct LoadReport {
    issues: Vec<LoadError>,
}

impl LoadReport {
    /// Create a report from collected issues.
    pub fn new(issues: Vec<LoadError>) -> Self {
        Self { issues }
    }

    /// All collected issues.
    pub fn issues(&self) -> &[LoadError] {
        &self.issues
    }

    /// Number of collected issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Schema errors only.
    pub fn schema_errors(&self) -> impl Iterator<Item = &SchemaError> {
        self.issues.iter().filter_map(|issue| match issue {
            LoadError::Schema(err) => Some(err),
            _ => None,
        })
    }

    /// Duplicate slug errors only.
    pub fn duplicate_slugs(&self) -> impl Iterator<Item = &DuplicateSlugError> {
        self.issues.iter().filter_map(|issue| match issue {
            LoadError::DuplicateSlug(err) => Some(err),
            _ => None,
        })
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.issues.len();
        write!(
            f,
            "{n} problem{} found while loading content",
            if n == 1 { "" } else { "s" }
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadReport {}

/// Collection errors.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The source directory is missing or unreadable.
    #[error("cannot read content directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more documents are invalid; nothing was loaded.
    #[error(transparent)]
    Invalid(#[from] LoadReport),

    /// No document has the requested slug.
    #[error("no document with slug `{slug}`")]
    NotFound { slug: String },
}

impl CollectionError {
    /// The load report, when the load failed on document contents.
    pub fn report(&self) -> Option<&LoadReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}
