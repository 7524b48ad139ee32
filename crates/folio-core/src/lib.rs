//! Folio Core Library
//!
//! Document model, front matter schema, slug derivation and configuration for
//! the Folio content loader.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod slug;

pub use config::Config;
pub use content::{ContentPath, ContentType, Document};
pub use error::{CoreError, DuplicateSlugError, Result, SchemaError};
pub use frontmatter::Frontmatter;
