//! Folio Collection Library
//!
//! Loads a directory of documents into an immutable, ordered [`Collection`].
//!
//! # Modules
//!
//! - [`loader`] - Directory scan, parsing and validation
//! - [`collection`] - The immutable document index and its queries
//! - [`error`] - Load failures and the aggregated load report
//!
//! # Example
//!
//! ```no_run
//! let collection = folio_collection::load("content")?;
//! for doc in collection.list_by_tag("css") {
//!     println!("{} {}", doc.published_at, doc.title);
//! }
//! # Ok::<(), folio_collection::CollectionError>(())
//! ```

pub mod collection;
pub mod error;
pub mod loader;

pub use collection::{Collection, TagCount};
pub use error::{CollectionError, LoadError, LoadReport, Result};
pub use folio_core::Document;
pub use loader::{ContentLoader, load};
