//! Folio CLI Library
//!
//! Command implementations for the `folio` binary. Each command loads the
//! content collection once and reports on it.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, list, show, tags)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Validate every document under the configured content directory
//! cmd::check::run(Path::new("folio.toml"), None, false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use folio_collection::{Collection, ContentLoader};
pub use folio_core::{Config, Document};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
