//! Command implementations.

pub mod check;
pub mod list;
pub mod show;
pub mod tags;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_collection::{Collection, CollectionError, ContentLoader};
use folio_core::Config;

/// Resolve configuration for a command.
///
/// The config file is optional; `FOLIO__CONTENT__*` environment variables
/// and the `dir`/`drafts` command-line overrides are applied on top.
pub fn resolve_config(config_path: &Path, dir: Option<&Path>, drafts: bool) -> Result<Config> {
    let mut config = Config::load_with_env(config_path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))?;

    if let Some(dir) = dir {
        config.content.dir = dir.to_path_buf();
    }
    config.content.drafts |= drafts;

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Load the collection described by `config`.
pub fn load_collection(config: &Config) -> std::result::Result<Collection, CollectionError> {
    ContentLoader::new(config.content.clone()).load()
}
