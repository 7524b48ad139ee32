//! Tags command - print every tag with its document count

use std::path::Path;

use color_eyre::eyre::Result;

use super::{load_collection, resolve_config};

/// Run the tags command.
pub fn run(config_path: &Path, dir: Option<&Path>, drafts: bool) -> Result<()> {
    let config = resolve_config(config_path, dir, drafts)?;
    let collection = load_collection(&config)?;

    let tags = collection.tags();
    if tags.is_empty() {
        println!("No tags");
        return Ok(());
    }

    let width = tags.iter().map(|t| t.tag.len()).max().unwrap_or(0);
    for entry in tags {
        println!("{:<width$}  {}", entry.tag, entry.count);
    }

    Ok(())
}
