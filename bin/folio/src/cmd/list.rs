//! List command - print documents in collection order

use std::path::Path;

use color_eyre::eyre::Result;
use folio_core::Document;

use super::{load_collection, resolve_config};

/// Run the list command.
///
/// Prints one line per document, newest first, optionally limited to a tag.
pub fn run(config_path: &Path, dir: Option<&Path>, tag: Option<&str>, drafts: bool) -> Result<()> {
    let config = resolve_config(config_path, dir, drafts)?;
    let collection = load_collection(&config)?;

    let documents: Vec<&Document> = match tag {
        Some(tag) => collection.list_by_tag(tag),
        None => collection.iter().collect(),
    };

    if documents.is_empty() {
        match tag {
            Some(tag) => println!("No documents tagged `{tag}`"),
            None => println!("No documents"),
        }
        return Ok(());
    }

    for doc in documents {
        println!("{}", listing_line(doc));
    }

    Ok(())
}

/// Format a document as `DATE  SLUG  TITLE`, marking drafts.
pub fn listing_line(doc: &Document) -> String {
    let draft = if doc.draft { " [draft]" } else { "" };
    format!("{}  {}  {}{draft}", doc.published_at, doc.slug, doc.title)
}
