//! Show command - print one document's metadata

use std::path::Path;

use color_eyre::eyre::Result;
use folio_core::Document;

use super::{load_collection, resolve_config};

/// Run the show command.
pub fn run(config_path: &Path, dir: Option<&Path>, slug: &str, body: bool) -> Result<()> {
    let config = resolve_config(config_path, dir, true)?;
    let collection = load_collection(&config)?;
    let doc = collection.get_or_err(slug)?;

    print!("{}", describe(doc));
    if body {
        println!();
        println!("{}", doc.body);
    }

    Ok(())
}

/// Render a document's metadata as aligned `key: value` lines.
pub fn describe(doc: &Document) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &str| {
        out.push_str(&format!("{key:<12} {value}\n"));
    };

    line("slug:", &doc.slug);
    line("title:", &doc.title);
    line("published:", &doc.published_at.to_string());
    if let Some(updated) = doc.updated_at {
        line("updated:", &updated.to_string());
    }
    line("summary:", &doc.summary);
    if !doc.tags.is_empty() {
        line("tags:", &doc.tags.join(", "));
    }
    if doc.draft {
        line("draft:", "yes");
    }
    line("url:", &doc.url_path());
    line("source:", &doc.source_path.display().to_string());

    out
}
