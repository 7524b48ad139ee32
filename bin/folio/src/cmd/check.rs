//! Check command - validate every document in the collection

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_collection::{Collection, CollectionError};

use super::{load_collection, resolve_config};

/// Run the check command.
///
/// Loads the whole collection and prints every problem found, so all of them
/// can be fixed in one pass. Fails when any document is invalid.
pub fn run(config_path: &Path, dir: Option<&Path>, strict: bool) -> Result<()> {
    let config = resolve_config(config_path, dir, true)?;
    tracing::info!(dir = %config.content.dir.display(), strict, "Checking content");

    println!("Checking {}...", config.content.dir.display());

    match load_collection(&config) {
        Ok(collection) => {
            print_summary(&collection);

            let warnings = collect_warnings(&collection);
            for warning in &warnings {
                println!("  ⚠ {warning}");
            }

            if strict && !warnings.is_empty() {
                bail!(
                    "Validation failed with {} warning(s) (strict mode)",
                    warnings.len()
                );
            }

            println!();
            println!("✓ All checks passed");
            Ok(())
        }
        Err(CollectionError::Invalid(report)) => {
            println!();
            println!("Errors:");
            for issue in report.issues() {
                println!("  ✗ {issue}");
            }
            bail!("Validation failed with {} problem(s)", report.len());
        }
        Err(err) => Err(err.into()),
    }
}

fn print_summary(collection: &Collection) {
    let drafts = collection.iter().filter(|d| d.draft).count();
    println!(
        "  ✓ {} document(s) valid ({} draft, {} tag(s))",
        collection.len(),
        drafts,
        collection.tags().len()
    );
}

/// Non-fatal observations about an otherwise valid collection.
fn collect_warnings(collection: &Collection) -> Vec<String> {
    let mut warnings = Vec::new();

    if collection.is_empty() {
        warnings.push("content directory contains no documents".to_string());
    }

    for doc in collection {
        if doc.body.trim().is_empty() {
            warnings.push(format!("{}: document body is empty", doc.source_path.display()));
        }
    }

    let tags = collection.tags();
    for (i, a) in tags.iter().enumerate() {
        for b in &tags[i + 1..] {
            if a.tag.eq_ignore_ascii_case(b.tag) {
                warnings.push(format!(
                    "tags `{}` and `{}` differ only in case",
                    a.tag, b.tag
                ));
            }
        }
    }

    warnings
}
