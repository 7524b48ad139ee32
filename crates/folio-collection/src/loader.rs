//! Content loading.
//!
//! Scans the source directory, parses every document and validates it. The
//! load is all-or-nothing: if any document is broken, the caller gets a
//! [`LoadReport`] listing every problem instead of a partial collection.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use folio_core::{
    ContentPath, Document, SchemaError, config::ContentConfig, frontmatter::parse_frontmatter,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    collection::{Collection, find_duplicates},
    error::{CollectionError, LoadError, LoadReport, Result},
};

/// Load every document in `source_dir` with default settings.
pub fn load(source_dir: impl AsRef<Path>) -> Result<Collection> {
    ContentLoader::default().load_dir(source_dir.as_ref())
}

/// Loader that turns a content directory into a [`Collection`].
#[derive(Debug, Clone, Default)]
pub struct ContentLoader {
    config: ContentConfig,
}

impl ContentLoader {
    /// Create a new loader.
    #[must_use]
    pub fn new(config: ContentConfig) -> Self {
        Self { config }
    }

    /// Include or exclude draft documents.
    #[must_use]
    pub fn with_drafts(mut self, drafts: bool) -> Self {
        self.config.drafts = drafts;
        self
    }

    /// Descend into subdirectories.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Load the configured content directory.
    pub fn load(&self) -> Result<Collection> {
        self.load_dir(&self.config.dir)
    }

    /// Load all documents in `dir`.
    pub fn load_dir(&self, dir: &Path) -> Result<Collection> {
        info!(dir = %dir.display(), recursive = self.config.recursive, "loading content");

        let files = self.find_content_files(dir)?;
        info!(count = files.len(), "found content files");

        // Slugs come from paths alone, so collisions are known before any
        // file is read, including files that later fail validation.
        let scanned: Vec<_> = files
            .iter()
            .map(|path| self.content_path(dir, path))
            .collect();
        let duplicates = find_duplicates(
            scanned
                .iter()
                .flatten()
                .map(|cp| (cp.slug.as_str(), cp.path.as_path())),
        );

        let results: Vec<_> = scanned
            .into_par_iter()
            .map(|entry| match entry {
                Ok(content_path) => load_document(content_path),
                Err(err) => Err(vec![LoadError::Schema(err)]),
            })
            .collect();

        let mut documents = Vec::with_capacity(results.len());
        let mut issues = Vec::new();
        for result in results {
            match result {
                Ok(doc) => documents.push(doc),
                Err(errors) => issues.extend(errors),
            }
        }
        issues.extend(duplicates);

        if !issues.is_empty() {
            return Err(self.fail(LoadReport::new(issues)));
        }

        let collection =
            Collection::from_documents(documents).map_err(|report| self.fail(report))?;

        let collection = if self.config.drafts {
            collection
        } else {
            let published = collection.filtered(|doc| !doc.draft);
            let skipped = collection.len() - published.len();
            if skipped > 0 {
                debug!(skipped, "excluding drafts");
            }
            published
        };

        info!(
            documents = collection.len(),
            tags = collection.tags().len(),
            "content load complete"
        );

        Ok(collection)
    }

    fn fail(&self, report: LoadReport) -> CollectionError {
        warn!(problems = report.len(), "content load failed");
        CollectionError::Invalid(report)
    }

    /// Find all document files, sorted by path.
    ///
    /// Dangling symlinks with a content extension are kept so the read
    /// failure shows up in the load report.
    fn find_content_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let dir_error = |source: io::Error| CollectionError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(dir).map_err(dir_error)?;
        if !metadata.is_dir() {
            return Err(dir_error(io::Error::new(
                io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }

        let mut files = Vec::new();
        if self.config.recursive {
            let walker = WalkDir::new(dir)
                .follow_links(true)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && self.is_content_file(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Err(err) => {
                        if let Some(path) = err.path().filter(|p| is_dangling_symlink(p)) {
                            if !is_hidden(path) && self.is_content_file(path) {
                                files.push(path.to_path_buf());
                            }
                            continue;
                        }
                        let path = err.path().unwrap_or(dir).to_path_buf();
                        return Err(CollectionError::Io {
                            path,
                            source: err.into(),
                        });
                    }
                }
            }
        } else {
            for entry in fs::read_dir(dir).map_err(dir_error)? {
                let path = entry.map_err(dir_error)?.path();
                if (path.is_file() || is_dangling_symlink(&path))
                    && !is_hidden(&path)
                    && self.is_content_file(&path)
                {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_content_file(&self, path: &Path) -> bool {
        if !self.config.accepts(path) {
            debug!(path = %path.display(), "skipping non-content file");
            return false;
        }
        true
    }

    fn content_path(
        &self,
        root: &Path,
        path: &Path,
    ) -> std::result::Result<ContentPath, SchemaError> {
        match ContentPath::within(root, path)? {
            Some(content_path) => Ok(content_path),
            None => {
                warn!(
                    path = %path.display(),
                    "configured extension is not a known content type; treating as markdown"
                );
                markdown_fallback(root, path)
            }
        }
    }
}

/// Read, parse and validate a single document.
fn load_document(content_path: ContentPath) -> std::result::Result<Document, Vec<LoadError>> {
    let path = &content_path.path;
    debug!(path = %path.display(), "loading file");

    let content = fs::read_to_string(path).map_err(|source| {
        vec![LoadError::Io {
            path: path.clone(),
            source,
        }]
    })?;

    let (frontmatter, body) = parse_frontmatter(&content, &content_path.slug, path)
        .map_err(|errors| errors.into_iter().map(LoadError::Schema).collect::<Vec<_>>())?;

    Ok(Document::new(frontmatter, body, content_path))
}

/// Derive a content path for a file whose extension was configured but is not
/// a built-in content type.
fn markdown_fallback(root: &Path, path: &Path) -> std::result::Result<ContentPath, SchemaError> {
    let as_markdown = path.with_extension("md");
    let content_path = ContentPath::within(root, &as_markdown)
        .map_err(|err| SchemaError {
            path: path.to_path_buf(),
            ..err
        })?
        .ok_or_else(|| SchemaError::new("", path, "slug", "cannot derive a slug from this path"))?;

    Ok(ContentPath {
        path: path.to_path_buf(),
        ..content_path
    })
}

fn is_dangling_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
        && fs::metadata(path).is_err()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write file");
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\npublishedAt: {date}\nsummary: About {title}\n---\n\nBody\n")
    }

    #[test]
    fn test_non_content_files_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "a.md", &post("A", "2021-01-01"));
        write(dir.path(), "cover.png", "binary");
        write(dir.path(), ".hidden.md", "not even front matter");

        let collection = load(dir.path()).expect("load");
        assert_eq!(collection.len(), 1);
        assert!(collection.by_slug("a").is_some());
    }

    #[test]
    fn test_non_recursive_ignores_subdirectories() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "top.md", &post("Top", "2021-01-01"));
        write(dir.path(), "nested/deep.md", &post("Deep", "2021-01-02"));

        let collection = load(dir.path()).expect("load");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_recursive_nested_slugs() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "top.md", &post("Top", "2021-01-01"));
        write(dir.path(), "Guides/intro.mdx", &post("Intro", "2021-01-02"));
        write(dir.path(), "Guides/setup/index.md", &post("Setup", "2021-01-03"));
        write(dir.path(), ".git/notes.md", "ignored");

        let collection = ContentLoader::default()
            .recursive(true)
            .load_dir(dir.path())
            .expect("load");

        let slugs: Vec<_> = collection.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["guides/setup", "guides/intro", "top"]);
    }

    #[test]
    fn test_drafts_excluded_by_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "live.md", &post("Live", "2021-01-01"));
        write(
            dir.path(),
            "wip.md",
            "---\ntitle: WIP\npublishedAt: 2021-02-01\nsummary: s\ndraft: true\n---\n",
        );

        let published = load(dir.path()).expect("load");
        assert_eq!(published.len(), 1);
        assert!(published.by_slug("wip").is_none());

        let everything = ContentLoader::default()
            .with_drafts(true)
            .load_dir(dir.path())
            .expect("load");
        assert_eq!(everything.len(), 2);
        assert!(everything.by_slug("wip").is_some_and(|d| d.draft));
    }

    #[test]
    fn test_drafts_still_count_for_duplicates() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "post.md", &post("Post", "2021-01-01"));
        write(
            dir.path(),
            "Post.mdx",
            "---\ntitle: Post\npublishedAt: 2021-02-01\nsummary: s\ndraft: true\n---\n",
        );

        let err = load(dir.path()).unwrap_err();
        let report = err.report().expect("report");
        assert_eq!(report.duplicate_slugs().count(), 1);
    }

    #[test]
    fn test_custom_extension_treated_as_markdown() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "note.txt", &post("Note", "2021-01-01"));

        let config = ContentConfig {
            extensions: vec!["txt".to_string()],
            ..ContentConfig::default()
        };
        let collection = ContentLoader::new(config).load_dir(dir.path()).expect("load");
        let doc = collection.by_slug("note").expect("loaded");
        assert_eq!(doc.source_path, dir.path().join("note.txt"));
    }

    #[test]
    fn test_source_dir_is_a_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "a.md", &post("A", "2021-01-01"));

        let err = load(dir.path().join("a.md")).unwrap_err();
        assert!(matches!(err, CollectionError::Io { .. }));
    }

    #[test]
    fn test_load_uses_configured_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "a.md", &post("A", "2021-01-01"));

        let config = ContentConfig {
            dir: dir.path().to_path_buf(),
            ..ContentConfig::default()
        };
        let collection = ContentLoader::new(config).load().expect("load");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_unreadable_file_reported_with_schema_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).expect("write file");
        write(
            dir.path(),
            "broken.md",
            "---\ntitle: Broken\npublishedAt: 2021-01-01\n---\n",
        );
        write(dir.path(), "fine.md", &post("Fine", "2021-01-02"));

        let err = load(dir.path()).unwrap_err();
        let report = err.report().expect("report");

        assert_eq!(report.len(), 2);
        assert!(matches!(
            &report.issues()[0],
            LoadError::Io { path, .. } if path.ends_with("binary.md")
        ));
        assert!(matches!(
            &report.issues()[1],
            LoadError::Schema(e) if e.slug == "broken" && e.field == "summary"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_reported_in_both_modes() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "fine.md", &post("Fine", "2021-01-02"));
        std::os::unix::fs::symlink(dir.path().join("missing.md"), dir.path().join("ghost.md"))
            .expect("symlink");
        std::os::unix::fs::symlink(dir.path().join("missing.png"), dir.path().join("ghost.png"))
            .expect("symlink");

        for recursive in [false, true] {
            let err = ContentLoader::default()
                .recursive(recursive)
                .load_dir(dir.path())
                .unwrap_err();
            let report = err.report().expect("report");

            assert_eq!(report.len(), 1, "recursive = {recursive}");
            assert!(
                matches!(
                    &report.issues()[0],
                    LoadError::Io { path, .. } if path.ends_with("ghost.md")
                ),
                "recursive = {recursive}"
            );
        }
    }
}
