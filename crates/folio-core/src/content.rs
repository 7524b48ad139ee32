//! Content types and structures.

use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{error::SchemaError, frontmatter::Frontmatter, slug::slugify};

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Markdown content (.md, .markdown files).
    Markdown,
    /// Markdown with embedded components (.mdx files).
    Mdx,
}

impl ContentType {
    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            _ => None,
        }
    }
}

/// Parsed content path with slug extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    /// Original file path.
    pub path: PathBuf,

    /// URL slug derived from the path.
    pub slug: String,

    /// Content type based on extension.
    pub content_type: ContentType,
}

impl ContentPath {
    /// Derive the slug for a path relative to the source directory.
    ///
    /// - `hello-world.mdx` → `hello-world`
    /// - `My Post.md` → `my-post`
    /// - `hello/index.mdx` → `hello`
    /// - `Guides/Next JS/intro.md` → `guides/next-js/intro`
    ///
    /// Returns `Ok(None)` for files that are not content (unknown extension),
    /// and a schema error when the name leaves nothing to build a slug from.
    pub fn from_path(path: &Path) -> Result<Option<Self>, SchemaError> {
        let Some(content_type) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ContentType::from_extension)
        else {
            return Ok(None);
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut segments: Vec<String> = path
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        // `dir/index.md` is published as `dir`
        if !(stem == "index" && !segments.is_empty()) {
            segments.push(stem.clone());
        }

        let mut slug_parts = Vec::with_capacity(segments.len());
        for segment in &segments {
            let part = slugify(segment);
            if part.is_empty() {
                return Err(SchemaError::new(
                    stem,
                    path,
                    "slug",
                    format!("`{segment}` contains no characters usable in a slug"),
                ));
            }
            slug_parts.push(part);
        }

        Ok(Some(Self {
            path: path.to_path_buf(),
            slug: slug_parts.join("/"),
            content_type,
        }))
    }

    /// Like [`ContentPath::from_path`], but derives the slug from `path`
    /// relative to `root` while keeping `path` itself as the source.
    pub fn within(root: &Path, path: &Path) -> Result<Option<Self>, SchemaError> {
        let relative = path.strip_prefix(root).unwrap_or(path);
        match Self::from_path(relative) {
            Ok(Some(content_path)) => Ok(Some(Self {
                path: path.to_path_buf(),
                ..content_path
            })),
            Ok(None) => Ok(None),
            Err(err) => Err(SchemaError {
                path: path.to_path_buf(),
                ..err
            }),
        }
    }
}

/// A validated document ready to be handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier derived from the file name.
    pub slug: String,

    /// Document title.
    pub title: String,

    /// Publication date.
    pub published_at: NaiveDate,

    /// Last updated date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,

    /// Summary for listings.
    pub summary: String,

    /// Tags in first-seen order, deduplicated.
    pub tags: Vec<String>,

    /// Whether this is a draft.
    pub draft: bool,

    /// Raw body following the front matter; never interpreted.
    #[serde(skip)]
    pub body: String,

    /// Source file the document was loaded from.
    pub source_path: PathBuf,

    /// Content type based on extension.
    pub content_type: ContentType,
}

impl Document {
    /// Assemble a document from validated front matter and its content path.
    pub fn new(frontmatter: Frontmatter, body: String, content_path: ContentPath) -> Self {
        Self {
            slug: content_path.slug,
            title: frontmatter.title,
            published_at: frontmatter.published_at,
            updated_at: frontmatter.updated_at,
            summary: frontmatter.summary,
            tags: frontmatter.tags,
            draft: frontmatter.draft,
            body,
            source_path: content_path.path,
            content_type: content_path.content_type,
        }
    }

    /// Front matter view of this document.
    pub fn frontmatter(&self) -> Frontmatter {
        Frontmatter {
            title: self.title.clone(),
            published_at: self.published_at,
            updated_at: self.updated_at,
            summary: self.summary.clone(),
            tags: self.tags.clone(),
            draft: self.draft,
        }
    }

    /// Whether the document carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Get the URL path for this document.
    pub fn url_path(&self) -> String {
        format!("/{}", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_path(path: &str) -> ContentPath {
        ContentPath::from_path(Path::new(path))
            .expect("valid path")
            .expect("content file")
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(
            ContentType::from_extension("md"),
            Some(ContentType::Markdown)
        );
        assert_eq!(
            ContentType::from_extension("MD"),
            Some(ContentType::Markdown)
        );
        assert_eq!(
            ContentType::from_extension("markdown"),
            Some(ContentType::Markdown)
        );
        assert_eq!(ContentType::from_extension("mdx"), Some(ContentType::Mdx));
        assert_eq!(ContentType::from_extension("txt"), None);
    }

    #[test]
    fn test_content_path_simple() {
        let cp = content_path("hello-world.mdx");

        assert_eq!(cp.slug, "hello-world");
        assert_eq!(cp.content_type, ContentType::Mdx);
    }

    #[test]
    fn test_content_path_normalizes_stem() {
        assert_eq!(content_path("My Post.md").slug, "my-post");
        assert_eq!(content_path("my_post.mdx").slug, "my-post");
        assert_eq!(content_path("Café Notes.md").slug, "cafe-notes");
    }

    #[test]
    fn test_content_path_index_file() {
        assert_eq!(content_path("hello/index.mdx").slug, "hello");
        assert_eq!(content_path("index.mdx").slug, "index");
    }

    #[test]
    fn test_content_path_nested() {
        let cp = content_path("Guides/Next JS/intro.md");
        assert_eq!(cp.slug, "guides/next-js/intro");
        assert_eq!(cp.content_type, ContentType::Markdown);
    }

    #[test]
    fn test_content_path_within_root() {
        let cp = ContentPath::within(Path::new("/site/content"), Path::new("/site/content/a/b.md"))
            .expect("valid path")
            .expect("content file");
        assert_eq!(cp.slug, "a/b");
        assert_eq!(cp.path, PathBuf::from("/site/content/a/b.md"));

        let err = ContentPath::within(Path::new("/site"), Path::new("/site/!!.md")).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/site/!!.md"));
    }

    #[test]
    fn test_content_path_non_content() {
        assert!(ContentPath::from_path(Path::new("cover.png")).unwrap().is_none());
        assert!(ContentPath::from_path(Path::new("README")).unwrap().is_none());
    }

    #[test]
    fn test_content_path_unusable_name() {
        let err = ContentPath::from_path(Path::new("???.md")).unwrap_err();
        assert_eq!(err.field, "slug");
        assert_eq!(err.slug, "???");
    }

    #[test]
    fn test_document_from_frontmatter() {
        let fm = Frontmatter {
            title: "Animating with springs".to_string(),
            published_at: NaiveDate::from_ymd_opt(2021, 2, 8).expect("date"),
            updated_at: None,
            summary: "Physics-based motion.".to_string(),
            tags: vec!["animation".to_string()],
            draft: false,
        };
        let doc = Document::new(fm.clone(), "Body".to_string(), content_path("springs.mdx"));

        assert_eq!(doc.slug, "springs");
        assert_eq!(doc.url_path(), "/springs");
        assert_eq!(doc.source_path, PathBuf::from("springs.mdx"));
        assert!(doc.has_tag("animation"));
        assert!(!doc.has_tag("css"));
        assert_eq!(doc.frontmatter(), fm);
    }
}
