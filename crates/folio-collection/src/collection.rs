//! The immutable document index.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};

use folio_core::{Document, DuplicateSlugError};

use crate::error::{CollectionError, LoadError, LoadReport, Result};

/// A tag and the number of documents carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCount<'a> {
    /// Tag name.
    pub tag: &'a str,

    /// Number of documents with this tag.
    pub count: usize,
}

/// Immutable, ordered snapshot of loaded documents.
///
/// Documents are ordered by publication date (newest first), then by slug.
/// Cloning is cheap: clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    documents: Arc<[Document]>,
    by_slug: Arc<HashMap<String, usize>>,
}

/// Listing order: `published_at` descending, then `slug` ascending.
pub fn listing_order(a: &Document, b: &Document) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| a.slug.cmp(&b.slug))
}

impl Collection {
    /// Build a collection from validated documents.
    ///
    /// Fails with one [`DuplicateSlugError`] per contested slug, naming every
    /// source file involved. Input order does not affect the result.
    pub fn from_documents(
        mut documents: Vec<Document>,
    ) -> std::result::Result<Self, LoadReport> {
        let duplicates = find_duplicates(
            documents
                .iter()
                .map(|doc| (doc.slug.as_str(), doc.source_path.as_path())),
        );
        if !duplicates.is_empty() {
            return Err(LoadReport::new(duplicates));
        }

        documents.sort_by(listing_order);
        Ok(Self::from_sorted(documents))
    }

    fn from_sorted(documents: Vec<Document>) -> Self {
        let by_slug: HashMap<String, usize> = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| (doc.slug.clone(), index))
            .collect();

        Self {
            documents: documents.into(),
            by_slug: Arc::new(by_slug),
        }
    }

    /// A new collection holding only the documents matching `predicate`.
    pub fn filtered(&self, predicate: impl Fn(&Document) -> bool) -> Self {
        let documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|doc| predicate(doc))
            .cloned()
            .collect();
        Self::from_sorted(documents)
    }

    /// All documents in listing order.
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Document> {
        self.by_slug
            .get(slug)
            .and_then(|&index| self.documents.get(index))
    }

    /// Look up a document by slug, failing with [`CollectionError::NotFound`].
    pub fn get_or_err(&self, slug: &str) -> Result<&Document> {
        self.by_slug(slug).ok_or_else(|| CollectionError::NotFound {
            slug: slug.to_string(),
        })
    }

    /// Documents carrying `tag`, in listing order. Empty when none match.
    pub fn list_by_tag(&self, tag: &str) -> Vec<&Document> {
        self.documents.iter().filter(|doc| doc.has_tag(tag)).collect()
    }

    /// Every distinct tag with its document count, sorted by tag.
    pub fn tags(&self) -> Vec<TagCount<'_>> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tag in self.documents.iter().flat_map(|doc| &doc.tags) {
            *counts.entry(tag.as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over documents in listing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

/// One [`DuplicateSlugError`] per slug claimed by more than one path, ordered
/// by slug. Paths within each error are sorted.
pub(crate) fn find_duplicates<'a>(
    claims: impl IntoIterator<Item = (&'a str, &'a Path)>,
) -> Vec<LoadError> {
    let mut by_slug: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
    for (slug, path) in claims {
        by_slug.entry(slug).or_default().push(path.to_path_buf());
    }

    by_slug
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(slug, mut paths)| {
            paths.sort();
            LoadError::DuplicateSlug(DuplicateSlugError {
                slug: slug.to_string(),
                paths,
            })
        })
        .collect()
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use folio_core::ContentType;
    use proptest::prelude::*;

    use super::*;

    fn doc(slug: &str, date: &str, tags: &[&str]) -> Document {
        Document {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            published_at: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
            updated_at: None,
            summary: format!("About {slug}"),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            draft: false,
            body: String::new(),
            source_path: PathBuf::from(format!("content/{slug}.mdx")),
            content_type: ContentType::Mdx,
        }
    }

    fn slugs<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Vec<&'a str> {
        docs.into_iter().map(|d| d.slug.as_str()).collect()
    }

    fn sample() -> Collection {
        Collection::from_documents(vec![
            doc("css-variables", "2021-01-22", &["css", "theming"]),
            doc("notion-cms", "2021-12-18", &["notion", "nextjs"]),
            doc("spring-animations", "2021-02-08", &["animation", "css"]),
            doc("og-images", "2021-02-08", &["nextjs", "images"]),
        ])
        .expect("valid collection")
    }

    #[test]
    fn test_all_ordered_by_date_then_slug() {
        let collection = sample();
        assert_eq!(
            slugs(collection.all()),
            vec!["notion-cms", "og-images", "spring-animations", "css-variables"]
        );
    }

    #[test]
    fn test_by_slug() {
        let collection = sample();
        let found = collection.by_slug("og-images").expect("present");
        assert_eq!(found.title, "OG-IMAGES");
        assert!(collection.by_slug("missing").is_none());
    }

    #[test]
    fn test_get_or_err() {
        let collection = sample();
        assert!(collection.get_or_err("notion-cms").is_ok());
        assert!(matches!(
            collection.get_or_err("missing"),
            Err(CollectionError::NotFound { slug }) if slug == "missing"
        ));
    }

    #[test]
    fn test_list_by_tag() {
        let collection = sample();
        assert_eq!(
            slugs(collection.list_by_tag("css")),
            vec!["spring-animations", "css-variables"]
        );
        assert_eq!(
            slugs(collection.list_by_tag("nextjs")),
            vec!["notion-cms", "og-images"]
        );
        assert!(collection.list_by_tag("rust").is_empty());
    }

    #[test]
    fn test_tag_lookup_is_exact() {
        let collection = sample();
        assert!(collection.list_by_tag("CSS").is_empty());
        assert!(collection.list_by_tag("cs").is_empty());
    }

    #[test]
    fn test_tags_with_counts() {
        let collection = sample();
        let tags = collection.tags();
        assert_eq!(tags.len(), 6);
        assert_eq!(tags[0], TagCount { tag: "animation", count: 1 });
        assert_eq!(tags[1], TagCount { tag: "css", count: 2 });
        assert_eq!(tags[3], TagCount { tag: "nextjs", count: 2 });
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let mut first = doc("my-post", "2021-01-22", &[]);
        first.source_path = PathBuf::from("content/my-post.md");
        let mut second = doc("my-post", "2021-02-08", &[]);
        second.source_path = PathBuf::from("content/My Post.mdx");

        let report = Collection::from_documents(vec![first, second, doc("other", "2021-01-01", &[])])
            .unwrap_err();

        let duplicates: Vec<_> = report.duplicate_slugs().collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].slug, "my-post");
        assert_eq!(
            duplicates[0].paths,
            vec![
                PathBuf::from("content/My Post.mdx"),
                PathBuf::from("content/my-post.md")
            ]
        );
    }

    #[test]
    fn test_empty_collection() {
        let collection = Collection::from_documents(Vec::new()).expect("empty is valid");
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert!(collection.all().is_empty());
        assert!(collection.tags().is_empty());
    }

    #[test]
    fn test_filtered_keeps_order_and_index() {
        let collection = sample();
        let css_only = collection.filtered(|d| d.has_tag("css"));
        assert_eq!(slugs(&css_only), vec!["spring-animations", "css-variables"]);
        assert!(css_only.by_slug("css-variables").is_some());
        assert!(css_only.by_slug("notion-cms").is_none());
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn test_clones_share_storage() {
        let collection = sample();
        let clone = collection.clone();
        assert!(std::ptr::eq(collection.all(), clone.all()));
    }

    fn arb_documents() -> impl Strategy<Value = Vec<Document>> {
        let tag = prop::sample::select(vec!["css", "react", "nextjs", "notion", "animation"]);
        prop::collection::btree_map(
            "[a-z]{1,8}",
            (0u32..120, prop::collection::vec(tag, 0..4)),
            0..24,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(slug, (offset, tags))| {
                    let mut d = doc(&slug, "2021-01-01", &tags);
                    d.published_at = d.published_at + chrono::Days::new(u64::from(offset));
                    d
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_order_independent_of_input(docs in arb_documents(), seed in any::<u64>()) {
            let mut shuffled = docs.clone();
            let len = shuffled.len();
            if len > 1 {
                shuffled.rotate_left((seed % len as u64) as usize);
                shuffled.reverse();
            }

            let a = Collection::from_documents(docs).expect("unique slugs");
            let b = Collection::from_documents(shuffled).expect("unique slugs");
            prop_assert_eq!(a.all(), b.all());
        }

        #[test]
        fn prop_listing_is_sorted(docs in arb_documents()) {
            let collection = Collection::from_documents(docs).expect("unique slugs");
            for pair in collection.all().windows(2) {
                prop_assert_ne!(listing_order(&pair[0], &pair[1]), Ordering::Greater);
            }
        }

        #[test]
        fn prop_tag_listing_is_filtered_all(docs in arb_documents(), tag in "(css|react|nextjs|rust)") {
            let collection = Collection::from_documents(docs).expect("unique slugs");
            let expected: Vec<&Document> =
                collection.all().iter().filter(|d| d.tags.contains(&tag)).collect();
            prop_assert_eq!(collection.list_by_tag(&tag), expected);
        }
    }
}
