//! Frontmatter parsing and schema validation for content files.
//!
//! Both YAML (`---`) and TOML (`+++`) blocks are first normalized into a
//! [`FieldMap`] and then checked by a single validator, so the two formats
//! accept exactly the same keys and types. Validation never stops at the
//! first problem: every offending field of a document is reported.

use std::{collections::BTreeMap, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Keys accepted in a front matter block.
pub const KNOWN_FIELDS: &[&str] = &["title", "publishedAt", "updatedAt", "summary", "tags", "draft"];

/// Validated front matter of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    /// Document title.
    pub title: String,

    /// Publication date.
    pub published_at: NaiveDate,

    /// Last updated date, never earlier than `published_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,

    /// Short summary used for listings and previews.
    pub summary: String,

    /// Tags in first-seen order, without duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Whether this is a draft.
    #[serde(default, skip_serializing_if = "is_false")]
    pub draft: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Frontmatter {
    /// Serialize back into a YAML front matter body (without delimiters).
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Render a complete document: YAML front matter block followed by `body`.
    pub fn to_document(&self, body: &str) -> Result<String, serde_yaml::Error> {
        let yaml = self.to_yaml()?;
        Ok(format!("---\n{yaml}---\n\n{body}"))
    }
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }
}

/// A front matter value reduced to the shapes the schema cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent or explicit null.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// String scalar (TOML dates are carried as their text form).
    Text(String),
    /// Sequence of values.
    List(Vec<FieldValue>),
    /// Any other shape; holds a name for error messages.
    Other(&'static str),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Other(kind) => *kind,
        }
    }

    fn from_yaml(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(_) => Self::Other("number"),
            Value::String(s) => Self::Text(s),
            Value::Sequence(items) => Self::List(items.into_iter().map(Self::from_yaml).collect()),
            Value::Mapping(_) => Self::Other("mapping"),
            Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    fn from_toml(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => Self::Text(s),
            Value::Integer(_) | Value::Float(_) => Self::Other("number"),
            Value::Boolean(b) => Self::Bool(b),
            Value::Datetime(dt) => Self::Text(dt.to_string()),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_toml).collect()),
            Value::Table(_) => Self::Other("table"),
        }
    }
}

/// Raw front matter keyed by field name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Split content into frontmatter and body.
///
/// The opening delimiter must be the first non-blank line and the closing
/// delimiter must sit on a line of its own. Returns `None` when the content
/// has no complete front matter block.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let (first, rest) = content.split_once('\n')?;

    let format = match first.trim_end() {
        "---" => FrontmatterFormat::Yaml,
        "+++" => FrontmatterFormat::Toml,
        _ => return None,
    };
    let delimiter = format.delimiter();

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse a raw front matter block into a [`FieldMap`].
///
/// Fails with a human-readable reason when the block is not valid YAML/TOML
/// or is not a key/value mapping.
pub fn parse_fields(format: FrontmatterFormat, raw: &str) -> Result<FieldMap, String> {
    match format {
        FrontmatterFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(raw)
                .map_err(|e| format!("invalid {} front matter: {e}", format.name()))?;

            match value {
                serde_yaml::Value::Null => Ok(FieldMap::new()),
                serde_yaml::Value::Mapping(mapping) => {
                    let mut fields = FieldMap::new();
                    for (key, value) in mapping {
                        match key {
                            serde_yaml::Value::String(key) => {
                                fields.insert(key, FieldValue::from_yaml(value));
                            }
                            other => {
                                return Err(format!(
                                    "front matter keys must be strings, found {}",
                                    FieldValue::from_yaml(other).kind()
                                ));
                            }
                        }
                    }
                    Ok(fields)
                }
                other => Err(format!(
                    "front matter must be a mapping of keys to values, found {}",
                    FieldValue::from_yaml(other).kind()
                )),
            }
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table = toml::from_str(raw)
                .map_err(|e| format!("invalid {} front matter: {e}", format.name()))?;

            Ok(table
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_toml(value)))
                .collect())
        }
    }
}

/// Parse and validate the front matter of a document.
///
/// Returns the validated front matter and the remaining body, or every
/// schema error found in the document.
pub fn parse_frontmatter(
    content: &str,
    slug: &str,
    path: &Path,
) -> Result<(Frontmatter, String), Vec<SchemaError>> {
    let Some((format, raw, body)) = split_frontmatter(content) else {
        return Err(vec![SchemaError::new(
            slug,
            path,
            "frontmatter",
            "missing front matter block (expected `---` or `+++` delimiters at the top of the file)",
        )]);
    };

    let fields = parse_fields(format, raw)
        .map_err(|reason| vec![SchemaError::new(slug, path, "frontmatter", reason)])?;

    let frontmatter = validate_fields(fields, slug, path)?;
    Ok((frontmatter, body.to_string()))
}

/// Collects schema errors for one document.
struct Validator<'a> {
    slug: &'a str,
    path: &'a Path,
    errors: Vec<SchemaError>,
}

impl Validator<'_> {
    fn fail(&mut self, field: &str, reason: impl Into<String>) {
        self.errors
            .push(SchemaError::new(self.slug, self.path, field, reason));
    }

    fn required_text(&mut self, fields: &mut FieldMap, field: &str) -> Option<String> {
        match fields.remove(field) {
            None => {
                self.fail(field, "required field is missing");
                None
            }
            Some(FieldValue::Null) => {
                self.fail(field, "required field is empty");
                None
            }
            Some(value) => self.text(field, value),
        }
    }

    fn text(&mut self, field: &str, value: FieldValue) -> Option<String> {
        match value {
            FieldValue::Text(s) if s.trim().is_empty() => {
                self.fail(field, "must not be empty");
                None
            }
            FieldValue::Text(s) => Some(s.trim().to_string()),
            other => {
                self.fail(field, format!("expected a string, found {}", other.kind()));
                None
            }
        }
    }

    fn date(&mut self, field: &str, value: FieldValue) -> Option<NaiveDate> {
        let text = self.text(field, value)?;
        match parse_date(&text) {
            Ok(date) => Some(date),
            Err(reason) => {
                self.fail(field, reason);
                None
            }
        }
    }

    fn tags(&mut self, value: FieldValue) -> Vec<String> {
        let items = match value {
            FieldValue::Null => return Vec::new(),
            FieldValue::Text(s) => vec![FieldValue::Text(s)],
            FieldValue::List(items) => items,
            other => {
                self.fail(
                    "tags",
                    format!("expected a list of strings, found {}", other.kind()),
                );
                return Vec::new();
            }
        };

        let mut tags: Vec<String> = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                FieldValue::Text(tag) if tag.trim().is_empty() => {
                    self.fail("tags", format!("tag #{} is empty", index + 1));
                }
                FieldValue::Text(tag) => {
                    let tag = tag.trim();
                    if !tags.iter().any(|t| t == tag) {
                        tags.push(tag.to_string());
                    }
                }
                other => self.fail(
                    "tags",
                    format!("tag #{} must be a string, found {}", index + 1, other.kind()),
                ),
            }
        }
        tags
    }
}

/// Check a [`FieldMap`] against the front matter schema.
pub fn validate_fields(
    mut fields: FieldMap,
    slug: &str,
    path: &Path,
) -> Result<Frontmatter, Vec<SchemaError>> {
    let mut v = Validator {
        slug,
        path,
        errors: Vec::new(),
    };

    let title = v.required_text(&mut fields, "title");

    let published_at = match fields.remove("publishedAt") {
        None => {
            v.fail("publishedAt", "required field is missing");
            None
        }
        Some(FieldValue::Null) => {
            v.fail("publishedAt", "required field is empty");
            None
        }
        Some(value) => v.date("publishedAt", value),
    };

    let updated_at = match fields.remove("updatedAt") {
        None | Some(FieldValue::Null) => None,
        Some(value) => v.date("updatedAt", value),
    };

    if let (Some(published), Some(updated)) = (published_at, updated_at)
        && updated < published
    {
        v.fail(
            "updatedAt",
            format!("updatedAt ({updated}) is earlier than publishedAt ({published})"),
        );
    }

    let summary = v.required_text(&mut fields, "summary");

    let tags = fields
        .remove("tags")
        .map(|value| v.tags(value))
        .unwrap_or_default();

    let draft = match fields.remove("draft") {
        None | Some(FieldValue::Null) => false,
        Some(FieldValue::Bool(b)) => b,
        Some(other) => {
            v.fail("draft", format!("expected a boolean, found {}", other.kind()));
            false
        }
    };

    for key in fields.keys() {
        v.fail(key, unknown_field_reason(key));
    }

    match (title, published_at, summary) {
        (Some(title), Some(published_at), Some(summary)) if v.errors.is_empty() => {
            Ok(Frontmatter {
                title,
                published_at,
                updated_at,
                summary,
                tags,
                draft,
            })
        }
        _ => Err(v.errors),
    }
}

/// Parse a strict ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(format!(
            "expected an ISO 8601 date (YYYY-MM-DD), found `{text}`"
        ));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("`{text}` is not a valid calendar date"))
}

fn unknown_field_reason(key: &str) -> String {
    let hint = match key {
        "date" | "published" | "published_at" | "publishDate" | "pubDate" => Some("publishedAt"),
        "updated" | "updated_at" | "lastmod" | "modified" => Some("updatedAt"),
        "description" | "excerpt" => Some("summary"),
        "tag" | "keywords" => Some("tags"),
        _ => None,
    };

    match hint {
        Some(expected) => format!("unknown field (did you mean `{expected}`?)"),
        None => format!("unknown field (expected one of: {})", KNOWN_FIELDS.join(", ")),
    }
}
