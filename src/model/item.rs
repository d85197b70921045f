// File: ./src/model/item.rs
// Listing items as they arrive from the data documents and after normalization.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Provenance tag of an item: which source document it came from.
///
/// The set of tags is configuration (see `Config::categories`), so this is an
/// open newtype rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category selection: the "all" sentinel or exactly one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Parses a CLI/category-button value. `all` (any case) and the empty
    /// string select every category.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::new(value))
        }
    }
}

/// One record of a listing document, before normalization.
///
/// Sources disagree on shapes; every field is optional and loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "loose_field")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "loose_field")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_field")]
    pub url: Option<String>,
}

impl RawItem {
    pub fn new(code: &str, title: &str, url: Option<&str>) -> Self {
        Self {
            code: Some(code.to_string()),
            title: Some(title.to_string()),
            url: url.map(str::to_string),
        }
    }
}

fn loose_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(super::loose_text))
}

/// Entries of `items` that are not objects are skipped instead of failing the
/// whole document.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<RawItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<RawItem>(v).ok())
        .collect())
}

/// A listing document: `{ "last": "2024-01-01", "items": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Listing {
    #[serde(default, deserialize_with = "loose_field")]
    pub last: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<RawItem>,
}

/// Canonical item shape. `code` and `url` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedItem {
    pub category: Category,
    pub code: String,
    pub title: String,
    pub url: String,
}
