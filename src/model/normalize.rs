// File: ./src/model/normalize.rs
//! Raw listing items -> canonical [`NormalizedItem`]s.

use crate::config::DEFAULT_SEARCH_URL_TEMPLATE;
use crate::model::item::{Category, NormalizedItem, RawItem};

const QUERY_PLACEHOLDER: &str = "{query}";

/// Search-URL template used when an item carries no link of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    template: String,
}

impl LinkTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Builds the fallback link for an item. Pure and total: the same
    /// `(code, title)` always yields the same link.
    pub fn derive(&self, code: &str, title: &str) -> String {
        let text = format!("{} {}", code.trim(), title.trim());
        // Form encoding writes spaces as `+`; the search endpoint expects `%20`.
        // A literal `+` is already `%2B` at this point.
        let encoded = url::form_urlencoded::byte_serialize(text.trim().as_bytes())
            .collect::<String>()
            .replace('+', "%20");

        if self.template.contains(QUERY_PLACEHOLDER) {
            self.template.replace(QUERY_PLACEHOLDER, &encoded)
        } else {
            format!("{}{}", self.template, encoded)
        }
    }
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL_TEMPLATE)
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or_default()
}

/// Normalizes `raw` in input order, tagging every survivor with `category`.
///
/// Items whose code is missing or blank are dropped silently. No
/// deduplication happens here.
pub fn normalize(raw: &[RawItem], category: &Category, links: &LinkTemplate) -> Vec<NormalizedItem> {
    raw.iter()
        .filter_map(|item| {
            let code = trimmed(&item.code);
            if code.is_empty() {
                return None;
            }
            let title = trimmed(&item.title);
            let url = match trimmed(&item.url) {
                "" => links.derive(code, title),
                explicit => explicit.to_string(),
            };

            Some(NormalizedItem {
                category: category.clone(),
                code: code.to_string(),
                title: title.to_string(),
                url,
            })
        })
        .collect()
}
