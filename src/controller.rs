// File: src/controller.rs
//! Filter state and the recompute step shared by every front-end.
//!
//! The whole visible state is a pure function of the loaded [`Snapshot`] and
//! the current [`FilterState`]: `recompute(snapshot, filter)`. Front-ends never
//! patch a previous result; every input replaces the filter and recomputes.
use crate::model::{
    Category, CategoryFilter, LogRecord, NormalizedItem, Query, locale_cmp,
};
use crate::snapshot::{LogSection, Snapshot};
use std::collections::HashSet;

/// Session-lifetime filter selection. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub query: String,
}

impl FilterState {
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            category: self.category.clone(),
            query: query.into(),
        }
    }

    pub fn with_category(&self, category: CategoryFilter) -> Self {
        Self {
            category,
            query: self.query.clone(),
        }
    }

    pub fn normalized_query(&self) -> Query {
        Query::new(&self.query)
    }
}

/// Merged listing: filtered, deduplicated by code (first passing item wins),
/// then sorted by code.
pub fn merged_banners<'a>(items: &'a [NormalizedItem], query: &Query) -> Vec<&'a NormalizedItem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged: Vec<&NormalizedItem> = items
        .iter()
        .filter(|it| !it.code.is_empty())
        .filter(|it| query.matches_item(&it.code, &it.title))
        .filter(|it| seen.insert(it.code.as_str()))
        .collect();
    merged.sort_by(|a, b| locale_cmp(&a.code, &b.code));
    merged
}

/// Category-scoped listing: filtered only, in input order.
pub fn scoped_banners<'a>(
    items: &'a [NormalizedItem],
    category: &CategoryFilter,
    query: &Query,
) -> Vec<&'a NormalizedItem> {
    items
        .iter()
        .filter(|it| category.admits(&it.category))
        .filter(|it| query.matches_item(&it.code, &it.title))
        .collect()
}

/// Log records whose full JSON text contains the query, in input order.
pub fn filter_logs<'a>(records: &'a [LogRecord], query: &Query) -> Vec<&'a LogRecord> {
    records
        .iter()
        .filter(|r| query.matches_text(r.search_text()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogView {
    /// The change log could not be loaded; the section shows a hint only.
    Unavailable,
    Records(Vec<LogRecord>),
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub filter: FilterState,
    pub categories: Vec<Category>,
    pub listing_last: Option<String>,
    pub banners: Vec<NormalizedItem>,
    pub standards: Vec<NormalizedItem>,
    pub logs: LogView,
}

pub fn recompute(snapshot: &Snapshot, filter: &FilterState) -> ViewModel {
    let query = filter.normalized_query();

    let logs = match &snapshot.logs {
        LogSection::Unavailable => LogView::Unavailable,
        LogSection::Loaded(records) => LogView::Records(
            filter_logs(records, &query).into_iter().cloned().collect(),
        ),
    };

    ViewModel {
        filter: filter.clone(),
        categories: snapshot.categories.clone(),
        listing_last: snapshot.listing_last.clone(),
        banners: merged_banners(&snapshot.listing, &query)
            .into_iter()
            .cloned()
            .collect(),
        standards: scoped_banners(&snapshot.standards, &filter.category, &query)
            .into_iter()
            .cloned()
            .collect(),
        logs,
    }
}

/// Owns the current snapshot and filter, and keeps the view in sync with them.
#[derive(Debug, Clone)]
pub struct ViewController {
    snapshot: Snapshot,
    filter: FilterState,
    view: ViewModel,
}

impl ViewController {
    pub fn new(snapshot: Snapshot) -> Self {
        let filter = FilterState::default();
        let view = recompute(&snapshot, &filter);
        Self {
            snapshot,
            filter,
            view,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn set_query(&mut self, query: &str) {
        self.apply(self.filter.with_query(query));
    }

    /// An unknown tag falls back to "all".
    pub fn set_category(&mut self, category: CategoryFilter) {
        let category = match category {
            CategoryFilter::Only(tag) if !self.snapshot.categories.contains(&tag) => {
                log::debug!("Unknown category {}, showing all", tag);
                CategoryFilter::All
            }
            other => other,
        };
        self.apply(self.filter.with_category(category));
    }

    /// Cycles all -> first tag -> ... -> last tag -> all. `forward == false`
    /// walks the same ring backwards.
    pub fn cycle_category(&mut self, forward: bool) {
        let tags = &self.snapshot.categories;
        let ring_len = tags.len() + 1;
        let current = match &self.filter.category {
            CategoryFilter::All => 0,
            CategoryFilter::Only(tag) => tags.iter().position(|t| t == tag).map_or(0, |i| i + 1),
        };
        let next = if forward {
            (current + 1) % ring_len
        } else {
            (current + ring_len - 1) % ring_len
        };
        let category = match next {
            0 => CategoryFilter::All,
            i => CategoryFilter::Only(tags[i - 1].clone()),
        };
        self.apply(self.filter.with_category(category));
    }

    /// Replaces the snapshot (explicit reload) and keeps the filter.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        let filter = self.filter.clone();
        self.set_category(filter.category);
    }

    fn apply(&mut self, filter: FilterState) {
        self.view = recompute(&self.snapshot, &filter);
        self.filter = filter;
    }
}
