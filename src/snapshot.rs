// File: src/snapshot.rs
//! The immutable, in-memory result of loading every data document once.
use crate::config::Config;
use crate::loader::Loader;
use crate::model::{
    Category, ChangeLog, LinkTemplate, Listing, LogRecord, NormalizedItem, normalize,
};
use futures::future::join_all;

/// Tag given to the items of the listing document.
pub const LISTING_CATEGORY: &str = "snapshot";

/// The change log is the one mandatory document: without it the log section
/// shows a hint instead of records.
#[derive(Debug, Clone, PartialEq)]
pub enum LogSection {
    Loaded(Vec<LogRecord>),
    Unavailable,
}

impl LogSection {
    pub fn records(&self) -> &[LogRecord] {
        match self {
            LogSection::Loaded(records) => records,
            LogSection::Unavailable => &[],
        }
    }
}

/// Which documents make up a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotSources {
    pub change_log_path: String,
    pub listing_path: String,
    /// (tag, path) per category document, in display order.
    pub categories: Vec<(Category, String)>,
    pub links: LinkTemplate,
}

impl SnapshotSources {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            change_log_path: cfg.change_log_path.clone(),
            listing_path: cfg.listing_path.clone(),
            categories: cfg
                .categories
                .iter()
                .map(|c| (Category::new(c.tag.clone()), c.path.clone()))
                .collect(),
            links: LinkTemplate::new(cfg.search_url_template.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub logs: LogSection,
    /// Items of the listing document, for the merged banner view.
    pub listing: Vec<NormalizedItem>,
    /// Date of the last collection run, when the listing records it.
    pub listing_last: Option<String>,
    /// Items of every category document, in category order, for the scoped view.
    pub standards: Vec<NormalizedItem>,
    pub categories: Vec<Category>,
}

impl Snapshot {
    pub fn empty(categories: Vec<Category>) -> Self {
        Self {
            logs: LogSection::Unavailable,
            listing: Vec::new(),
            listing_last: None,
            standards: Vec::new(),
            categories,
        }
    }

    /// Loads every document concurrently and joins them before returning.
    ///
    /// Only the change log can fail visibly; the listing and each category
    /// document fall back to empty independently.
    pub async fn load(loader: &Loader, sources: &SnapshotSources) -> Snapshot {
        let change_log = async {
            match loader.load::<ChangeLog>(&sources.change_log_path).await {
                Ok(doc) => LogSection::Loaded(
                    doc.records
                        .into_iter()
                        .map(|r| {
                            let report = r.report.as_deref().map(|p| loader.resolve_link(p));
                            r.with_report(report)
                        })
                        .collect(),
                ),
                Err(e) => {
                    log::error!("Change log unavailable: {}", e);
                    LogSection::Unavailable
                }
            }
        };

        let listing = loader.load_or(&sources.listing_path, Listing::default());

        let standards = join_all(sources.categories.iter().map(|(tag, path)| async move {
            let doc = loader.load_or(path, Listing::default()).await;
            normalize(&doc.items, tag, &sources.links)
        }));

        let (logs, listing, standards) = tokio::join!(change_log, listing, standards);

        let listing_category = Category::new(LISTING_CATEGORY);
        let snapshot = Snapshot {
            logs,
            listing: normalize(&listing.items, &listing_category, &sources.links),
            listing_last: listing.last.filter(|d| !d.trim().is_empty()),
            standards: standards.into_iter().flatten().collect(),
            categories: sources.categories.iter().map(|(tag, _)| tag.clone()).collect(),
        };

        log::info!(
            "Snapshot loaded: {} log records, {} listing items, {} standards",
            snapshot.logs.records().len(),
            snapshot.listing.len(),
            snapshot.standards.len()
        );
        snapshot
    }
}
