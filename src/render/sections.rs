// File: ./src/render/sections.rs
// Renderers for the banner, standards and log containers.
use crate::controller::{filter_logs, merged_banners, scoped_banners};
use crate::model::{CategoryFilter, LogRecord, LogStatus, NormalizedItem, Query};
use crate::render::markup::{Container, Element, Node, safe_href};
use rust_i18n::t;

fn hint(message: impl Into<String>) -> Node {
    Element::new("div").class("hint").text(message).into()
}

pub(crate) fn banner_nodes(items: &[&NormalizedItem]) -> Vec<Node> {
    if items.is_empty() {
        return vec![hint(t!("hint_no_banners"))];
    }
    items
        .iter()
        .map(|it| {
            Element::new("a")
                .class("banner")
                .href(&it.url)
                .external()
                .child(Element::new("span").class("badge").text(it.code.clone()))
                .child(Element::new("span").text(it.title.clone()))
                .into()
        })
        .collect()
}

pub(crate) fn standard_nodes(items: &[&NormalizedItem]) -> Vec<Node> {
    if items.is_empty() {
        return vec![hint(t!("hint_no_results"))];
    }
    items
        .iter()
        .map(|it| {
            let head = Element::new("div")
                .class("card-head")
                .child(Element::new("span").class("badge").text(it.code.clone()))
                .child(Element::new("span").class("tag").text(it.category.to_string()));
            let actions = Element::new("div")
                .class("card-actions noprint")
                .child(
                    Element::new("a")
                        .href(&it.url)
                        .external()
                        .text(t!("open_link")),
                )
                .child(
                    Element::new("button")
                        .class("copy")
                        .attr("type", "button")
                        .attr("data-url", safe_href(&it.url))
                        .text(t!("copy_link")),
                );
            Element::new("div")
                .class("card")
                .child(head)
                .child(Element::new("div").class("card-title").text(it.title.clone()))
                .child(actions)
                .into()
        })
        .collect()
}

pub(crate) fn log_nodes(records: &[&LogRecord]) -> Vec<Node> {
    records
        .iter()
        .map(|r| {
            let status = r.status();
            let pill_class = match status {
                LogStatus::Changed => "pill changed",
                LogStatus::NoChange => "pill same",
            };
            let headline = Element::new("div")
                .child(Element::new("b").text(r.date.clone()))
                .text(" ")
                .child(Element::new("span").class(pill_class).text(status.label()))
                .text(format!(" — {}", r.summary));

            let mut report = Element::new("div").class("noprint");
            if let Some(link) = &r.report {
                report = report.child(
                    Element::new("a")
                        .href(link)
                        .external()
                        .text(t!("report")),
                );
            }

            let counts = t!(
                "log_counts",
                added = r.added.to_string(),
                removed = r.removed.to_string()
            );
            Element::new("div")
                .class("log")
                .child(Element::new("div").class("top").child(headline).child(report))
                .child(Element::new("div").class("counts").text(counts))
                .into()
        })
        .collect()
}

/// Merged listing: dedup by code, sorted, with one placeholder when empty.
pub fn render_merged_banners(container: &mut Container, items: &[NormalizedItem], query: &str) {
    let query = Query::new(query);
    let visible = merged_banners(items, &query);
    container.replace_children(banner_nodes(&visible));
}

/// Category-scoped listing: input order, no dedup.
pub fn render_scoped_banners(
    container: &mut Container,
    items: &[NormalizedItem],
    category: &CategoryFilter,
    query: &str,
) {
    let query = Query::new(query);
    let visible = scoped_banners(items, category, &query);
    container.replace_children(standard_nodes(&visible));
}

/// Log listing. No matching record leaves the container empty.
pub fn render_logs(container: &mut Container, records: &[LogRecord], query: &str) {
    let query = Query::new(query);
    let visible = filter_logs(records, &query);
    container.replace_children(log_nodes(&visible));
}

/// Terminal state of the log section when the change log could not be loaded.
pub fn render_log_unavailable(container: &mut Container) {
    container.replace_children(vec![hint(t!("hint_log_missing"))]);
}
