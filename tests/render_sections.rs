// File: tests/render_sections.rs
use nfview::controller::{FilterState, recompute};
use nfview::model::{
    Category, CategoryFilter, ChangeLog, LinkTemplate, LogStatus, RawItem, normalize,
};
use nfview::render::{
    Container, render_log_unavailable, render_logs, render_merged_banners, render_page,
    render_scoped_banners,
};
use nfview::snapshot::{LogSection, Snapshot};
use serial_test::serial;

fn english() {
    rust_i18n::set_locale("en");
}

fn change_log(json: &str) -> ChangeLog {
    serde_json::from_str(json).unwrap()
}

#[test]
#[serial]
fn test_script_in_title_is_rendered_as_text() {
    english();
    let items = normalize(
        &[RawItem::new(
            "A-1",
            "<script>alert('x')</script>",
            Some("javascript:alert(1)"),
        )],
        &Category::new("snapshot"),
        &LinkTemplate::default(),
    );

    let mut merged = Container::new("banners");
    render_merged_banners(&mut merged, &items, "");
    let html = merged.inner_html();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains(r##"href="#""##));

    let mut scoped = Container::new("standards");
    render_scoped_banners(&mut scoped, &items, &CategoryFilter::All, "");
    let html = scoped.inner_html();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("javascript:"));
}

#[test]
#[serial]
fn test_empty_banner_listing_shows_one_placeholder() {
    english();
    let mut merged = Container::new("banners");
    render_merged_banners(&mut merged, &[], "");
    assert_eq!(merged.children().len(), 1);
    assert!(merged.inner_html().contains("class=\"hint\""));

    let mut scoped = Container::new("standards");
    render_scoped_banners(&mut scoped, &[], &CategoryFilter::All, "x");
    assert_eq!(scoped.children().len(), 1);
    assert!(scoped.inner_html().contains("No results"));
}

#[test]
#[serial]
fn test_container_content_is_replaced_not_appended() {
    english();
    let items = normalize(
        &[RawItem::new("A-1", "Foo", None), RawItem::new("B-2", "Bar", None)],
        &Category::new("snapshot"),
        &LinkTemplate::default(),
    );
    let mut c = Container::new("banners");
    render_merged_banners(&mut c, &items, "");
    let first = c.inner_html();
    render_merged_banners(&mut c, &items, "");
    assert_eq!(c.inner_html(), first);
    assert_eq!(c.children().len(), 2);

    render_merged_banners(&mut c, &items, "bar");
    assert_eq!(c.children().len(), 1);
}

#[test]
#[serial]
fn test_log_filter_matches_nested_fields() {
    english();
    let log = change_log(
        r#"{ "records": [
            { "date": "2024-01-01", "result": "변경 있음", "summary": "1 added",
              "added": [ { "code": "X12", "title": "t" } ], "removed": [] },
            { "date": "2024-01-08", "result": "변경 없음", "summary": "ok",
              "added": [], "removed": [] }
        ] }"#,
    );

    let mut c = Container::new("logs");
    render_logs(&mut c, &log.records, "x12");
    assert_eq!(c.children().len(), 1);
    let html = c.inner_html();
    assert!(html.contains("2024-01-01"));
    assert!(html.contains("Added 1 / Removed 0"));
    // Nested entries only contribute to the counts.
    assert!(!html.contains("X12"));
}

#[test]
#[serial]
fn test_no_matching_log_renders_empty() {
    english();
    let log = change_log(
        r#"{ "records": [
            { "date": "2024-01-01", "result": "no change", "summary": "ok", "added": [], "removed": [] }
        ] }"#,
    );
    let mut c = Container::new("logs");
    render_logs(&mut c, &log.records, "fail");
    assert!(c.children().is_empty());
    assert_eq!(c.inner_html(), "");
}

#[test]
#[serial]
fn test_status_pill_has_exactly_two_states() {
    english();
    let log = change_log(
        r#"{ "records": [
            { "date": "d1", "result": "변경 없음", "summary": "a" },
            { "date": "d2", "result": "no change", "summary": "b" },
            { "date": "d3", "result": "변경 없음 ", "summary": "c" },
            { "date": "d4", "summary": "d" },
            { "date": "d5", "result": "", "summary": "e" }
        ] }"#,
    );
    let statuses: Vec<LogStatus> = log.records.iter().map(|r| r.status()).collect();
    assert_eq!(
        statuses,
        vec![
            LogStatus::NoChange,
            LogStatus::NoChange,
            LogStatus::Changed,
            LogStatus::Changed,
            LogStatus::Changed,
        ]
    );

    let mut c = Container::new("logs");
    render_logs(&mut c, &log.records[..1], "");
    let html = c.inner_html();
    assert!(html.contains(r#"<span class="pill same">no change</span>"#));

    render_logs(&mut c, &log.records[3..4], "");
    assert!(c.inner_html().contains(r#"<span class="pill changed">changed</span>"#));
}

#[test]
#[serial]
fn test_report_link_is_optional() {
    english();
    let log = change_log(
        r#"{ "records": [
            { "date": "d1", "result": "변경 있음", "summary": "s", "report": "reports/2024-01-01.html" },
            { "date": "d2", "result": "변경 있음", "summary": "s", "report": "  " }
        ] }"#,
    );
    assert_eq!(log.records[0].report.as_deref(), Some("reports/2024-01-01.html"));
    assert_eq!(log.records[1].report, None);

    let mut c = Container::new("logs");
    render_logs(&mut c, &log.records, "");
    let html = c.inner_html();
    assert_eq!(html.matches(">Report</a>").count(), 1);
    assert!(html.contains(r#"href="reports/2024-01-01.html""#));
}

#[test]
#[serial]
fn test_log_unavailable_hint() {
    english();
    let mut c = Container::new("logs");
    render_log_unavailable(&mut c);
    assert!(c.inner_html().contains("Could not load data.json"));
}

#[test]
#[serial]
fn test_page_contains_every_section() {
    english();
    let links = LinkTemplate::default();
    let mut snapshot = Snapshot::empty(vec![Category::new("NFPC"), Category::new("NFTC")]);
    snapshot.listing = normalize(
        &[RawItem::new("NFPC 101", "소화기구", None)],
        &Category::new("snapshot"),
        &links,
    );
    snapshot.listing_last = Some("2024-02-01".to_string());
    snapshot.standards = normalize(
        &[RawItem::new("NFTC 102", "옥내소화전설비", None)],
        &Category::new("NFTC"),
        &links,
    );
    snapshot.logs = LogSection::Loaded(
        change_log(r#"{ "records": [ { "date": "2024-02-01", "result": "변경 없음", "summary": "ok" } ] }"#)
            .records,
    );

    let filter = FilterState::default().with_category(CategoryFilter::Only(Category::new("NFTC")));
    let html = render_page(&recompute(&snapshot, &filter));

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<html lang="en">"#));
    assert!(html.contains(r#"<div id="banners">"#));
    assert!(html.contains(r#"<div id="standards">"#));
    assert!(html.contains(r#"<div id="logs">"#));
    assert!(html.contains("소화기구"));
    assert!(html.contains("옥내소화전설비"));
    assert!(html.contains("Last collected: 2024-02-01"));
    assert!(html.contains(r#"<span class="cat active">NFTC</span>"#));
    assert!(html.contains("@media print"));
}

#[test]
#[serial]
fn test_copy_failure_has_an_inline_notice() {
    english();
    let html = render_page(&recompute(&Snapshot::empty(vec![]), &FilterState::default()));
    assert!(html.contains(r#"<div id="notice" class="notice noprint" role="status" hidden="hidden" data-copy-failed="Could not copy the link.">"#));
    assert!(html.contains("showNotice(notice.dataset.copyFailed)"));
    assert!(!html.contains("console.warn"));
}

#[test]
#[serial]
fn test_page_with_missing_change_log() {
    english();
    let snapshot = Snapshot::empty(vec![]);
    let html = render_page(&recompute(&snapshot, &FilterState::default().with_query("\"><b>")));
    assert!(html.contains("Could not load data.json"));
    assert!(html.contains(r#"value="&quot;&gt;&lt;b&gt;""#));
    assert!(!html.contains("\"><b>"));
}
