// File: tests/loader_sources.rs
use mockito::{Matcher, Server};
use nfview::config::Config;
use nfview::context::TestContext;
use nfview::loader::{DataSource, LoadError, Loader};
use nfview::model::{Category, ChangeLog, Listing};
use nfview::snapshot::{LISTING_CATEGORY, LogSection, Snapshot, SnapshotSources};
use std::path::PathBuf;

const CHANGE_LOG: &str = r#"{ "records": [
    { "date": "2024-01-08", "result": "변경 있음", "summary": "1 added",
      "report": "reports/2024-01-08.html", "added": [ { "code": "NFPC 999" } ], "removed": [] },
    { "date": "2024-01-01", "result": "변경 없음", "summary": "ok", "added": [], "removed": [] }
] }"#;

const LISTING: &str = r#"{ "last": "2024-01-08", "items": [
    { "code": "NFPC 101", "title": "소화기구", "source": "law", "noticeNo": "2024-1" },
    { "code": "", "title": "dropped" }
] }"#;

const NFPC: &str = r#"{ "items": [ { "code": "NFPC 101", "title": "소화기구", "url": "https://example.org/101" } ] }"#;
const NFTC: &str = r#"{ "items": [ { "code": "NFTC 101", "title": "소화기구 기술기준" } ] }"#;

#[test]
fn test_data_source_parsing() {
    assert_eq!(
        DataSource::parse("https://example.org/site").unwrap(),
        DataSource::Remote(url::Url::parse("https://example.org/site/").unwrap())
    );
    assert_eq!(
        DataSource::parse("").unwrap(),
        DataSource::Local(PathBuf::from("."))
    );
    assert_eq!(
        DataSource::parse("./public").unwrap(),
        DataSource::Local(PathBuf::from("./public"))
    );
    assert!(matches!(
        DataSource::parse("https://exa mple.org"),
        Err(LoadError::InvalidLocation { .. })
    ));
}

#[tokio::test]
async fn test_remote_fetch_bypasses_caches() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/site/data.json")
        .match_header("cache-control", Matcher::Regex("no-cache".to_string()))
        .match_header("pragma", "no-cache")
        .match_header("user-agent", "nfview-test/1.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHANGE_LOG)
        .create_async()
        .await;

    let loader = Loader::new(&format!("{}/site", server.url()), "nfview-test/1.0").unwrap();
    let log: ChangeLog = loader.load("data.json").await.unwrap();

    mock.assert_async().await;
    assert_eq!(log.records.len(), 2);
    assert_eq!(log.records[0].added, 1);
}

#[tokio::test]
async fn test_http_error_is_typed_and_falls_back() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/snapshot.json")
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let loader = Loader::new(&server.url(), "nfview-test/1.0").unwrap();
    let err = loader.load::<Listing>("snapshot.json").await.unwrap_err();
    match err {
        LoadError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("unexpected error: {:?}", other),
    }

    let listing = loader.load_or("snapshot.json", Listing::default()).await;
    assert!(listing.items.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/data.json")
        .with_status(200)
        .with_body("{ not json")
        .create_async()
        .await;

    let loader = Loader::new(&server.url(), "nfview-test/1.0").unwrap();
    let err = loader.load::<ChangeLog>("data.json").await.unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let loader = Loader::new("http://127.0.0.1:9", "nfview-test/1.0").unwrap();
    let err = loader.load::<ChangeLog>("data.json").await.unwrap_err();
    assert!(matches!(err, LoadError::Transport { .. }));
}

#[tokio::test]
async fn test_remote_snapshot_survives_missing_change_log() {
    let mut server = Server::new_async().await;
    let _log = server
        .mock("GET", "/data.json")
        .with_status(404)
        .create_async()
        .await;
    let _listing = server
        .mock("GET", "/snapshot.json")
        .with_status(200)
        .with_body(LISTING)
        .create_async()
        .await;
    let _nfpc = server
        .mock("GET", "/data/standards_nfpc.json")
        .with_status(200)
        .with_body(NFPC)
        .create_async()
        .await;
    let _nftc = server
        .mock("GET", "/data/standards_nftc.json")
        .with_status(500)
        .create_async()
        .await;

    let loader = Loader::new(&server.url(), "nfview-test/1.0").unwrap();
    let snapshot = Snapshot::load(&loader, &SnapshotSources::from_config(&Config::default())).await;

    assert_eq!(snapshot.logs, LogSection::Unavailable);
    assert_eq!(snapshot.listing.len(), 1);
    assert_eq!(snapshot.listing[0].category, Category::new(LISTING_CATEGORY));
    assert_eq!(snapshot.listing_last.as_deref(), Some("2024-01-08"));
    // The failing NFTC document only empties its own category.
    assert_eq!(snapshot.standards.len(), 1);
    assert_eq!(snapshot.standards[0].category, Category::new("NFPC"));
    assert_eq!(snapshot.standards[0].url, "https://example.org/101");
    assert_eq!(
        snapshot.categories,
        vec![Category::new("NFPC"), Category::new("NFTC")]
    );
}

#[tokio::test]
async fn test_remote_report_links_are_resolved_against_the_source() {
    let mut server = Server::new_async().await;
    let _log = server
        .mock("GET", "/site/data.json")
        .with_status(200)
        .with_body(CHANGE_LOG)
        .create_async()
        .await;

    let base = format!("{}/site", server.url());
    let loader = Loader::new(&base, "nfview-test/1.0").unwrap();
    let snapshot = Snapshot::load(&loader, &SnapshotSources::from_config(&Config::default())).await;

    let records = snapshot.logs.records();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].report.as_deref(),
        Some(format!("{}/reports/2024-01-08.html", base).as_str())
    );
    // Everything else fell back to empty.
    assert!(snapshot.listing.is_empty());
    assert!(snapshot.standards.is_empty());
}

#[tokio::test]
async fn test_local_directory_source() {
    let ctx = TestContext::new();
    let dir = ctx.data_dir();
    std::fs::create_dir_all(dir.join("data")).unwrap();
    std::fs::write(dir.join("data.json"), CHANGE_LOG).unwrap();
    std::fs::write(dir.join("snapshot.json"), LISTING).unwrap();
    std::fs::write(dir.join("data/standards_nfpc.json"), NFPC).unwrap();
    std::fs::write(dir.join("data/standards_nftc.json"), NFTC).unwrap();

    let loader = Loader::new(&dir.to_string_lossy(), "nfview-test/1.0").unwrap();
    let snapshot = Snapshot::load(&loader, &SnapshotSources::from_config(&Config::default())).await;

    assert_eq!(snapshot.logs.records().len(), 2);
    let report = snapshot.logs.records()[0].report.clone().unwrap();
    assert!(report.starts_with("file://"));
    assert!(report.ends_with("/reports/2024-01-08.html"));

    let codes: Vec<&str> = snapshot.standards.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["NFPC 101", "NFTC 101"]);
    assert!(snapshot.standards[1].url.starts_with("https://www.law.go.kr/"));
}

#[tokio::test]
async fn test_local_missing_file_is_io_error() {
    let ctx = TestContext::new();
    let loader = Loader::new(&ctx.data_dir().to_string_lossy(), "nfview-test/1.0").unwrap();
    let err = loader.load::<ChangeLog>("data.json").await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
