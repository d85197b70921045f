// File: tests/config_context.rs
use nfview::config::{CategorySource, Config, DEFAULT_SEARCH_URL_TEMPLATE};
use nfview::context::{AppContext, TestContext};

#[test]
fn test_missing_config_is_reported_and_defaulted() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));

    let cfg = Config::load_or_default(&ctx).unwrap();
    assert_eq!(cfg.source, ".");
    assert_eq!(cfg.change_log_path, "data.json");
    assert_eq!(cfg.listing_path, "snapshot.json");
    assert_eq!(cfg.category_tags(), vec!["NFPC", "NFTC"]);
    assert_eq!(cfg.search_url_template, DEFAULT_SEARCH_URL_TEMPLATE);
}

#[test]
fn test_config_roundtrip_through_disk() {
    let ctx = TestContext::new();
    let mut cfg = Config::default();
    cfg.source = "https://example.org/nfpc-watch/".to_string();
    cfg.locale = Some("ko".to_string());
    cfg.categories.push(CategorySource {
        tag: "KFS".to_string(),
        path: "data/standards_kfs.json".to_string(),
    });
    cfg.save(&ctx).unwrap();

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded.source, cfg.source);
    assert_eq!(loaded.locale.as_deref(), Some("ko"));
    assert_eq!(loaded.categories, cfg.categories);
    assert!(!ctx.get_config_dir().unwrap().join("config.toml.tmp").exists());
}

#[test]
fn test_partial_config_fills_defaults() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.get_config_file_path().unwrap(),
        "source = \"/srv/site\"\nlog_level = \"debug\"\n",
    )
    .unwrap();

    let cfg = Config::load(&ctx).unwrap();
    assert_eq!(cfg.source, "/srv/site");
    assert_eq!(cfg.log_level_filter(), log::LevelFilter::Debug);
    assert_eq!(cfg.change_log_path, "data.json");
    assert_eq!(cfg.categories.len(), 2);
}

#[test]
fn test_broken_config_is_not_treated_as_missing() {
    let ctx = TestContext::new();
    std::fs::write(ctx.get_config_file_path().unwrap(), "source = [").unwrap();

    let err = Config::load_or_default(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_unknown_log_level_falls_back_to_info() {
    let cfg = Config {
        log_level: "chatty".to_string(),
        ..Config::default()
    };
    assert_eq!(cfg.log_level_filter(), log::LevelFilter::Info);
}

#[test]
fn test_context_dirs_live_under_test_root() {
    let ctx = TestContext::new();
    let print_dir = ctx.get_print_dir().unwrap();
    assert!(print_dir.starts_with(&ctx.root));
    assert!(print_dir.is_dir());
    assert_eq!(
        ctx.get_log_file_path().unwrap(),
        ctx.get_cache_dir().unwrap().join("nfview.log")
    );

    let root = ctx.root.clone();
    drop(ctx);
    assert!(!root.exists());
}
