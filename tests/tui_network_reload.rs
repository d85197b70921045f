// File: tests/tui_network_reload.rs
#![cfg(feature = "tui")]
use nfview::config::Config;
use nfview::context::TestContext;
use nfview::loader::Loader;
use nfview::snapshot::SnapshotSources;
use nfview::tui::action::{Action, AppEvent};
use nfview::tui::handlers::handle_app_event;
use nfview::tui::network::run_network_actor;
use nfview::tui::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

async fn next_snapshot(rx: &mut mpsc::Receiver<AppEvent>, state: &mut AppState) {
    loop {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("network actor timed out")
            .expect("network actor hung up");
        let done = matches!(event, AppEvent::SnapshotLoaded(_));
        handle_app_event(state, event);
        if done {
            return;
        }
    }
}

#[tokio::test]
async fn test_actor_loads_on_start_and_on_reload() {
    let ctx = Arc::new(TestContext::new());
    let dir = ctx.data_dir();
    std::fs::write(
        dir.join("snapshot.json"),
        r#"{ "items": [ { "code": "NFPC 101", "title": "소화기구" } ] }"#,
    )
    .unwrap();

    let cfg = Config::default();
    let loader = Loader::new(&dir.to_string_lossy(), &cfg.user_agent).unwrap();
    let sources = SnapshotSources::from_config(&cfg);
    let mut state = AppState::new(Vec::new());
    assert!(state.loading);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);
    let actor = tokio::spawn(run_network_actor(loader, sources, action_rx, event_tx));

    next_snapshot(&mut event_rx, &mut state).await;
    assert!(!state.loading);
    assert_eq!(state.view().banners.len(), 1);
    assert_eq!(state.view().categories.len(), 2);

    // New data only shows up after an explicit reload.
    std::fs::write(
        dir.join("snapshot.json"),
        r#"{ "items": [ { "code": "NFPC 101" }, { "code": "NFPC 102" } ] }"#,
    )
    .unwrap();
    state.controller.set_query("102");
    action_tx.send(Action::Reload).await.unwrap();
    next_snapshot(&mut event_rx, &mut state).await;
    assert_eq!(state.view().banners.len(), 1);
    assert_eq!(state.view().banners[0].code, "NFPC 102");

    action_tx.send(Action::Quit).await.unwrap();
    timeout(Duration::from_secs(5), actor)
        .await
        .expect("actor did not stop")
        .unwrap();
}
