// Manages background loading for the TUI.
use crate::loader::Loader;
use crate::snapshot::{Snapshot, SnapshotSources};
use crate::tui::action::{Action, AppEvent};
use rust_i18n::t;
use tokio::sync::mpsc::{Receiver, Sender};

async fn load_and_send(loader: &Loader, sources: &SnapshotSources, event_tx: &Sender<AppEvent>) {
    let _ = event_tx
        .send(AppEvent::Status(t!("status_loading").to_string()))
        .await;
    let snapshot = Snapshot::load(loader, sources).await;
    let _ = event_tx
        .send(AppEvent::SnapshotLoaded(Box::new(snapshot)))
        .await;
    let _ = event_tx
        .send(AppEvent::Status(t!("status_ready").to_string()))
        .await;
}

/// Loads the snapshot once on start, then again on every [`Action::Reload`].
/// Returns when the UI asks to quit or drops its sender.
pub async fn run_network_actor(
    loader: Loader,
    sources: SnapshotSources,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    load_and_send(&loader, &sources, &event_tx).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,
            Action::Reload => {
                log::info!("Reload requested");
                load_and_send(&loader, &sources, &event_tx).await;
            }
        }
    }
    log::debug!("Network actor stopped");
}
