// Defines actions and events exchanged between the UI loop and the network actor.
use crate::snapshot::Snapshot;

/// Requests from the UI loop to the network actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reload,
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    SnapshotLoaded(Box<Snapshot>),
    Status(String),
}
