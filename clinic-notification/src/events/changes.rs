//! In-process change feed for the notifications collection.
//!
//! Every successful mutation (insert, update, delete) publishes a
//! `NotificationChange` on a broadcast channel. The event carries no row
//! payload: consumers re-query the store, which keeps refreshes idempotent
//! and commutative with the interval poll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Something changed" marker. No row data, no visibility scoping; every
/// subscriber re-applies its own filters when it re-queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationChange {
    pub kind: ChangeKind,
    pub at: DateTime<Utc>,
}

impl NotificationChange {
    pub fn new(kind: ChangeKind) -> Self {
        Self {
            kind,
            at: Utc::now(),
        }
    }
}

/// Broadcast-based fan-out channel for `NotificationChange`.
///
/// Subscribers that lag past the channel capacity skip events, which is
/// harmless here: the next event (or poll tick) triggers the same full
/// re-query.
///
/// The bus is cheap to clone.
#[derive(Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<NotificationChange>,
}

impl ChangeBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Publish a change. Returns the number of active subscribers. Zero
    /// subscribers is normal and not an error.
    pub fn emit(&self, kind: ChangeKind) -> usize {
        let change = NotificationChange::new(kind);
        debug!(kind = %change.kind, "notification change emitted");
        self.tx.send(change).unwrap_or(0)
    }

    /// Obtain a new receiver. Each receiver sees every change published
    /// after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationChange> {
        self.tx.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_kind_serialization() {
        let json = serde_json::to_string(&ChangeKind::Insert).unwrap();
        assert_eq!(json, "\"insert\"");

        let parsed: ChangeKind = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(parsed, ChangeKind::Delete);
    }

    #[tokio::test]
    async fn bus_fanout() {
        let bus = ChangeBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let n = bus.emit(ChangeKind::Insert);
        assert_eq!(n, 2);

        assert_eq!(rx1.recv().await.unwrap().kind, ChangeKind::Insert);
        assert_eq!(rx2.recv().await.unwrap().kind, ChangeKind::Insert);
    }

    #[tokio::test]
    async fn emit_without_subscribers_is_ok() {
        let bus = ChangeBus::new();
        assert_eq!(bus.emit(ChangeKind::Delete), 0);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_changes() {
        let bus = ChangeBus::new();
        bus.emit(ChangeKind::Insert);

        let mut rx = bus.subscribe();
        bus.emit(ChangeKind::Update);

        assert_eq!(rx.recv().await.unwrap().kind, ChangeKind::Update);
        assert!(rx.try_recv().is_err());
    }
}
