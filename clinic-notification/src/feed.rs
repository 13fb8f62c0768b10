//! Badge and feed presenter.
//!
//! Holds the only client-visible notification state: the unread badge
//! count and, while the panel is open, the ordered feed. Two independent
//! triggers (the poll interval and the change bus) funnel into one
//! `begin_refresh` entry point; a refresh already in flight is not
//! duplicated. Every refresh replaces the snapshot wholesale with the
//! store's authoritative answer, so overlapping triggers converge to the
//! same displayed state regardless of order.
//!
//! Rendering goes through the `FeedView` capability passed into
//! `complete_refresh`, never through ambient state. A refresh that
//! resolves after the panel closed still updates the snapshot and badge
//! but performs no feed render.

use crate::models::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

/// Authoritative notification state as of the last successful refresh.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub unread: i64,
    pub entries: Vec<Notification>,
}

/// Render capability handed to the presenter by the surface that owns the
/// actual output (SSE frames in this service, assertions in tests).
pub trait FeedView {
    fn render_badge(&mut self, unread: i64);
    fn render_feed(&mut self, entries: &[Notification]);
}

pub struct FeedPresenter {
    state: PanelState,
    snapshot: FeedSnapshot,
    refresh_in_flight: bool,
}

impl FeedPresenter {
    pub fn new() -> Self {
        Self {
            state: PanelState::Closed,
            snapshot: FeedSnapshot::default(),
            refresh_in_flight: false,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    /// Last successfully applied snapshot; retained across failed
    /// refreshes.
    pub fn snapshot(&self) -> &FeedSnapshot {
        &self.snapshot
    }

    /// Open the panel. Entering `Open` always wants a fresh fetch, so the
    /// caller should follow up with `begin_refresh`.
    pub fn open(&mut self) {
        self.state = PanelState::Open;
    }

    /// Close the panel. Any refresh still in flight is left to complete;
    /// it will update the badge but not render the feed.
    pub fn close(&mut self) {
        self.state = PanelState::Closed;
    }

    pub fn toggle(&mut self) -> PanelState {
        match self.state {
            PanelState::Closed => self.open(),
            PanelState::Open => self.close(),
        }
        self.state
    }

    /// Single entry point for both refresh triggers. Returns `false` when
    /// a refresh is already in flight, in which case the caller must not
    /// issue a second store call.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refresh_in_flight {
            return false;
        }
        self.refresh_in_flight = true;
        true
    }

    /// Apply a completed refresh. The badge always reflects the new
    /// snapshot; the feed is rendered only if the panel is open *now*,
    /// not when the fetch started.
    pub fn complete_refresh(&mut self, snapshot: FeedSnapshot, view: &mut impl FeedView) {
        self.refresh_in_flight = false;
        self.snapshot = snapshot;

        view.render_badge(self.snapshot.unread);
        if self.is_open() {
            view.render_feed(&self.snapshot.entries);
        }
    }

    /// A refresh failed: keep the last rendered snapshot and allow the
    /// next trigger to try again. Nothing is rendered.
    pub fn fail_refresh(&mut self) {
        self.refresh_in_flight = false;
    }
}

impl Default for FeedPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingView {
        badges: Vec<i64>,
        feeds: Vec<usize>,
    }

    impl FeedView for RecordingView {
        fn render_badge(&mut self, unread: i64) {
            self.badges.push(unread);
        }

        fn render_feed(&mut self, entries: &[Notification]) {
            self.feeds.push(entries.len());
        }
    }

    fn entry() -> Notification {
        Notification {
            id: Uuid::new_v4(),
            title: "New Medicine Added".into(),
            message: "A new medicine \"Aspirin\" has been added to the inventory.".into(),
            owner_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    fn snapshot(unread: i64, entries: usize) -> FeedSnapshot {
        FeedSnapshot {
            unread,
            entries: (0..entries).map(|_| entry()).collect(),
        }
    }

    #[test]
    fn starts_closed_with_empty_snapshot() {
        let presenter = FeedPresenter::new();
        assert_eq!(presenter.state(), PanelState::Closed);
        assert_eq!(presenter.snapshot().unread, 0);
        assert!(presenter.snapshot().entries.is_empty());
    }

    #[test]
    fn toggle_flips_state() {
        let mut presenter = FeedPresenter::new();
        assert_eq!(presenter.toggle(), PanelState::Open);
        assert_eq!(presenter.toggle(), PanelState::Closed);
    }

    #[test]
    fn concurrent_refresh_is_deduplicated() {
        let mut presenter = FeedPresenter::new();
        assert!(presenter.begin_refresh());
        // Second trigger while the first is in flight.
        assert!(!presenter.begin_refresh());

        let mut view = RecordingView::default();
        presenter.complete_refresh(snapshot(1, 1), &mut view);

        // In-flight flag cleared: the next trigger fetches again.
        assert!(presenter.begin_refresh());
    }

    #[test]
    fn closed_refresh_updates_badge_only() {
        let mut presenter = FeedPresenter::new();
        assert!(presenter.begin_refresh());

        let mut view = RecordingView::default();
        presenter.complete_refresh(snapshot(3, 3), &mut view);

        assert_eq!(view.badges, vec![3]);
        assert!(view.feeds.is_empty());
        assert_eq!(presenter.snapshot().unread, 3);
    }

    #[test]
    fn open_refresh_renders_feed() {
        let mut presenter = FeedPresenter::new();
        presenter.open();
        assert!(presenter.begin_refresh());

        let mut view = RecordingView::default();
        presenter.complete_refresh(snapshot(2, 5), &mut view);

        assert_eq!(view.badges, vec![2]);
        assert_eq!(view.feeds, vec![5]);
    }

    #[test]
    fn close_during_inflight_refresh_skips_feed_render() {
        let mut presenter = FeedPresenter::new();
        presenter.open();
        assert!(presenter.begin_refresh());

        // Panel closed before the fetch resolves.
        presenter.close();

        let mut view = RecordingView::default();
        presenter.complete_refresh(snapshot(4, 4), &mut view);

        assert_eq!(view.badges, vec![4]);
        assert!(view.feeds.is_empty());
        // Snapshot still updated for the next open.
        assert_eq!(presenter.snapshot().entries.len(), 4);
    }

    #[test]
    fn failed_refresh_keeps_last_snapshot() {
        let mut presenter = FeedPresenter::new();
        presenter.open();

        let mut view = RecordingView::default();
        assert!(presenter.begin_refresh());
        presenter.complete_refresh(snapshot(2, 2), &mut view);

        assert!(presenter.begin_refresh());
        presenter.fail_refresh();

        assert_eq!(presenter.snapshot().unread, 2);
        assert_eq!(presenter.snapshot().entries.len(), 2);
        assert!(presenter.begin_refresh());
    }

    #[test]
    fn refreshes_replace_snapshot_wholesale() {
        let mut presenter = FeedPresenter::new();
        presenter.open();
        let mut view = RecordingView::default();

        presenter.begin_refresh();
        presenter.complete_refresh(snapshot(5, 5), &mut view);
        presenter.begin_refresh();
        presenter.complete_refresh(snapshot(0, 0), &mut view);

        assert_eq!(presenter.snapshot().unread, 0);
        assert!(presenter.snapshot().entries.is_empty());
        assert_eq!(view.badges, vec![5, 0]);
    }
}
