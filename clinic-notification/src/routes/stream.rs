//! GET /notifications/stream — SSE feed for the badge and panel.
//!
//! Each connection owns a `FeedPresenter`. Two triggers drive it: a fixed
//! refresh interval and the in-process change bus. Both collapse into one
//! store re-query whose result is pushed as SSE frames:
//!
//!   event: badge   data: {"unread": <n>}
//!   event: feed    data: [<notification>, ...]     (only with ?feed=true)
//!
//! The change event itself carries no row data, so a lagged subscriber
//! loses nothing: the next trigger re-queries the same authoritative state.

use axum::extract::{Query, State};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use clinic_shared::clients::db::DbPool;
use clinic_shared::errors::AppResult;
use clinic_shared::types::auth::AuthUser;

use crate::feed::{FeedPresenter, FeedSnapshot, FeedView};
use crate::models::Notification;
use crate::services::notification_service;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    /// Open the panel for this connection: stream the full entry list in
    /// addition to the badge count.
    pub feed: Option<bool>,
}

/// Collects the frames one refresh produces so they can be yielded in
/// order from the stream.
#[derive(Default)]
struct SseFrames {
    frames: Vec<SseEvent>,
}

impl FeedView for SseFrames {
    fn render_badge(&mut self, unread: i64) {
        self.frames.push(
            SseEvent::default()
                .event("badge")
                .data(serde_json::json!({ "unread": unread }).to_string()),
        );
    }

    fn render_feed(&mut self, entries: &[Notification]) {
        match serde_json::to_string(entries) {
            Ok(json) => self.frames.push(SseEvent::default().event("feed").data(json)),
            Err(e) => warn!(error = %e, "failed to serialize feed entries"),
        }
    }
}

fn fetch_snapshot(db: &DbPool, user_id: Uuid, panel_open: bool) -> AppResult<FeedSnapshot> {
    let unread = notification_service::count_unread(db, user_id)?;
    let entries = if panel_open {
        notification_service::list_for_user(db, user_id, true)?
    } else {
        Vec::new()
    };
    Ok(FeedSnapshot { unread, entries })
}

/// SSE stream of badge (and optionally feed) updates for the caller.
pub async fn notification_stream(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let mut rx = state.changes.subscribe();
    let mut presenter = FeedPresenter::new();
    if query.feed.unwrap_or(false) {
        presenter.open();
    }

    let refresh_every = Duration::from_secs(state.config.feed_refresh_secs);

    info!(
        user_id = %user.id,
        feed = presenter.is_open(),
        "notification stream connected"
    );

    let stream = async_stream::stream! {
        // The first tick fires immediately, so the client gets its
        // current badge (and feed) right after connecting.
        let mut interval = tokio::time::interval(refresh_every);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                change = rx.recv() => {
                    match change {
                        Ok(change) => {
                            debug!(kind = %change.kind, "refresh triggered by change");
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                            // Missed markers are harmless: the re-query
                            // below reads the current state anyway.
                            warn!(skipped = n, "stream lagged behind change bus");
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                            info!("change bus closed, ending stream");
                            break;
                        }
                    }
                }
            }

            if !presenter.begin_refresh() {
                continue;
            }

            let mut frames = SseFrames::default();
            match fetch_snapshot(&state.db, user.id, presenter.is_open()) {
                Ok(snapshot) => presenter.complete_refresh(snapshot, &mut frames),
                Err(e) => {
                    warn!(error = %e, "feed refresh failed, keeping last snapshot");
                    presenter.fail_refresh();
                }
            }

            for frame in frames.frames {
                yield Ok(frame);
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::PanelState;

    #[test]
    fn query_defaults_to_badge_only() {
        let query: StreamQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.feed.unwrap_or(false));
    }

    #[test]
    fn refresh_produces_badge_then_feed_frames() {
        let mut presenter = FeedPresenter::new();
        presenter.open();
        assert_eq!(presenter.state(), PanelState::Open);
        assert!(presenter.begin_refresh());

        let mut frames = SseFrames::default();
        presenter.complete_refresh(
            FeedSnapshot {
                unread: 1,
                entries: Vec::new(),
            },
            &mut frames,
        );

        // One badge frame and one feed frame.
        assert_eq!(frames.frames.len(), 2);
    }

    #[test]
    fn badge_only_refresh_produces_single_frame() {
        let mut presenter = FeedPresenter::new();
        assert!(presenter.begin_refresh());

        let mut frames = SseFrames::default();
        presenter.complete_refresh(FeedSnapshot::default(), &mut frames);

        assert_eq!(frames.frames.len(), 1);
    }
}
