// src/handlers/events.rs
use crate::handlers::parse_query;
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;
use astra::Request;
use tracing::debug;

/// How long a client turned away for lack of a poll slot should wait.
const BUSY_RETRY_SECS: u64 = 5;

/// `GET /api/events?since=N`
///
/// Without `since` the current version is returned at once, so a client can
/// learn where to start. With it, the request is held until something
/// changes or the poll timeout passes. When every poll slot is taken the
/// current snapshot is returned immediately with `retry_after_secs` set.
pub fn poll(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let since = params.get("since").and_then(|v| v.parse::<u64>().ok());

    let snapshot = match since {
        Some(since) => match state.try_poll_slot() {
            Some(_slot) => state.feed.wait_since(since, state.poll_timeout),
            None => {
                debug!(since, active = state.active_polls(), "poll slots full");
                let mut snapshot = state.feed.since(since);
                if snapshot.events.is_empty() && !snapshot.resync {
                    snapshot.retry_after_secs = Some(BUSY_RETRY_SECS);
                }
                snapshot
            }
        },
        None => state.feed.since(state.feed.version()),
    };

    json_response(&snapshot)
}
