// src/events.rs

//! In-process change feed.
//!
//! Every successful mutation publishes one [`ChangeEvent`]. Clients long-poll
//! `/api/events?since=N`; the request blocks on a condvar until the version
//! moves past `N` (or the timeout elapses) and the client then refetches.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

const RECENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeEvent {
    ChoreAdded { chore_id: i64 },
    ChoresReordered,
    ChoreCompleted { chore_id: i64, user_id: i64 },
    ChoreUpdated { chore_id: i64 },
    ChoreDeleted { chore_id: i64 },
    UserAdded { user_id: i64 },
    UserUpdated { user_id: i64 },
    UserDeleted { user_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionedEvent {
    pub version: u64,
    #[serde(flatten)]
    pub event: ChangeEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    pub version: u64,
    pub events: Vec<VersionedEvent>,
    /// Set when the caller's version cannot be caught up from the recent
    /// events (too old, or from a previous server run): refetch everything.
    pub resync: bool,
    /// Set when the server answered without waiting because every long-poll
    /// slot was taken. The client should sleep this long before polling again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

#[derive(Debug, Default)]
struct FeedState {
    version: u64,
    recent: VecDeque<VersionedEvent>,
}

#[derive(Debug, Default)]
pub struct ChangeFeed {
    state: Mutex<FeedState>,
    changed: Condvar,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the event and wakes every waiting poller. Returns the new version.
    pub fn publish(&self, event: ChangeEvent) -> u64 {
        let mut state = self.lock();
        state.version += 1;
        let version = state.version;

        if state.recent.len() == RECENT_CAPACITY {
            state.recent.pop_front();
        }
        state.recent.push_back(VersionedEvent {
            version,
            event: event.clone(),
        });
        drop(state);

        debug!(version, ?event, "change published");
        self.changed.notify_all();
        version
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Blocks until the version differs from `since` or `timeout` passes.
    pub fn wait_since(&self, since: u64, timeout: Duration) -> FeedSnapshot {
        let guard = self.lock();
        let (state, _) = self
            .changed
            .wait_timeout_while(guard, timeout, |s| s.version == since)
            .unwrap_or_else(PoisonError::into_inner);
        Self::snapshot(&state, since)
    }

    /// Non-blocking variant of [`wait_since`](Self::wait_since).
    pub fn since(&self, since: u64) -> FeedSnapshot {
        Self::snapshot(&self.lock(), since)
    }

    fn snapshot(state: &FeedState, since: u64) -> FeedSnapshot {
        let oldest_kept = state.recent.front().map(|e| e.version).unwrap_or(state.version + 1);
        let resync = since > state.version || (since + 1 < oldest_kept && since < state.version);

        FeedSnapshot {
            version: state.version,
            events: state
                .recent
                .iter()
                .filter(|e| e.version > since)
                .cloned()
                .collect(),
            resync,
            retry_after_secs: None,
        }
    }
}
