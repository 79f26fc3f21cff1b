// src/state.rs
use crate::config::Config;
use crate::db::Database;
use crate::events::ChangeFeed;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Long-poll slots when no worker count is known.
const DEFAULT_MAX_POLLS: usize = 4;

/// Everything a request handler needs, shared by all astra workers.
pub struct AppState {
    pub db: Database,
    pub feed: ChangeFeed,
    /// Household time zone.
    pub tz: FixedOffset,
    pub poll_timeout: Duration,
    /// At most this many requests may block in the change feed at once, so
    /// parked long-polls never hold every worker.
    max_polls: usize,
    active_polls: AtomicUsize,
    clock: fn() -> DateTime<Utc>,
}

/// A held long-poll slot; released on drop.
pub struct PollSlot<'a> {
    active: &'a AtomicUsize,
}

impl Drop for PollSlot<'_> {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

impl AppState {
    pub fn new(db: Database, tz: FixedOffset, poll_timeout: Duration) -> Self {
        Self {
            db,
            feed: ChangeFeed::new(),
            tz,
            poll_timeout,
            max_polls: DEFAULT_MAX_POLLS,
            active_polls: AtomicUsize::new(0),
            clock: Utc::now,
        }
    }

    /// Half the worker pool may wait on the feed; the rest stay free for
    /// page loads and mutations.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Database::new(cfg.db_path.clone()), cfg.utc_offset, cfg.poll_timeout)
            .with_poll_limit(cfg.max_workers / 2)
    }

    pub fn with_poll_limit(mut self, max_polls: usize) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Replaces the wall clock, for tests.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Takes a long-poll slot, or `None` when all are in use.
    pub fn try_poll_slot(&self) -> Option<PollSlot<'_>> {
        self.active_polls
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_polls).then_some(n + 1)
            })
            .ok()
            .map(|_| PollSlot {
                active: &self.active_polls,
            })
    }

    pub fn active_polls(&self) -> usize {
        self.active_polls.load(Ordering::Acquire)
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// The current calendar date in the household time zone.
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.tz).date_naive()
    }
}
