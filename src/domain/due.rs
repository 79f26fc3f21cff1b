// src/domain/due.rs

//! The due-date rule.
//!
//! Every place that shows or filters chores by due status (the dashboard, the
//! JSON list, the notification panel and both email digests) goes through
//! [`evaluate`]. `today` is always passed in; nothing here reads a clock.

use crate::domain::frequency::Frequency;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

/// `days_overdue` reported while a chore's start date is still in the future.
pub const UPCOMING_SENTINEL: i64 = -1;

/// The subset of a chore the rule looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule<'a> {
    pub frequency: &'a Frequency,
    pub start_date: Option<NaiveDate>,
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Status tag carried next to the signed day count, so a gated chore and a
/// chore finished ahead of schedule stay distinguishable even though both
/// have a negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DueStatus {
    /// Start date not reached yet.
    Upcoming { starts_in: i64 },
    /// Completed recently enough that the next occurrence is still ahead.
    AheadOfSchedule { days_ahead: i64 },
    DueToday,
    Overdue { days: i64 },
}

impl DueStatus {
    fn from_offset(days_overdue: i64) -> Self {
        match days_overdue {
            d if d < 0 => DueStatus::AheadOfSchedule { days_ahead: -d },
            0 => DueStatus::DueToday,
            d => DueStatus::Overdue { days: d },
        }
    }

    /// Badge text shown in the UI and in emails.
    pub fn label(&self) -> String {
        match self {
            DueStatus::Upcoming { .. } => "Upcoming".to_string(),
            DueStatus::AheadOfSchedule { .. } => "Completed".to_string(),
            DueStatus::DueToday => "Due Today".to_string(),
            DueStatus::Overdue { days: 1 } => "1 Day Overdue".to_string(),
            DueStatus::Overdue { days } => format!("{days} Days Overdue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueReport {
    pub days_overdue: i64,
    pub status: DueStatus,
}

impl DueReport {
    pub fn is_due(&self) -> bool {
        self.days_overdue >= 0
    }

    /// Days from `today` until the chore next becomes due; 0 once it is due.
    pub fn days_until_due(&self) -> i64 {
        match self.status {
            DueStatus::Upcoming { starts_in } => starts_in,
            DueStatus::AheadOfSchedule { days_ahead } => days_ahead,
            DueStatus::DueToday | DueStatus::Overdue { .. } => 0,
        }
    }
}

/// Signed days past due on `today`: negative while the next occurrence is
/// still ahead (or the start date is not reached), 0 on the due day.
///
/// Applies the rule in precedence order: start-date gate, never completed,
/// then frequency arithmetic against the last completion. The completion
/// instant is converted to `tz` and truncated to its calendar date before
/// subtracting, so partial days never count.
pub fn days_overdue<Tz: TimeZone>(schedule: &Schedule<'_>, today: NaiveDate, tz: &Tz) -> i64 {
    if let Some(start) = schedule.start_date {
        if today < start {
            return UPCOMING_SENTINEL;
        }
    }

    match schedule.last_completed_at {
        None => schedule
            .start_date
            .map(|start| today.signed_duration_since(start).num_days())
            .unwrap_or(0),
        Some(completed_at) => {
            let completed_on = completed_at.with_timezone(tz).date_naive();
            let days_since = today.signed_duration_since(completed_on).num_days();
            match schedule.frequency.interval_days() {
                Some(interval) => days_since - interval,
                None => 0,
            }
        }
    }
}

pub fn is_due<Tz: TimeZone>(schedule: &Schedule<'_>, today: NaiveDate, tz: &Tz) -> bool {
    days_overdue(schedule, today, tz) >= 0
}

/// [`days_overdue`] together with the status tag.
pub fn evaluate<Tz: TimeZone>(schedule: &Schedule<'_>, today: NaiveDate, tz: &Tz) -> DueReport {
    let days_overdue = days_overdue(schedule, today, tz);

    let status = match schedule.start_date {
        Some(start) if today < start => DueStatus::Upcoming {
            starts_in: start.signed_duration_since(today).num_days(),
        },
        _ => DueStatus::from_offset(days_overdue),
    };

    DueReport {
        days_overdue,
        status,
    }
}
