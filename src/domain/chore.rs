// src/domain/chore.rs

use crate::domain::Schedule;
use crate::domain::frequency::Frequency;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// A chore as stored in the `chores` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chore {
    pub id: i64,
    pub name: String,
    /// Free text estimate, e.g. "15 min".
    pub duration: String,
    pub frequency: Frequency,
    pub sort_order: i64,
    pub start_date: Option<NaiveDate>,
    pub last_completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Chore {
    /// The fields the due-date rule reads.
    pub fn schedule(&self) -> Schedule<'_> {
        Schedule {
            frequency: &self.frequency,
            start_date: self.start_date,
            last_completed_at: self.last_completed_at,
        }
    }
}

/// Validated input for creating or updating a chore.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreDraft {
    pub name: String,
    pub duration: String,
    pub frequency: Frequency,
    pub start_date: Option<NaiveDate>,
}

/// Accepts `YYYY-MM-DD` or a full timestamp and keeps the date as written,
/// in the timestamp's own offset.
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| naive.date())
        })
}

/// Parses the timestamp formats found in the `last_completed_at` column:
/// RFC 3339 (what this server writes), SQLite's `CURRENT_TIMESTAMP` layout
/// (taken as UTC), and a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
