// src/digest.rs

//! Email digests: the daily list of chores due today and the Sunday preview of
//! the coming week. Selection goes through the same due-date rule as the UI.

use chrono::{NaiveDate, TimeZone};
use tracing::{info, warn};

use crate::db::{self, Database};
use crate::domain::due::is_due;
use crate::domain::{evaluate, Chore, DueReport, User};
use crate::errors::ServerError;
use crate::mailer::Mailer;
use crate::templates::emails;

/// How far ahead the weekly preview looks, in days.
pub const PREVIEW_WINDOW_DAYS: i64 = 7;

/// Where digests read chores and recipients from.
pub trait ChoreSource {
    fn chores(&self) -> Result<Vec<Chore>, ServerError>;
    fn users(&self) -> Result<Vec<User>, ServerError>;
}

impl ChoreSource for Database {
    fn chores(&self) -> Result<Vec<Chore>, ServerError> {
        self.with_conn(|conn| db::chores::list_chores(conn))
    }

    fn users(&self) -> Result<Vec<User>, ServerError> {
        self.with_conn(|conn| db::users::list_users(conn))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestItem<'a> {
    pub chore: &'a Chore,
    pub report: DueReport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestOutcome {
    pub sent: usize,
    pub failed: usize,
}

/// Chores due or overdue on `today`, in list order.
pub fn daily_digest<'a, Tz: TimeZone>(
    chores: &'a [Chore],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DigestItem<'a>> {
    chores
        .iter()
        .filter(|chore| is_due(&chore.schedule(), today, tz))
        .map(|chore| DigestItem {
            chore,
            report: evaluate(&chore.schedule(), today, tz),
        })
        .collect()
}

/// Chores already due or coming due within the next week, soonest first.
pub fn weekly_preview<'a, Tz: TimeZone>(
    chores: &'a [Chore],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DigestItem<'a>> {
    let mut items: Vec<DigestItem<'a>> = chores
        .iter()
        .map(|chore| DigestItem {
            chore,
            report: evaluate(&chore.schedule(), today, tz),
        })
        .filter(|item| item.report.days_until_due() <= PREVIEW_WINDOW_DAYS)
        .collect();
    items.sort_by_key(|item| item.report.days_until_due());
    items
}

fn recipients(users: &[User]) -> impl Iterator<Item = (&User, &str)> {
    users.iter().filter_map(|u| {
        u.email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .map(|email| (u, email))
    })
}

fn deliver<M: Mailer + ?Sized>(
    mailer: &M,
    users: &[User],
    subject: &str,
    render: impl Fn(&User) -> String,
) -> DigestOutcome {
    let mut outcome = DigestOutcome::default();
    for (user, email) in recipients(users) {
        match mailer.send(email, subject, &render(user)) {
            Ok(()) => outcome.sent += 1,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "digest email failed");
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Sends the daily digest to every user with an email address. Nothing is
/// sent when no chore is due.
pub fn send_daily_digest<S, M, Tz>(
    source: &S,
    mailer: &M,
    today: NaiveDate,
    tz: &Tz,
    app_url: &str,
) -> Result<DigestOutcome, ServerError>
where
    S: ChoreSource + ?Sized,
    M: Mailer + ?Sized,
    Tz: TimeZone,
{
    let chores = source.chores()?;
    let due = daily_digest(&chores, today, tz);
    if due.is_empty() {
        info!(%today, "no chores due, daily digest skipped");
        return Ok(DigestOutcome::default());
    }

    let users = source.users()?;
    let subject = format!("Daily Digest: {} Tasks for Today", due.len());
    let outcome = deliver(mailer, &users, &subject, |user| {
        emails::daily_digest_email(&user.name, today, &due, app_url).into_string()
    });

    info!(%today, due = due.len(), sent = outcome.sent, failed = outcome.failed, "daily digest finished");
    Ok(outcome)
}

/// Sends the Sunday preview of the coming week to every user with an email address.
pub fn send_weekly_preview<S, M, Tz>(
    source: &S,
    mailer: &M,
    today: NaiveDate,
    tz: &Tz,
    app_url: &str,
) -> Result<DigestOutcome, ServerError>
where
    S: ChoreSource + ?Sized,
    M: Mailer + ?Sized,
    Tz: TimeZone,
{
    let chores = source.chores()?;
    let upcoming = weekly_preview(&chores, today, tz);
    let users = source.users()?;

    let outcome = deliver(mailer, &users, "Sunday Preview: Your Week Ahead", |user| {
        emails::weekly_preview_email(&user.name, today, &upcoming, app_url).into_string()
    });

    info!(%today, chores = upcoming.len(), sent = outcome.sent, failed = outcome.failed, "weekly preview finished");
    Ok(outcome)
}
