// src/handlers/chores.rs
use crate::db::chores::{self as db_chores, SortOrder};
use crate::db::completions::record_completion;
use crate::domain::chore::parse_start_date;
use crate::domain::{evaluate, Chore, ChoreDraft, DueStatus, Frequency};
use crate::errors::ServerError;
use crate::events::ChangeEvent;
use crate::handlers::{parse_id, read_form, read_json, required_name};
use crate::responses::{json_response, redirect, ResultResp};
use crate::state::AppState;
use astra::Request;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ChoreInput {
    name: String,
    #[serde(default)]
    duration: Option<String>,
    frequency: String,
    #[serde(default)]
    start_date: Option<String>,
}

impl ChoreInput {
    fn into_draft(self) -> Result<ChoreDraft, ServerError> {
        let name = required_name(&self.name)?;
        let frequency: Frequency = self
            .frequency
            .parse()
            .map_err(|e: crate::domain::frequency::UnknownFrequency| {
                ServerError::BadRequest(e.to_string())
            })?;

        let start_date = match self.start_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_start_date(raw).ok_or_else(|| {
                ServerError::BadRequest(format!("invalid start_date '{raw}' (expected YYYY-MM-DD)"))
            })?),
        };

        Ok(ChoreDraft {
            name,
            duration: self.duration.unwrap_or_default().trim().to_string(),
            frequency,
            start_date,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ReorderInput {
    orders: Vec<SortOrder>,
}

#[derive(Debug, Deserialize)]
struct CompleteInput {
    #[serde(alias = "userId")]
    user_id: i64,
}

/// A chore plus its due status for today, as returned by the API.
#[derive(Debug, Serialize)]
struct ChoreView<'a> {
    #[serde(flatten)]
    chore: &'a Chore,
    days_overdue: i64,
    is_due: bool,
    status: DueStatus,
}

fn view<'a>(chore: &'a Chore, state: &AppState) -> ChoreView<'a> {
    let report = evaluate(&chore.schedule(), state.today(), &state.tz);
    ChoreView {
        chore,
        days_overdue: report.days_overdue,
        is_due: report.is_due(),
        status: report.status,
    }
}

pub fn list(state: &AppState) -> ResultResp {
    let chores = state.db.with_conn(|conn| db_chores::list_chores(conn))?;
    let views: Vec<ChoreView<'_>> = chores.iter().map(|c| view(c, state)).collect();
    json_response(&views)
}

pub fn create(req: Request, state: &AppState) -> ResultResp {
    let draft = read_json::<ChoreInput>(req)?.into_draft()?;
    let chore = state
        .db
        .with_conn(|conn| db_chores::create_chore(conn, &draft))?;

    info!(chore_id = chore.id, frequency = %chore.frequency, "chore added");
    state.feed.publish(ChangeEvent::ChoreAdded { chore_id: chore.id });
    json_response(&view(&chore, state))
}

pub fn update(id: i64, req: Request, state: &AppState) -> ResultResp {
    let draft = read_json::<ChoreInput>(req)?.into_draft()?;
    let chore = state
        .db
        .with_conn(|conn| db_chores::update_chore(conn, id, &draft))?;

    state.feed.publish(ChangeEvent::ChoreUpdated { chore_id: id });
    json_response(&view(&chore, state))
}

pub fn delete(id: i64, state: &AppState) -> ResultResp {
    state.db.with_conn(|conn| db_chores::delete_chore(conn, id))?;

    info!(chore_id = id, "chore deleted");
    state.feed.publish(ChangeEvent::ChoreDeleted { chore_id: id });
    json_response(&json!({ "success": true }))
}

pub fn reorder(req: Request, state: &AppState) -> ResultResp {
    let input: ReorderInput = read_json(req)?;
    state
        .db
        .with_conn(|conn| db_chores::reorder_chores(conn, &input.orders))?;

    state.feed.publish(ChangeEvent::ChoresReordered);
    json_response(&json!({ "success": true }))
}

fn complete_chore(chore_id: i64, user_id: i64, state: &AppState) -> Result<String, ServerError> {
    let now = state.now();
    let completed_at = state
        .db
        .with_conn(|conn| record_completion(conn, chore_id, user_id, now))?;

    info!(chore_id, user_id, "chore completed");
    state
        .feed
        .publish(ChangeEvent::ChoreCompleted { chore_id, user_id });
    Ok(completed_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

/// `POST /api/chores/{id}/complete` with `{"user_id": n}`
pub fn complete(id: i64, req: Request, state: &AppState) -> ResultResp {
    let input: CompleteInput = read_json(req)?;
    let completed_at = complete_chore(id, input.user_id, state)?;
    json_response(&json!({ "success": true, "completed_at": completed_at }))
}

/// `POST /chores/{id}/complete` from the dashboard form; redirects back.
pub fn complete_form(id: i64, req: Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let user_id = form
        .get("user_id")
        .ok_or_else(|| ServerError::BadRequest("user_id is required".into()))
        .and_then(|raw| parse_id(raw))?;

    complete_chore(id, user_id, state)?;
    redirect(&format!("/?user={user_id}"))
}
