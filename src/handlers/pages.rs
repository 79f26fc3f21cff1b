// src/handlers/pages.rs
use crate::db::{chores as db_chores, stats, users as db_users};
use crate::domain::{evaluate, User};
use crate::handlers::parse_query;
use crate::responses::{html_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{dashboard_page, ChoreRow, DashboardVm};
use astra::Request;

/// The user picked with `?user=`, or the first user when absent or unknown.
fn select_user(users: &[User], selected: Option<&String>) -> Option<User> {
    selected
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|id| users.iter().find(|u| u.id == id))
        .or_else(|| users.first())
        .cloned()
}

pub fn dashboard(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let feed_version = state.feed.version();
    let today = state.today();

    let (users, chores, stats) = state.db.with_conn(|conn| {
        Ok((
            db_users::list_users(conn)?,
            db_chores::list_chores(conn)?,
            stats::leaderboard(conn)?,
        ))
    })?;

    let chores = chores
        .into_iter()
        .map(|chore| {
            let report = evaluate(&chore.schedule(), today, &state.tz);
            ChoreRow { chore, report }
        })
        .collect();

    let vm = DashboardVm {
        today,
        current_user: select_user(&users, params.get("user")),
        users,
        chores,
        stats,
        feed_version,
    };

    html_response(dashboard_page(&vm))
}
