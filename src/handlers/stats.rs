use crate::db::stats::leaderboard;
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;

pub fn list(state: &AppState) -> ResultResp {
    let stats = state.db.with_conn(|conn| leaderboard(conn))?;
    json_response(&stats)
}
