// src/handlers/users.rs
use crate::db::users as db_users;
use crate::events::ChangeEvent;
use crate::handlers::{read_json, required_name};
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;
use astra::Request;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
struct UserInput {
    name: String,
    #[serde(default)]
    email: Option<String>,
}

pub fn list(state: &AppState) -> ResultResp {
    let users = state.db.with_conn(|conn| db_users::list_users(conn))?;
    json_response(&users)
}

pub fn create(req: Request, state: &AppState) -> ResultResp {
    let input: UserInput = read_json(req)?;
    let name = required_name(&input.name)?;

    let user = state
        .db
        .with_conn(|conn| db_users::create_user(conn, &name, input.email.as_deref()))?;

    info!(user_id = user.id, "user added");
    state.feed.publish(ChangeEvent::UserAdded { user_id: user.id });
    json_response(&user)
}

pub fn update(id: i64, req: Request, state: &AppState) -> ResultResp {
    let input: UserInput = read_json(req)?;
    let name = required_name(&input.name)?;

    let user = state
        .db
        .with_conn(|conn| db_users::update_user(conn, id, &name, input.email.as_deref()))?;

    state.feed.publish(ChangeEvent::UserUpdated { user_id: id });
    json_response(&user)
}

pub fn delete(id: i64, state: &AppState) -> ResultResp {
    state.db.with_conn(|conn| db_users::delete_user(conn, id))?;

    info!(user_id = id, "user deleted");
    state.feed.publish(ChangeEvent::UserDeleted { user_id: id });
    json_response(&json!({ "success": true }))
}
