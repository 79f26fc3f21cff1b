use crate::handlers::{chores, events, pages, parse_id, stats, users};
use crate::errors::ServerError;
use crate::responses::{html_error_response, json_error_response, ResultResp};
use crate::state::AppState;
use astra::{Request, Response};
use tracing::debug;

/// Entry point for the server loop: dispatches and turns errors into
/// JSON bodies for `/api/*` and HTML pages elsewhere.
pub fn serve(req: Request, state: &AppState) -> Response {
    let is_api = req.uri().path().starts_with("/api/");
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) if is_api => json_error_response(err),
        Err(err) => html_error_response(err),
    };

    debug!(%method, %path, status = resp.status().as_u16(), "request handled");
    resp
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => pages::dashboard(&req, state),
        ("POST", ["chores", id, "complete"]) => chores::complete_form(parse_id(id)?, req, state),

        ("GET", ["api", "users"]) => users::list(state),
        ("POST", ["api", "users"]) => users::create(req, state),
        ("PUT", ["api", "users", id]) => users::update(parse_id(id)?, req, state),
        ("DELETE", ["api", "users", id]) => users::delete(parse_id(id)?, state),

        ("GET", ["api", "chores"]) => chores::list(state),
        ("POST", ["api", "chores"]) => chores::create(req, state),
        ("POST", ["api", "chores", "reorder"]) => chores::reorder(req, state),
        ("POST", ["api", "chores", id, "complete"]) => chores::complete(parse_id(id)?, req, state),
        ("PUT", ["api", "chores", id]) => chores::update(parse_id(id)?, req, state),
        ("DELETE", ["api", "chores", id]) => chores::delete(parse_id(id)?, state),

        ("GET", ["api", "stats"]) => stats::list(state),
        ("GET", ["api", "events"]) => events::poll(&req, state),

        _ => Err(ServerError::NotFound),
    }
}
