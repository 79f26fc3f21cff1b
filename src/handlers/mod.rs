pub mod chores;
pub mod events;
pub mod pages;
pub mod stats;
pub mod users;

use crate::errors::ServerError;
use astra::Request;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::Read;

const MAX_BODY_BYTES: u64 = 64 * 1024;

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }
    Ok(buf)
}

/// Deserialize a JSON request body.
pub fn read_json<T: DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    let buf = read_body(req)?;
    serde_json::from_slice(&buf).map_err(|e| ServerError::BadRequest(format!("invalid JSON: {e}")))
}

/// Decode an `application/x-www-form-urlencoded` body.
pub fn read_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let buf = read_body(req)?;
    Ok(url::form_urlencoded::parse(&buf).into_owned().collect())
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServerError::BadRequest(format!("invalid id '{raw}'")))
}

/// Trims and rejects empty names.
pub fn required_name(raw: &str) -> Result<String, ServerError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("name is required".into()));
    }
    Ok(name.to_string())
}
