use crate::errors::ServerError;
use crate::responses::json_with_status;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::{error, warn};

fn log_error(err: &ServerError) {
    if err.status() >= 500 {
        error!(error = %err, "request failed");
    } else {
        warn!(error = %err, "request rejected");
    }
}

/// Message shown to clients; internal details stay in the log.
fn public_message(err: &ServerError) -> String {
    match err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        ServerError::DbError(_) | ServerError::InternalError => {
            "Internal Server Error".to_string()
        }
    }
}

/// Convert a ServerError into an HTML error page
pub fn html_error_response(err: ServerError) -> Response {
    log_error(&err);
    let status = err.status();
    let message = maud::html! { (public_message(&err)) }.into_string();

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Error {status}</title>
  <style>
    body {{
      font-family: system-ui, sans-serif;
      max-width: 720px;
      margin: 4rem auto;
      padding: 1rem;
    }}
    p {{
      font-size: 1.1rem;
      color: #444;
    }}
  </style>
</head>
<body>
  <h1>Error {status}</h1>
  <p>{message}</p>
  <p><a href="/">← Back to chores</a></p>
</body>
</html>"#
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Convert a ServerError into `{"error": "..."}` for API clients
pub fn json_error_response(err: ServerError) -> Response {
    log_error(&err);
    json_with_status(err.status(), &json!({ "error": public_message(&err) }))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
