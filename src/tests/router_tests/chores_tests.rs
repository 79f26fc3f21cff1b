// src/tests/router_tests/chores_tests.rs
use crate::tests::utils::{add_chore, body_json, empty_request, json_request, send, test_app};
use serde_json::json;

#[test]
fn new_chore_without_start_is_due_today() {
    let app = test_app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/chores",
            json!({ "name": "Dishes", "duration": "15 min", "frequency": "Daily" }),
        ),
    );
    assert_eq!(resp.status(), 200);

    let chore = body_json(resp);
    assert_eq!(chore["frequency"], "daily");
    assert!(chore["created_at"].is_string());
    assert_eq!(chore["sort_order"], 1);
    assert_eq!(chore["days_overdue"], 0);
    assert_eq!(chore["is_due"], true);
    assert_eq!(chore["status"], json!({ "kind": "DUE_TODAY" }));
}

#[test]
fn future_start_date_is_upcoming() {
    let app = test_app();
    add_chore(
        &app,
        json!({ "name": "Gutters", "frequency": "yearly", "start_date": "2024-06-20" }),
    );

    let chores = body_json(send(&app, empty_request("GET", "/api/chores")));
    let chore = &chores[0];
    assert_eq!(chore["start_date"], "2024-06-20");
    assert_eq!(chore["days_overdue"], -1);
    assert_eq!(chore["is_due"], false);
    assert_eq!(chore["status"], json!({ "kind": "UPCOMING", "starts_in": 5 }));
}

#[test]
fn past_start_date_never_completed_counts_from_start() {
    let app = test_app();
    add_chore(
        &app,
        json!({ "name": "Filter", "frequency": "monthly", "start_date": "2024-06-12" }),
    );

    let chore = &body_json(send(&app, empty_request("GET", "/api/chores")))[0];
    assert_eq!(chore["days_overdue"], 3);
    assert_eq!(chore["status"], json!({ "kind": "OVERDUE", "days": 3 }));
}

#[test]
fn invalid_chore_input_is_rejected() {
    let app = test_app();

    let resp = send(
        &app,
        json_request("POST", "/api/chores", json!({ "name": "Dishes", "frequency": "hourly" })),
    );
    assert_eq!(resp.status(), 400);

    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/chores",
            json!({ "name": "Dishes", "frequency": "daily", "start_date": "June 1st" }),
        ),
    );
    assert_eq!(resp.status(), 400);

    let resp = send(&app, json_request("POST", "/api/chores", json!({ "name": "" , "frequency": "daily" })));
    assert_eq!(resp.status(), 400);

    let chores = body_json(send(&app, empty_request("GET", "/api/chores")));
    assert_eq!(chores, json!([]));
}

#[test]
fn completing_a_chore_moves_it_ahead_of_schedule() {
    let app = test_app();
    let id = add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));

    let resp = send(
        &app,
        json_request("POST", &format!("/api/chores/{id}/complete"), json!({ "userId": 2 })),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(
        body_json(resp),
        json!({ "success": true, "completed_at": "2024-06-15T12:00:00.000Z" })
    );

    let chore = &body_json(send(&app, empty_request("GET", "/api/chores")))[0];
    assert_eq!(chore["days_overdue"], -1);
    assert_eq!(chore["is_due"], false);
    assert_eq!(chore["status"], json!({ "kind": "AHEAD_OF_SCHEDULE", "days_ahead": 1 }));

    let stats = body_json(send(&app, empty_request("GET", "/api/stats")));
    assert_eq!(stats[0]["name"], "Wife");
    assert_eq!(stats[0]["completion_count"], 1);
}

#[test]
fn completing_for_unknown_user_is_not_found() {
    let app = test_app();
    let id = add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));

    let resp = send(
        &app,
        json_request("POST", &format!("/api/chores/{id}/complete"), json!({ "user_id": 77 })),
    );
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({ "error": "Not Found" }));

    let chore = &body_json(send(&app, empty_request("GET", "/api/chores")))[0];
    assert_eq!(chore["last_completed_at"], serde_json::Value::Null);
}

#[test]
fn update_reorder_and_delete() {
    let app = test_app();
    let a = add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));
    let b = add_chore(&app, json!({ "name": "Vacuum", "frequency": "weekly" }));

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/chores/{b}"),
            json!({ "name": "Vacuum upstairs", "frequency": "biannually" }),
        ),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["frequency"], "biannually");

    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/chores/reorder",
            json!({ "orders": [{ "id": a, "sort_order": 2 }, { "id": b, "sort_order": 1 }] }),
        ),
    );
    assert_eq!(resp.status(), 200);

    let chores = body_json(send(&app, empty_request("GET", "/api/chores")));
    assert_eq!(chores[0]["name"], "Vacuum upstairs");
    assert_eq!(chores[1]["name"], "Dishes");

    let resp = send(&app, empty_request("DELETE", &format!("/api/chores/{a}")));
    assert_eq!(resp.status(), 200);
    let chores = body_json(send(&app, empty_request("GET", "/api/chores")));
    assert_eq!(chores.as_array().map(Vec::len), Some(1));

    let resp = send(
        &app,
        json_request("PUT", "/api/chores/999", json!({ "name": "X", "frequency": "daily" })),
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn malformed_paths_and_bodies() {
    let app = test_app();
    assert_eq!(send(&app, empty_request("DELETE", "/api/chores/abc")).status(), 400);
    assert_eq!(send(&app, empty_request("GET", "/api/nothing")).status(), 404);

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/chores")
        .body(astra::Body::from("{not json"))
        .unwrap();
    assert_eq!(send(&app, req).status(), 400);
}
