// src/tests/router_tests/events_tests.rs
use crate::tests::utils::{
    add_chore, body_json, empty_request, json_request, send, test_app, test_app_with_polls,
};
use serde_json::json;
use std::time::{Duration, Instant};

#[test]
fn events_without_since_report_current_version() {
    let app = test_app();
    let snap = body_json(send(&app, empty_request("GET", "/api/events")));
    assert_eq!(snap, json!({ "version": 0, "events": [], "resync": false }));
}

#[test]
fn mutations_show_up_in_the_feed() {
    let app = test_app();
    let id = add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));
    send(
        &app,
        json_request("POST", &format!("/api/chores/{id}/complete"), json!({ "user_id": 1 })),
    );

    let snap = body_json(send(&app, empty_request("GET", "/api/events?since=0")));
    assert_eq!(snap["version"], 2);
    assert_eq!(
        snap["events"],
        json!([
            { "version": 1, "type": "CHORE_ADDED", "chore_id": id },
            { "version": 2, "type": "CHORE_COMPLETED", "chore_id": id, "user_id": 1 },
        ])
    );
}

#[test]
fn poll_times_out_with_no_changes() {
    let app = test_app();
    add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));

    let snap = body_json(send(&app, empty_request("GET", "/api/events?since=1")));
    assert_eq!(snap["version"], 1);
    assert_eq!(snap["events"], json!([]));
    assert_eq!(snap["resync"], false);
}

#[test]
fn failed_mutations_publish_nothing() {
    let app = test_app();
    send(
        &app,
        json_request("POST", "/api/chores", json!({ "name": "Dishes", "frequency": "hourly" })),
    );
    assert_eq!(app.state.feed.version(), 0);
}

#[test]
fn full_poll_slots_do_not_block_other_requests() {
    let app = test_app_with_polls(1, Duration::from_secs(10));

    std::thread::scope(|s| {
        let parked = s.spawn(|| body_json(send(&app, empty_request("GET", "/api/events?since=0"))));

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.state.active_polls() < 1 {
            assert!(Instant::now() < deadline, "poller never parked");
            std::thread::sleep(Duration::from_millis(5));
        }

        // The only slot is taken: a second poll is answered at once.
        let started = Instant::now();
        let busy = body_json(send(&app, empty_request("GET", "/api/events?since=0")));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(busy["retry_after_secs"], 5);
        assert_eq!(busy["events"], json!([]));

        // Mutations go through and wake the parked poller.
        let started = Instant::now();
        let id = add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));
        assert!(started.elapsed() < Duration::from_secs(2));

        let woken = parked.join().unwrap();
        assert_eq!(woken["version"], 1);
        assert_eq!(woken["events"][0]["chore_id"], id);
        assert!(woken.get("retry_after_secs").is_none());
    });

    assert_eq!(app.state.active_polls(), 0);
}
