mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::Value;

use common::{get, player, send, session_token, test_app, RecordingStore, Reply};

fn names(rows: &Value) -> Vec<String> {
    rows.as_array()
        .expect("array")
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

fn roster_with_sentinels() -> Vec<Value> {
    vec![
        player("TOTAL", 100.0, 20.0, 40.0, 10.0, 10.0, 200.0),
        player("A. First", 20.0, 4.0, 6.0, 2.0, 2.0, 30.0),
        player("  total ", 100.0, 20.0, 40.0, 10.0, 10.0, 200.0),
        player("B. Second", 12.0, 2.0, 3.0, 1.0, 1.0, 0.0),
        player("Total", 100.0, 20.0, 40.0, 10.0, 10.0, 200.0),
    ]
}

#[tokio::test]
async fn summary_removes_sentinels_from_both_views() -> Result<()> {
    let store = RecordingStore::new(Reply::Rows(roster_with_sentinels()));
    let token = session_token("auth0|coach");

    let res = send(test_app(store), get("/dashboard", Some(&token))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["sub"], "auth0|coach");
    assert_eq!(names(&res.body["players"]), vec!["A. First", "B. Second"]);
    assert_eq!(names(&res.body["per_minute"]), vec!["A. First", "B. Second"]);
    assert_eq!(res.body["per_minute"][1]["ppm"], 12.0);
    Ok(())
}

#[tokio::test]
async fn single_views_are_filtered() -> Result<()> {
    let store = RecordingStore::new(Reply::Rows(roster_with_sentinels()));
    let token = session_token("auth0|coach");

    let res = send(test_app(store.clone()), get("/dashboard/players", Some(&token))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.body), vec!["A. First", "B. Second"]);

    let res = send(test_app(store), get("/dashboard/per-minute", Some(&token))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.body), vec!["A. First", "B. Second"]);
    assert_eq!(res.body[0]["ppm"], 0.67);
    Ok(())
}

#[tokio::test]
async fn backend_failure_is_reported_not_redirected() -> Result<()> {
    let store = RecordingStore::new(Reply::Fail("x".into()));
    let token = session_token("auth0|coach");

    let res = send(test_app(store), get("/dashboard/players", Some(&token))).await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "x");
    Ok(())
}
