//! Hub and message routes driven through the full pipeline over the in-memory store.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use support::TestApp;

fn not_found_failure() -> Value {
    json!({
        "message": "Bad request",
        "err": { "message": "Hub not found; invalid id" }
    })
}

fn body_required_failure() -> Value {
    json!({
        "message": "Bad request",
        "err": { "message": "Please include request body" }
    })
}

#[tokio::test]
async fn list_starts_empty() {
    let app = TestApp::new();

    let res = app.get("/api/hubs").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let app = TestApp::new();

    let res = app
        .request(Method::POST, "/api/hubs", Some(json!({ "name": "Engineering" })))
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    let hub = res.json();
    assert_eq!(hub["name"], "Engineering");
    assert!(hub["id"].is_i64());
}

#[tokio::test]
async fn create_keeps_extra_fields() {
    let app = TestApp::new();

    let hub = app
        .create_hub(json!({ "name": "Design", "description": "pixels", "floor": 3 }))
        .await;

    assert_eq!(hub["description"], "pixels");
    assert_eq!(hub["floor"], 3);
}

#[tokio::test]
async fn create_without_name_is_a_store_failure() {
    let app = TestApp::new();

    let res = app
        .request(Method::POST, "/api/hubs", Some(json!({ "description": "nameless" })))
        .await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), json!({ "message": "Error adding the hub" }));
}

#[tokio::test]
async fn get_returns_the_stored_record() {
    let app = TestApp::new();
    let created = app.create_hub(json!({ "name": "Engineering" })).await;

    let res = app.get(&format!("/api/hubs/{}", created["id"])).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), created);
}

#[tokio::test]
async fn get_unknown_id_goes_through_the_error_responder() {
    let app = TestApp::new();

    let unknown = app.get("/api/hubs/42").await;
    assert_eq!(unknown.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(unknown.json(), not_found_failure());

    let not_a_number = app.get("/api/hubs/abc").await;
    assert_eq!(not_a_number.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(not_a_number.json(), not_found_failure());
}

#[tokio::test]
async fn delete_removes_the_hub() {
    let app = TestApp::new();
    let created = app.create_hub(json!({ "name": "Doomed" })).await;
    let uri = format!("/api/hubs/{}", created["id"]);

    let res = app
        .request(Method::DELETE, &uri, Some(json!({ "confirm": true })))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "message": "The hub has been nuked" }));

    let after = app.get(&uri).await;
    assert_eq!(after.json(), not_found_failure());
}

#[tokio::test]
async fn delete_unknown_id_is_404() {
    let app = TestApp::new();

    let res = app
        .request(Method::DELETE, "/api/hubs/42", Some(json!({ "confirm": true })))
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({ "message": "The hub could not be found" }));
}

#[tokio::test]
async fn delete_requires_a_body() {
    let app = TestApp::new();
    let created = app.create_hub(json!({ "name": "Survivor" })).await;
    let uri = format!("/api/hubs/{}", created["id"]);

    let res = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), body_required_failure());

    assert_eq!(app.get(&uri).await.status, StatusCode::OK);
}

#[tokio::test]
async fn update_merges_fields() {
    let app = TestApp::new();
    let created = app
        .create_hub(json!({ "name": "Ops", "floor": 1 }))
        .await;
    let uri = format!("/api/hubs/{}", created["id"]);

    let res = app
        .request(Method::PUT, &uri, Some(json!({ "name": "Platform", "floor": 2 })))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    let updated = res.json();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Platform");
    assert_eq!(updated["floor"], 2);
    assert_eq!(app.get(&uri).await.json(), updated);
}

#[tokio::test]
async fn update_with_empty_body_is_rejected() {
    let app = TestApp::new();
    let created = app.create_hub(json!({ "name": "Ops" })).await;
    let uri = format!("/api/hubs/{}", created["id"]);

    let res = app.request(Method::PUT, &uri, Some(json!({}))).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), body_required_failure());
    assert_eq!(app.get(&uri).await.json(), created);
}

#[tokio::test]
async fn update_checks_existence_before_body() {
    let app = TestApp::new();

    let res = app.request(Method::PUT, "/api/hubs/42", Some(json!({}))).await;

    assert_eq!(res.json(), not_found_failure());
}

#[tokio::test]
async fn message_is_created_under_the_route_hub() {
    let app = TestApp::new();
    let hub = app.create_hub(json!({ "name": "Chat" })).await;
    let uri = format!("/api/hubs/{}/messages", hub["id"]);

    let res = app
        .request(Method::POST, &uri, Some(json!({ "content": "hi", "hub_id": 999 })))
        .await;

    assert_eq!(res.status.as_u16(), 210);
    let message = res.json();
    assert_eq!(message["hub_id"], hub["id"]);
    assert_eq!(message["content"], "hi");

    let listed = app.get(&uri).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json(), json!([message]));
}

#[tokio::test]
async fn messages_of_unknown_hub_are_rejected() {
    let app = TestApp::new();

    let list = app.get("/api/hubs/7/messages").await;
    assert_eq!(list.json(), not_found_failure());

    let create = app
        .request(Method::POST, "/api/hubs/7/messages", Some(json!({ "content": "hi" })))
        .await;
    assert_eq!(create.json(), not_found_failure());
}

#[tokio::test]
async fn message_requires_a_body() {
    let app = TestApp::new();
    let hub = app.create_hub(json!({ "name": "Quiet" })).await;
    let uri = format!("/api/hubs/{}/messages", hub["id"]);

    let res = app.request(Method::POST, &uri, Some(json!({}))).await;

    assert_eq!(res.json(), body_required_failure());
    assert_eq!(app.get(&uri).await.json(), json!([]));
}

#[tokio::test]
async fn listing_is_stable_and_honors_filters() {
    let app = TestApp::new();
    for name in ["charlie", "alpha", "bravo"] {
        app.create_hub(json!({ "name": name })).await;
    }

    let uri = "/api/hubs?sortby=name&sortdir=desc&limit=2";
    let first = app.get(uri).await.json();
    let second = app.get(uri).await.json();

    assert_eq!(first, second);
    let names: Vec<&str> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|hub| hub["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["charlie", "bravo"]);
}

#[tokio::test]
async fn zero_limit_is_signaled() {
    let app = TestApp::new();
    app.create_hub(json!({ "name": "alpha" })).await;

    let res = app.get("/api/hubs?limit=0").await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json();
    assert_eq!(body["message"], "Bad request");
    assert!(body["err"]["message"].is_string());
}

#[tokio::test]
async fn unknown_sort_column_is_signaled() {
    let app = TestApp::new();

    let res = app.get("/api/hubs?sortby=password").await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json();
    assert_eq!(body["message"], "Bad request");
    assert!(body["err"]["message"].is_string());
}
