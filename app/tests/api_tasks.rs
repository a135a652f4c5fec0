mod common;

use chrono::{NaiveDateTime, Utc};
use common::setup;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn lists_empty_collection() {
    let (_db, client) = setup().await;

    let body: Value = client.get("/tasks").await.assert_status(200).json();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn creates_with_server_assigned_fields() {
    let (_db, client) = setup().await;
    let before = Utc::now().naive_utc();

    let response = client
        .post_json(
            "/tasks",
            &json!({ "id": 500, "description": "Buy milk", "createdAt": "1999-01-01T00:00:00" }),
        )
        .await;
    let task: Value = response.assert_status(201).json();

    assert_eq!(task["id"], 1);
    assert_eq!(task["description"], "Buy milk");
    assert_eq!(task["completed"], false);
    let created_at: NaiveDateTime = serde_json::from_value(task["createdAt"].clone()).unwrap();
    assert!(created_at >= before);
}

#[tokio::test]
async fn rejects_blank_description() {
    let (_db, client) = setup().await;

    let body: Value = client
        .post_json("/tasks", &json!({ "description": "   " }))
        .await
        .assert_status(422)
        .json();

    assert_eq!(
        body["errors"]["description"][0],
        "Task description cannot be empty!"
    );
    let tasks: Value = client.get("/tasks").await.json();
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn shows_task_or_empty_404() {
    let (_db, client) = setup().await;
    client
        .post_json("/tasks", &json!({ "description": "Read a book" }))
        .await
        .assert_status(201);

    let task: Value = client.get("/tasks/1").await.assert_status(200).json();
    assert_eq!(task["description"], "Read a book");

    let missing = client.get("/tasks/2").await;
    missing.assert_status(404);
    assert!(missing.body().is_empty());
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (_db, client) = setup().await;

    client.get("/tasks/abc").await.assert_status(400);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (_db, client) = setup().await;

    let body: Value = client
        .send_raw(Method::POST, "/tasks", "application/json", "{\"description\":")
        .await
        .assert_status(400)
        .json();

    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let (_db, client) = setup().await;
    let created: Value = client
        .post_json("/tasks", &json!({ "description": "Water plants" }))
        .await
        .json();

    let updated: Value = client
        .put_json("/tasks/1", &json!({ "completed": true }))
        .await
        .assert_status(200)
        .json();
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["description"], "Water plants");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let renamed: Value = client
        .put_json("/tasks/1", &json!({ "description": "Water the garden" }))
        .await
        .assert_status(200)
        .json();
    assert_eq!(renamed["description"], "Water the garden");
    assert_eq!(renamed["completed"], true);
    assert_eq!(renamed["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_of_missing_task_is_404_and_creates_nothing() {
    let (_db, client) = setup().await;

    client
        .put_json("/tasks/9", &json!({ "description": "Ghost" }))
        .await
        .assert_status(404);

    let tasks: Value = client.get("/tasks").await.json();
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn update_rejects_blank_description() {
    let (_db, client) = setup().await;
    client
        .post_json("/tasks", &json!({ "description": "Stretch" }))
        .await;

    client
        .put_json("/tasks/1", &json!({ "description": "" }))
        .await
        .assert_status(422);

    let task: Value = client.get("/tasks/1").await.json();
    assert_eq!(task["description"], "Stretch");
}

#[tokio::test]
async fn delete_then_lookup_is_absent() {
    let (_db, client) = setup().await;
    client
        .post_json("/tasks", &json!({ "description": "Call mom" }))
        .await;

    let deleted = client.delete("/tasks/1").await;
    deleted.assert_status(204);
    assert!(deleted.body().is_empty());

    client.get("/tasks/1").await.assert_status(404);
    client.delete("/tasks/1").await.assert_status(404);
}
