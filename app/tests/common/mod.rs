#![allow(dead_code)]

use kit::testing::{TestClient, TestContainer, TestDatabase};
use kit::FlashMiddleware;
use taskboard::migrations::Migrator;
use taskboard::{bootstrap, routes, views};

/// Migrated in-memory database plus a client wired like the real server
///
/// Keep the database alive for the whole test; dropping it clears the
/// thread's test container.
pub async fn setup() -> (TestDatabase, TestClient) {
    let db = TestDatabase::fresh::<Migrator>()
        .await
        .expect("in-memory database should migrate");
    TestContainer::singleton(bootstrap::task_service(db.connection()));
    TestContainer::singleton(views::compile().expect("templates should compile"));

    let client = TestClient::new(routes::register()).middleware(FlashMiddleware::memory());
    (db, client)
}

/// Create a task through the form and return its id
pub async fn add_task(client: &TestClient, description: &str) -> i64 {
    client
        .post_form("/add", &[("description", description)])
        .await
        .assert_redirect("/");
    let tasks: Vec<serde_json::Value> = client.get("/tasks").await.json();
    tasks
        .iter()
        .rev()
        .find(|t| t["description"] == description)
        .and_then(|t| t["id"].as_i64())
        .expect("created task should be listed")
}
