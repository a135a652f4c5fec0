mod common;

use common::{add_task, setup};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn index_lists_tasks() {
    let (_db, client) = setup().await;
    client.get("/").await.assert_status(200).assert_see("No tasks yet.");

    add_task(&client, "Buy milk").await;

    client
        .get("/")
        .await
        .assert_see("Buy milk")
        .assert_dont_see("No tasks yet.");
}

#[tokio::test]
async fn add_flashes_success_once() {
    let (_db, client) = setup().await;

    let redirect = client.post_form("/add", &[("description", "Buy milk")]).await;
    redirect.assert_redirect("/");

    client
        .follow(&redirect)
        .await
        .assert_see("Task added successfully!")
        .assert_see("Buy milk");
    client
        .get("/")
        .await
        .assert_dont_see("Task added successfully!")
        .assert_see("Buy milk");
}

#[tokio::test]
async fn add_with_blank_description_persists_nothing() {
    let (_db, client) = setup().await;

    let redirect = client.post_form("/add", &[("description", "  ")]).await;
    redirect.assert_redirect("/");

    client
        .follow(&redirect)
        .await
        .assert_see("Task description cannot be empty!")
        .assert_see("No tasks yet.");
    let tasks: Vec<Value> = client.get("/tasks").await.json();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn add_without_field_is_rejected_like_blank() {
    let (_db, client) = setup().await;

    let redirect = client.post_form("/add", &[]).await;

    client
        .follow(&redirect)
        .await
        .assert_see("Task description cannot be empty!");
}

#[tokio::test]
async fn edit_form_shows_stored_description() {
    let (_db, client) = setup().await;
    let id = add_task(&client, "Water plants").await;

    client
        .get(&format!("/edit/{}", id))
        .await
        .assert_status(200)
        .assert_see(&format!("action=\"/update/{}\"", id))
        .assert_see("value=\"Water plants\"");
}

#[tokio::test]
async fn edit_of_missing_task_redirects_with_error() {
    let (_db, client) = setup().await;

    let redirect = client.get("/edit/99").await;
    redirect.assert_redirect("/");

    client
        .follow(&redirect)
        .await
        .assert_see("Task with ID 99 not found for editing.");
}

#[tokio::test]
async fn toggle_flips_and_reports() {
    let (_db, client) = setup().await;
    let id = add_task(&client, "Stretch").await;

    let redirect = client.post_form(&format!("/toggle/{}", id), &[]).await;
    redirect.assert_redirect("/");
    client
        .follow(&redirect)
        .await
        .assert_see("Stretch")
        .assert_see("changed.");
    let task: Value = client.get(&format!("/tasks/{}", id)).await.json();
    assert_eq!(task["completed"], true);

    client.post_form(&format!("/toggle/{}", id), &[]).await;
    let task: Value = client.get(&format!("/tasks/{}", id)).await.json();
    assert_eq!(task["completed"], false);
}

#[tokio::test]
async fn toggle_of_missing_task_reports_error() {
    let (_db, client) = setup().await;

    let redirect = client.post_form("/toggle/7", &[]).await;

    client
        .follow(&redirect)
        .await
        .assert_see("Task with ID 7 not found.");
}

#[tokio::test]
async fn update_changes_only_description() {
    let (_db, client) = setup().await;
    let id = add_task(&client, "Buy milk").await;
    client.post_form(&format!("/toggle/{}", id), &[]).await;
    let before: Value = client.get(&format!("/tasks/{}", id)).await.json();

    let redirect = client
        .post_form(&format!("/update/{}", id), &[("description", "Buy oat milk")])
        .await;
    redirect.assert_redirect("/");
    client
        .follow(&redirect)
        .await
        .assert_see("updated successfully!")
        .assert_see("Buy oat milk");

    let after: Value = client.get(&format!("/tasks/{}", id)).await.json();
    assert_eq!(after["description"], "Buy oat milk");
    assert_eq!(after["completed"], true);
    assert_eq!(after["createdAt"], before["createdAt"]);
}

#[tokio::test]
async fn blank_update_returns_to_form_with_rejected_text() {
    let (_db, client) = setup().await;
    let id = add_task(&client, "Buy milk").await;

    let redirect = client
        .post_form(&format!("/update/{}", id), &[("description", "   ")])
        .await;
    redirect.assert_redirect(&format!("/edit/{}", id));

    client
        .follow(&redirect)
        .await
        .assert_status(200)
        .assert_see("Task description cannot be empty!")
        .assert_see("value=\"   \"")
        .assert_dont_see("value=\"Buy milk\"");

    let stored: Value = client.get(&format!("/tasks/{}", id)).await.json();
    assert_eq!(stored["description"], "Buy milk");

    // the rejected draft is flashed once; a reload shows the stored text
    client
        .get(&format!("/edit/{}", id))
        .await
        .assert_see("value=\"Buy milk\"")
        .assert_dont_see("Task description cannot be empty!");
}

#[tokio::test]
async fn rejected_draft_stays_with_its_own_task() {
    let (_db, client) = setup().await;
    let first = add_task(&client, "Buy milk").await;
    let second = add_task(&client, "Walk the dog").await;

    client
        .post_form(&format!("/update/{}", first), &[("description", "   ")])
        .await
        .assert_redirect(&format!("/edit/{}", first));

    client
        .get(&format!("/edit/{}", second))
        .await
        .assert_status(200)
        .assert_see("value=\"Walk the dog\"")
        .assert_see(&format!("action=\"/update/{}\"", second))
        .assert_dont_see(&format!("action=\"/update/{}\"", first))
        .assert_dont_see("Task description cannot be empty!");
}

#[tokio::test]
async fn update_of_missing_task_reports_error() {
    let (_db, client) = setup().await;

    let redirect = client
        .post_form("/update/42", &[("description", "Anything")])
        .await;
    redirect.assert_redirect("/");

    client
        .follow(&redirect)
        .await
        .assert_see("Could not find task with ID 42 to update.");
}

#[tokio::test]
async fn delete_reports_success_then_failure() {
    let (_db, client) = setup().await;
    let id = add_task(&client, "Call mom").await;

    let redirect = client.post_form(&format!("/delete/{}", id), &[]).await;
    client
        .follow(&redirect)
        .await
        .assert_see("Task deleted successfully!")
        .assert_dont_see("Call mom");

    let redirect = client.post_form(&format!("/delete/{}", id), &[]).await;
    client.follow(&redirect).await.assert_see(&format!(
        "Could not delete task with ID {}. It may have already been deleted.",
        id
    ));
}

#[tokio::test]
async fn first_visit_gets_a_session_cookie() {
    let (_db, client) = setup().await;

    let response = client.get("/").await;

    let cookie = response.header("set-cookie").unwrap();
    assert!(cookie.starts_with("taskboard_session="));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(client.get("/").await.header("set-cookie").is_none());
}
