//! Server-rendered pages and form posts
//!
//! Every form post answers with a redirect carrying a flash `message` or
//! `error`.

use kit::{App, AppConfig, Config, Redirect, Request, Response, View};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::task_service;
use crate::models::tasks::{TaskDraft, TaskPatch};
use crate::services::TaskError;

#[derive(Debug, Default, Deserialize)]
struct DescriptionForm {
    #[serde(default)]
    description: String,
}

/// What the edit form shows: the stored task, or a rejected submission
#[derive(Debug, Serialize, Deserialize)]
struct EditForm {
    id: i64,
    description: String,
}

fn app_name() -> String {
    Config::get::<AppConfig>()
        .map(|config| config.name)
        .unwrap_or_else(|| "Taskboard".to_string())
}

fn home() -> Redirect {
    Redirect::to("/")
}

pub async fn index(req: Request) -> Response {
    let tasks = task_service()?.get_all_tasks().await?;
    let flash = req.flash();

    let context = json!({
        "app_name": app_name(),
        "tasks": tasks,
        "new_task": TaskDraft::default(),
        "message": flash.text("message"),
        "error": flash.text("error"),
    });
    Ok(App::resolve::<View>()?.render("tasks.html", &context)?)
}

pub async fn store(req: Request) -> Response {
    let form: DescriptionForm = req.form()?;

    match task_service()?.create_task(TaskDraft::new(form.description)).await {
        Ok(_) => home().with("message", "Task added successfully!").into(),
        Err(err) => match err.description_error() {
            Some(message) => home().with("error", message).into(),
            None => Err(err.into()),
        },
    }
}

pub async fn edit(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let Some(task) = task_service()?.get_task_by_id(id).await? else {
        return home()
            .with("error", format!("Task with ID {} not found for editing.", id))
            .into();
    };

    let flash = req.flash();
    // a draft rejected for another task is dropped along with its error
    let draft = flash.get::<EditForm>("task");
    let stale = draft.as_ref().is_some_and(|draft| draft.id != id);
    let form = draft.filter(|draft| draft.id == id).unwrap_or(EditForm {
        id: task.id,
        description: task.description,
    });

    let context = json!({
        "app_name": app_name(),
        "task": form,
        "message": flash.text("message"),
        "error": if stale { None } else { flash.text("error") },
    });
    Ok(App::resolve::<View>()?.render("edit_task.html", &context)?)
}

pub async fn toggle(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    match task_service()?.toggle_task(id).await? {
        Some(task) => home()
            .with(
                "message",
                format!("Status of task '{}' changed.", task.description),
            )
            .into(),
        None => home()
            .with("error", format!("Task with ID {} not found.", id))
            .into(),
    }
}

pub async fn update(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let form: DescriptionForm = req.form()?;

    let patch = TaskPatch::description(form.description.clone());
    match task_service()?.update_task(id, patch).await {
        Ok(Some(task)) => home()
            .with(
                "message",
                format!("Task '{}' updated successfully!", task.description),
            )
            .into(),
        Ok(None) => home()
            .with("error", format!("Could not find task with ID {} to update.", id))
            .into(),
        Err(TaskError::Validation(errors)) => {
            let rejected = EditForm {
                id,
                description: form.description,
            };
            let message = errors.first("description").unwrap_or_default().to_string();
            Redirect::route("tasks.edit", &[("id", &id.to_string())])?
                .with("error", message)
                .with("task", rejected)
                .into()
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn destroy(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    if task_service()?.delete_task(id).await? {
        home().with("message", "Task deleted successfully!").into()
    } else {
        home()
            .with(
                "error",
                format!(
                    "Could not delete task with ID {}. It may have already been deleted.",
                    id
                ),
            )
            .into()
    }
}
