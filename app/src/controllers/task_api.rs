//! JSON API under `/tasks`

use kit::{HttpResponse, Request, Response};

use super::task_service;
use crate::models::tasks::{TaskDraft, TaskPatch};

fn not_found() -> Response {
    Ok(HttpResponse::new().status(404))
}

pub async fn index(_req: Request) -> Response {
    let tasks = task_service()?.get_all_tasks().await?;
    Ok(HttpResponse::json_of(&tasks)?)
}

pub async fn show(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    match task_service()?.get_task_by_id(id).await? {
        Some(task) => Ok(HttpResponse::json_of(&task)?),
        None => not_found(),
    }
}

pub async fn store(req: Request) -> Response {
    let draft: TaskDraft = req.json()?;
    let task = task_service()?.create_task(draft).await?;
    Ok(HttpResponse::json_of(&task)?.status(201))
}

pub async fn update(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let patch: TaskPatch = req.json()?;
    match task_service()?.update_task(id, patch).await? {
        Some(task) => Ok(HttpResponse::json_of(&task)?),
        None => not_found(),
    }
}

pub async fn destroy(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    if task_service()?.delete_task(id).await? {
        Ok(HttpResponse::no_content())
    } else {
        not_found()
    }
}
