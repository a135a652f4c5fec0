//! Task use cases shared by the JSON API and the HTML forms

use kit::{FrameworkError, HttpError, HttpResponse, ValidationErrors};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::models::tasks::{Task, TaskDraft, TaskPatch};
use crate::repositories::TaskRepository;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Storage(#[from] FrameworkError),
}

impl TaskError {
    /// First validation message for `description`, if this is a validation
    /// failure
    pub fn description_error(&self) -> Option<&str> {
        match self {
            Self::Validation(errors) => errors.first("description"),
            Self::Storage(_) => None,
        }
    }
}

impl From<validator::ValidationErrors> for TaskError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.into())
    }
}

impl HttpError for TaskError {
    fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::Storage(err) => err.status_code(),
        }
    }
}

impl From<TaskError> for FrameworkError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(errors) => FrameworkError::Validation(errors),
            TaskError::Storage(err) => err,
        }
    }
}

impl From<TaskError> for HttpResponse {
    fn from(err: TaskError) -> Self {
        FrameworkError::from(err).into()
    }
}

/// Validation and conditional writes on top of a [`TaskRepository`]
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>, TaskError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Validate and insert; `completed` defaults to false
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task, TaskError> {
        draft.validate()?;
        let task = self.repository.save(draft.into_active_model()).await?;
        tracing::debug!(id = task.id, "task created");
        Ok(task)
    }

    /// Apply `patch` to an existing task
    ///
    /// `None` when the task does not exist, including when it is deleted
    /// between the read and the write.
    pub async fn update_task(&self, id: i64, patch: TaskPatch) -> Result<Option<Task>, TaskError> {
        patch.validate()?;

        let Some(current) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        match self.repository.save(patch.apply_to(current)).await {
            Ok(task) => Ok(Some(task)),
            Err(FrameworkError::ModelNotFound { .. }) => {
                tracing::debug!(id, "task vanished before update");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// `false` when there was nothing to delete
    pub async fn delete_task(&self, id: i64) -> Result<bool, TaskError> {
        if !self.repository.exists_by_id(id).await? {
            return Ok(false);
        }
        Ok(self.repository.delete_by_id(id).await?)
    }

    /// Flip `completed`
    pub async fn toggle_task(&self, id: i64) -> Result<Option<Task>, TaskError> {
        let Some(task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        self.update_task(id, TaskPatch::completed(!task.completed)).await
    }
}
