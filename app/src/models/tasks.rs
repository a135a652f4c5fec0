//! Task model: the stored row plus the inputs that create and change it

pub use super::entities::tasks::*;

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A persisted task
pub type Task = Model;

pub const BLANK_DESCRIPTION: &str = "Task description cannot be empty!";

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Stamp `created_at` on insert; updates leave it alone
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            self.created_at = Set(Utc::now().naive_utc());
        }
        Ok(self)
    }
}

/// Input for creating a task
///
/// Unknown fields such as `id` or `createdAt` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskDraft {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Task description cannot be empty!"))]
    pub description: String,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskDraft {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: None,
        }
    }

    /// Active model for an insert; `completed` defaults to false
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            description: Set(self.description),
            completed: Set(self.completed.unwrap_or(false)),
            ..Default::default()
        }
    }
}

/// Sparse update: only supplied fields change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskPatch {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Task description cannot be empty!"))]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            description: None,
            completed: Some(completed),
        }
    }

    /// Overlay the patch on a stored task
    ///
    /// Only patched columns are marked changed, so `created_at` is never
    /// part of the UPDATE.
    pub fn apply_to(self, task: Task) -> ActiveModel {
        let mut model: ActiveModel = task.into();
        if let Some(description) = self.description {
            model.description = Set(description);
        }
        if let Some(completed) = self.completed {
            model.completed = Set(completed);
        }
        model
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}
