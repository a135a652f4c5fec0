//! Persistence for tasks

use async_trait::async_trait;
use kit::{DbConnection, FrameworkError};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder};

use crate::models::tasks::{self, ActiveModel, Task};

/// Storage operations on the `tasks` table
///
/// No validation happens here; callers hand over finished active models.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, lowest id first
    async fn find_all(&self) -> Result<Vec<Task>, FrameworkError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, FrameworkError>;

    /// Insert when `id` is unset, otherwise update that row
    ///
    /// An update that matches no row fails with
    /// [`FrameworkError::ModelNotFound`] and inserts nothing.
    async fn save(&self, model: ActiveModel) -> Result<Task, FrameworkError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, FrameworkError>;

    /// Whether a row was removed
    async fn delete_by_id(&self, id: i64) -> Result<bool, FrameworkError>;
}

/// [`TaskRepository`] over the SeaORM connection pool
#[derive(Clone)]
pub struct SeaOrmTaskRepository {
    db: DbConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    async fn find_all(&self) -> Result<Vec<Task>, FrameworkError> {
        let rows = tasks::Entity::find()
            .order_by_asc(tasks::Column::Id)
            .all(self.db.inner())
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, FrameworkError> {
        Ok(tasks::Entity::find_by_id(id).one(self.db.inner()).await?)
    }

    async fn save(&self, model: ActiveModel) -> Result<Task, FrameworkError> {
        if model.id.is_not_set() {
            return Ok(model.insert(self.db.inner()).await?);
        }

        match model.update(self.db.inner()).await {
            Ok(task) => Ok(task),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(FrameworkError::model_not_found("Task"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, FrameworkError> {
        let count = tasks::Entity::find_by_id(id).count(self.db.inner()).await?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, FrameworkError> {
        let result = tasks::Entity::delete_by_id(id).exec(self.db.inner()).await?;
        Ok(result.rows_affected > 0)
    }
}
