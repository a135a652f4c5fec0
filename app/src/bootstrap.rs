//! Service and middleware registration, run before the server starts

use kit::{global_middleware, App, DbConnection, FlashMiddleware, FrameworkError, DB};
use std::sync::Arc;

use crate::middleware;
use crate::repositories::SeaOrmTaskRepository;
use crate::services::TaskService;
use crate::views;

pub async fn register() -> Result<(), FrameworkError> {
    let db = DB::init().await?;
    App::singleton(task_service(db));
    App::singleton(views::compile()?);

    // outermost first
    global_middleware!(middleware::LoggingMiddleware);
    global_middleware!(FlashMiddleware::memory());
    Ok(())
}

/// Task service backed by the SeaORM repository
pub fn task_service(db: DbConnection) -> TaskService {
    TaskService::new(Arc::new(SeaOrmTaskRepository::new(db)))
}
