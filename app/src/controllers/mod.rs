pub mod task_api;
pub mod task_web;

use kit::{App, FrameworkError};

use crate::services::TaskService;

fn task_service() -> Result<TaskService, FrameworkError> {
    App::resolve::<TaskService>()
}
