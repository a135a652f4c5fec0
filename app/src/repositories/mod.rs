pub mod task_repository;

pub use task_repository::{SeaOrmTaskRepository, TaskRepository};
