pub mod entities;
pub mod tasks;
