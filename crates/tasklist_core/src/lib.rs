pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod task_store;

pub use error::AppError;
pub use model::Task;
pub use task_store::{LoadOutcome, TaskStore, TaskUpdate};
