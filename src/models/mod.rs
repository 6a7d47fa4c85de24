pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskListResponse, TaskUpdate};
pub use user::{User, UserResponse};
