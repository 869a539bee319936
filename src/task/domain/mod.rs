//! Domain model for tasks.

mod attributes;
mod deadline;
mod error;
mod ids;
mod task;

pub use attributes::{Progress, TaskPriority, TaskStatus, TaskType};
pub use deadline::parse_deadline;
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{NewTaskData, PersistedTaskData, Task};
