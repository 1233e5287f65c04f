use thiserror::Error;

/// Raised when a task's title or description breaks a field constraint, or when the
/// repository has no ids left to hand out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task title cannot exceed {max} characters")]
    TitleTooLong { max: usize },
    #[error("Task description cannot exceed {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("No task ids left to assign")]
    IdsExhausted,
}
