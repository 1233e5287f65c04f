//! In-memory task tracking: a [`TaskRepository`] of [`Task`]s plus a menu-driven
//! front end in [`cli`].

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod repository;
pub mod task;

pub use error::ValidationError;
pub use repository::TaskRepository;
pub use task::{Status, Task};
