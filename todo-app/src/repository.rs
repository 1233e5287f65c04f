use crate::error::ValidationError;
use crate::task::{Status, Task, validate_description, validate_title};
use tracing::{debug, info};

/// In-memory owner of every [`Task`] and of id assignment.
///
/// Tasks are kept in insertion order. Ids start at 1 and are never reused, even after
/// the task holding one is deleted. The last id handed out is `u32::MAX`; after that
/// every add fails with [`ValidationError::IdsExhausted`].
#[derive(Debug, Clone)]
pub struct TaskRepository {
    tasks: Vec<Task>,
    // one past u32::MAX once ids run out
    next_id: u64,
}

impl Default for TaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a task and appends it.
    ///
    /// # Returns
    ///
    /// The stored task, or a [`ValidationError`] in which case the repository is
    /// left untouched and the id is not consumed.
    #[tracing::instrument(skip(self))]
    pub fn add_task(&mut self, title: &str, description: &str) -> Result<&Task, ValidationError> {
        let id = u32::try_from(self.next_id).map_err(|_| ValidationError::IdsExhausted)?;
        let task = Task::new(id, title, description)?;
        self.next_id += 1;
        info!(id = task.id(), "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Removes the task with `id`. Returns whether anything was removed.
    #[tracing::instrument(skip(self))]
    pub fn delete_task(&mut self, id: u32) -> bool {
        match self.position(id) {
            Some(index) => {
                self.tasks.remove(index);
                info!("task deleted");
                true
            }
            None => {
                debug!("no task to delete");
                false
            }
        }
    }

    pub fn get_task(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Every task in insertion order, collected into a fresh `Vec`.
    pub fn get_all_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().collect()
    }

    pub fn get_tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Changes the title and/or description of the task with `id`.
    ///
    /// `None` leaves a field as it is. Every provided field is validated before any is
    /// applied, so a failure never leaves the task half-updated.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if there is no such task, `Ok(true)` once the update is applied.
    #[tracing::instrument(skip(self))]
    pub fn update_task(
        &mut self,
        id: u32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool, ValidationError> {
        let Some(index) = self.position(id) else {
            debug!("no task to update");
            return Ok(false);
        };

        let title = title.map(validate_title).transpose()?;
        let description = description.map(validate_description).transpose()?;

        self.tasks[index].apply_update(title, description);
        info!("task updated");
        Ok(true)
    }

    /// Completes the task with `id`.
    ///
    /// `false` covers both a missing task and one that was already completed; use
    /// [`TaskRepository::get_task`] afterwards to tell them apart.
    #[tracing::instrument(skip(self))]
    pub fn mark_complete(&mut self, id: u32) -> bool {
        let completed = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .is_some_and(Task::mark_complete);
        if completed {
            info!("task completed");
        }
        completed
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The id the next successful [`TaskRepository::add_task`] will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}


#[cfg(test)]
mod next_id_tests {
    use super::*;

    #[test]
    fn test_new_repository_starts_with_id_one() {
        let repo = TaskRepository::new();
        assert_eq!(
            repo.next_id, 1,
            "New repository should start with next_id = 1"
        );
    }

    #[test]
    fn test_next_id_increments_after_adding_task() {
        let mut repo = TaskRepository::new();

        let id = repo.add_task("Test task", "").unwrap().id();

        assert_eq!(id, 1, "First task should have ID 1");
        assert_eq!(repo.next_id, 2, "next_id should be incremented to 2");
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut repo = TaskRepository::new();

        let mut previous = 0;
        for i in 0..20 {
            let id = repo.add_task(&format!("Task {i}"), "").unwrap().id();
            assert!(id > previous, "id {id} should be greater than {previous}");
            previous = id;
        }
    }

    #[test]
    fn test_add_task_uses_next_id() {
        let mut repo = TaskRepository::new();
        repo.next_id = 42;

        let id = repo.add_task("Task with custom ID", "").unwrap().id();

        assert_eq!(
            id, 42,
            "Task should have been assigned the current next_id value"
        );
        assert_eq!(repo.next_id, 43, "next_id should have been incremented");
        assert!(repo.get_task(42).is_some(), "Task should be stored with ID 42");
    }

    #[test]
    fn test_next_id_unchanged_after_failed_add() {
        let mut repo = TaskRepository::new();
        repo.add_task("Task 1", "").unwrap();

        let result = repo.add_task(&"x".repeat(101), "");

        assert!(result.is_err());
        assert_eq!(
            repo.next_id, 2,
            "next_id should only advance on a successful add"
        );
    }

    #[test]
    fn test_last_id_is_u32_max_then_adds_are_rejected() {
        let mut repo = TaskRepository::new();
        repo.next_id = u64::from(u32::MAX);

        let id = repo.add_task("Last task", "").unwrap().id();
        let result = repo.add_task("One too many", "");

        assert_eq!(id, u32::MAX);
        assert_eq!(result, Err(ValidationError::IdsExhausted));
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.next_id,
            u64::from(u32::MAX) + 1,
            "next_id should not move once ids run out"
        );
    }

    #[test]
    fn test_next_id_maintained_after_removing_tasks() {
        let mut repo = TaskRepository::new();
        repo.add_task("Task 1", "").unwrap();
        repo.add_task("Task 2", "").unwrap();
        repo.add_task("Task 3", "").unwrap();

        repo.delete_task(2);

        assert_eq!(
            repo.next_id, 4,
            "next_id should not change when tasks are removed"
        );

        let id = repo.add_task("Task 4", "").unwrap().id();
        assert_eq!(
            id, 4,
            "New task should get ID 4, not reuse the removed ID 2"
        );
    }
}
