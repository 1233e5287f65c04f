use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A single unit of work tracked by a [`crate::TaskRepository`].
///
/// `completed_at` is set exactly when `status` is [`Status::Completed`]; the only way
/// to get there is [`Task::mark_complete`].
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Task {
    id: u32,
    title: String,
    description: String,
    status: Status,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Eq, PartialEq, Clone, Copy, Hash)]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

/// Trims `title` and checks it is non-empty and within [`MAX_TITLE_LEN`].
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(title.to_string())
}

/// Trims `description` and checks it is within [`MAX_DESCRIPTION_LEN`]. Empty is fine.
pub fn validate_description(description: &str) -> Result<String, ValidationError> {
    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(description.to_string())
}

impl Task {
    /// Builds a pending task after validating both fields.
    ///
    /// Nothing is constructed when validation fails.
    pub fn new(id: u32, title: &str, description: &str) -> Result<Self, ValidationError> {
        let title = validate_title(title)?;
        let description = validate_description(description)?;
        Ok(Self {
            id,
            title,
            description,
            status: Status::Pending,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Moves a pending task to [`Status::Completed`] and stamps `completed_at`.
    ///
    /// Returns `false` without touching anything if the task was already completed.
    pub fn mark_complete(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        self.status = Status::Completed;
        self.completed_at = Some(Utc::now());
        true
    }

    /// Replaces fields that already passed [`validate_title`] / [`validate_description`].
    pub(crate) fn apply_update(&mut self, title: Option<String>, description: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

#[cfg(test)]
impl Task {
    /// Builds a task with fixed timestamps so rendering can be asserted exactly.
    pub(crate) fn with_timestamps(
        id: u32,
        title: &str,
        description: &str,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status: if completed_at.is_some() {
                Status::Completed
            } else {
                Status::Pending
            },
            created_at,
            completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_create_pending_task() {
        let before = Utc::now();

        let task = Task::new(1, "Buy milk", "").unwrap();

        assert_eq!(task.id(), 1);
        assert_eq!(task.title(), "Buy milk");
        assert_eq!(task.description(), "");
        assert_eq!(task.status(), Status::Pending);
        assert!(task.completed_at().is_none());
        assert!(task.created_at() >= before);
        assert!(task.created_at() <= Utc::now());
    }

    #[test]
    fn trims_title_and_description() {
        let task = Task::new(1, "  Clean house \t", "\n Kitchen and bathroom  ").unwrap();

        assert_eq!(task.title(), "Clean house");
        assert_eq!(task.description(), "Kitchen and bathroom");
    }

    #[test]
    fn rejects_empty_title() {
        assert_eq!(Task::new(1, "", ""), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn rejects_whitespace_only_title() {
        assert_eq!(Task::new(1, "   \t\n", ""), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn accepts_title_at_limit() {
        let title = "x".repeat(MAX_TITLE_LEN);

        let task = Task::new(1, &title, "").unwrap();

        assert_eq!(task.title().len(), MAX_TITLE_LEN);
    }

    #[test]
    fn rejects_title_over_limit() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);

        assert_eq!(
            Task::new(1, &title, ""),
            Err(ValidationError::TitleTooLong { max: 100 })
        );
    }

    #[test]
    fn title_length_is_measured_after_trimming() {
        let title = format!("  {}  ", "x".repeat(MAX_TITLE_LEN));

        assert!(Task::new(1, &title, "").is_ok());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        // each 'é' is two bytes
        let title = "é".repeat(MAX_TITLE_LEN);

        assert!(Task::new(1, &title, "").is_ok());
    }

    #[test]
    fn rejects_description_over_limit() {
        let description = "d".repeat(MAX_DESCRIPTION_LEN + 1);

        assert_eq!(
            Task::new(1, "Title", &description),
            Err(ValidationError::DescriptionTooLong { max: 500 })
        );
    }

    #[test]
    fn accepts_description_at_limit() {
        let description = "d".repeat(MAX_DESCRIPTION_LEN);

        assert!(Task::new(1, "Title", &description).is_ok());
    }

    #[test]
    fn mark_complete_transitions_pending_task() {
        let mut task = Task::new(1, "Buy milk", "").unwrap();

        let changed = task.mark_complete();

        assert!(changed);
        assert_eq!(task.status(), Status::Completed);
        assert!(task.is_completed());
        assert!(task.completed_at().is_some());
    }

    #[test]
    fn mark_complete_is_a_no_op_when_already_completed() {
        let mut task = Task::new(1, "Buy milk", "").unwrap();
        task.mark_complete();
        let first_completed_at = task.completed_at();

        let changed = task.mark_complete();

        assert!(!changed);
        assert_eq!(task.status(), Status::Completed);
        assert_eq!(task.completed_at(), first_completed_at);
    }

    #[test]
    fn apply_update_only_touches_provided_fields() {
        let mut task = Task::new(1, "Buy milk", "2 litres").unwrap();

        task.apply_update(Some("Buy almond milk".to_string()), None);

        assert_eq!(task.title(), "Buy almond milk");
        assert_eq!(task.description(), "2 litres");
    }

    mod status_tests {
        use super::*;

        #[test]
        fn status_displays_lowercase() {
            assert_eq!(Status::Pending.to_string(), "pending");
            assert_eq!(Status::Completed.to_string(), "completed");
        }

        #[test]
        fn default_status_is_pending() {
            assert_eq!(Status::default(), Status::Pending);
        }
    }
}
