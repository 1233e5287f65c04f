//! Menu-driven front end over a [`TaskRepository`].
//!
//! Holds no task state of its own: every action goes through the repository's public
//! operations. Input and output are generic so a session can be scripted in tests.

use crate::render::render_task;
use crate::repository::TaskRepository;
use crate::task::{Status, Task};
use chrono::Local;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::debug;

const MENU_RULE_WIDTH: usize = 50;
const TASK_RULE_WIDTH: usize = 60;

type Step = anyhow::Result<ControlFlow<()>>;

/// What the user picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Update,
    View,
    Complete,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Delete),
            "3" => Some(Self::Update),
            "4" => Some(Self::View),
            "5" => Some(Self::Complete),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Which tasks the view sub-menu lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFilter {
    All,
    Only(Status),
}

impl ViewFilter {
    fn label(&self) -> &'static str {
        match self {
            ViewFilter::All => "All",
            ViewFilter::Only(Status::Pending) => "Pending",
            ViewFilter::Only(Status::Completed) => "Completed",
        }
    }
}

pub struct TodoCli<'a, R: BufRead, W: Write> {
    repository: &'a mut TaskRepository,
    input: R,
    output: W,
    show_banner: bool,
}

impl<'a, R: BufRead, W: Write> TodoCli<'a, R, W> {
    pub fn new(repository: &'a mut TaskRepository, input: R, output: W) -> Self {
        Self {
            repository,
            input,
            output,
            show_banner: true,
        }
    }

    pub fn with_banner(mut self, show_banner: bool) -> Self {
        self.show_banner = show_banner;
        self
    }

    /// Runs the main menu until the user exits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        if self.show_banner {
            writeln!(self.output, "🎯 Welcome to Todo App!")?;
            writeln!(
                self.output,
                "Manage your tasks efficiently from the command line.\n"
            )?;
        }

        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-6): ")? else {
                break;
            };

            let step = match MenuChoice::parse(&choice) {
                Some(choice) => self.handle_choice(choice)?,
                None => {
                    writeln!(
                        self.output,
                        "❌ Invalid choice. Please enter a number between 1 and 6."
                    )?;
                    ControlFlow::Continue(())
                }
            };
            if step.is_break() {
                break;
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "\n👋 Thanks for using Todo App! Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_menu(&mut self) -> anyhow::Result<()> {
        let rule = "=".repeat(MENU_RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "📋 TODO APP MENU")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "1. ➕ Add Task")?;
        writeln!(self.output, "2. 🗑️  Delete Task")?;
        writeln!(self.output, "3. ✏️  Update Task")?;
        writeln!(self.output, "4. 👀 View Tasks")?;
        writeln!(self.output, "5. ✅ Mark Task Complete")?;
        writeln!(self.output, "6. 🚪 Exit")?;
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    fn handle_choice(&mut self, choice: MenuChoice) -> Step {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::Add => self.handle_add_task(),
            MenuChoice::Delete => self.handle_delete_task(),
            MenuChoice::Update => self.handle_update_task(),
            MenuChoice::View => self.handle_view_tasks(),
            MenuChoice::Complete => self.handle_mark_complete(),
            MenuChoice::Exit => Ok(ControlFlow::Break(())),
        }
    }

    fn handle_add_task(&mut self) -> Step {
        self.section("➕ ADD NEW TASK", 20)?;

        let title = loop {
            let Some(title) = self.prompt("Enter task title (required): ")? else {
                return Ok(ControlFlow::Break(()));
            };
            if !title.is_empty() {
                break title;
            }
            writeln!(self.output, "❌ Title cannot be empty. Please try again.")?;
        };

        let Some(description) = self.prompt("Enter task description (optional): ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.repository.add_task(&title, &description) {
            Ok(task) => {
                let id = task.id();
                writeln!(self.output, "✅ Task added successfully! (ID: {id})")?;
            }
            Err(e) => writeln!(self.output, "❌ Error adding task: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn handle_delete_task(&mut self) -> Step {
        self.section("🗑️  DELETE TASK", 15)?;

        let id = match self.read_task_id("delete")? {
            TaskIdInput::Id(id) => id,
            TaskIdInput::Skipped => return Ok(ControlFlow::Continue(())),
            TaskIdInput::EndOfInput => return Ok(ControlFlow::Break(())),
        };

        let Some(confirm) =
            self.prompt(&format!("Are you sure you want to delete task {id}? (y/N): "))?
        else {
            return Ok(ControlFlow::Break(()));
        };
        if !matches!(confirm.to_lowercase().as_str(), "y" | "yes") {
            writeln!(self.output, "❌ Deletion cancelled.")?;
            return Ok(ControlFlow::Continue(()));
        }

        if self.repository.delete_task(id) {
            writeln!(self.output, "✅ Task {id} deleted successfully!")?;
        } else {
            writeln!(self.output, "❌ Task {id} not found.")?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn handle_update_task(&mut self) -> Step {
        self.section("✏️  UPDATE TASK", 15)?;

        let id = match self.read_task_id("update")? {
            TaskIdInput::Id(id) => id,
            TaskIdInput::Skipped => return Ok(ControlFlow::Continue(())),
            TaskIdInput::EndOfInput => return Ok(ControlFlow::Break(())),
        };

        let Some(task) = self.repository.get_task(id) else {
            writeln!(self.output, "❌ Task {id} not found.")?;
            return Ok(ControlFlow::Continue(()));
        };
        writeln!(self.output, "Current task: {}", task.title())?;
        if !task.description().is_empty() {
            writeln!(self.output, "Current description: {}", task.description())?;
        }

        let Some(title) = self.prompt("Enter new title (leave empty to keep current): ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(description) =
            self.prompt("Enter new description (leave empty to keep current): ")?
        else {
            return Ok(ControlFlow::Break(()));
        };

        let title = Some(title.as_str()).filter(|t| !t.is_empty());
        let description = Some(description.as_str()).filter(|d| !d.is_empty());
        match self.repository.update_task(id, title, description) {
            Ok(true) => writeln!(self.output, "✅ Task {id} updated successfully!")?,
            Ok(false) => writeln!(self.output, "❌ Task {id} not found.")?,
            Err(e) => writeln!(self.output, "❌ Error updating task: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn handle_view_tasks(&mut self) -> Step {
        self.section("👀 VIEW TASKS", 12)?;

        let filter = loop {
            writeln!(self.output, "\nFilter options:")?;
            writeln!(self.output, "1. All tasks")?;
            writeln!(self.output, "2. Pending tasks")?;
            writeln!(self.output, "3. Completed tasks")?;
            writeln!(self.output, "4. Back to main menu")?;

            let Some(choice) = self.prompt("Choose filter (1-4): ")? else {
                return Ok(ControlFlow::Break(()));
            };
            match choice.as_str() {
                "1" => break ViewFilter::All,
                "2" => break ViewFilter::Only(Status::Pending),
                "3" => break ViewFilter::Only(Status::Completed),
                "4" => return Ok(ControlFlow::Continue(())),
                _ => writeln!(self.output, "❌ Invalid choice. Please enter 1-4.")?,
            }
        };

        let tasks = match filter {
            ViewFilter::All => self.repository.get_all_tasks(),
            ViewFilter::Only(status) => self.repository.get_tasks_by_status(status),
        };
        display_tasks(&mut self.output, &tasks, filter.label())?;
        Ok(ControlFlow::Continue(()))
    }

    fn handle_mark_complete(&mut self) -> Step {
        self.section("✅ MARK TASK COMPLETE", 20)?;

        let id = match self.read_task_id("mark complete")? {
            TaskIdInput::Id(id) => id,
            TaskIdInput::Skipped => return Ok(ControlFlow::Continue(())),
            TaskIdInput::EndOfInput => return Ok(ControlFlow::Break(())),
        };

        if self.repository.mark_complete(id) {
            writeln!(self.output, "✅ Task {id} marked as complete!")?;
        } else if self.repository.get_task(id).is_some() {
            writeln!(self.output, "❌ Task {id} is already completed.")?;
        } else {
            writeln!(self.output, "❌ Task {id} not found.")?;
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Prompts until the user enters a positive id or `cancel`.
    ///
    /// Ids beyond `u32::MAX` are reported as not found here, without asking the repository.
    fn read_task_id(&mut self, operation: &str) -> anyhow::Result<TaskIdInput> {
        loop {
            let Some(input) =
                self.prompt(&format!("Enter task ID to {operation} (or 'cancel'): "))?
            else {
                return Ok(TaskIdInput::EndOfInput);
            };

            if input.eq_ignore_ascii_case("cancel") {
                writeln!(self.output, "❌ Operation cancelled.")?;
                return Ok(TaskIdInput::Skipped);
            }

            match input.parse::<i64>() {
                Ok(id) if id > 0 => match u32::try_from(id) {
                    Ok(id) => return Ok(TaskIdInput::Id(id)),
                    // no task can carry an id past u32::MAX
                    Err(_) => {
                        writeln!(self.output, "❌ Task {id} not found.")?;
                        return Ok(TaskIdInput::Skipped);
                    }
                },
                Ok(_) => writeln!(self.output, "❌ Task ID must be a positive number.")?,
                Err(_) => writeln!(self.output, "❌ Invalid task ID. Please enter a number.")?,
            }
        }
    }

    fn section(&mut self, title: &str, rule_width: usize) -> anyhow::Result<()> {
        writeln!(self.output, "\n{title}")?;
        writeln!(self.output, "{}", "-".repeat(rule_width))?;
        Ok(())
    }

    /// Writes `message`, then reads one trimmed line. `None` means input has ended.
    fn prompt(&mut self, message: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

enum TaskIdInput {
    Id(u32),
    /// Cancelled, or an id no task can have; the user has already been told.
    Skipped,
    EndOfInput,
}

fn display_tasks(output: &mut impl Write, tasks: &[&Task], label: &str) -> anyhow::Result<()> {
    if tasks.is_empty() {
        writeln!(output, "\n📭 No {} tasks found.", label.to_lowercase())?;
        return Ok(());
    }

    let rule = "-".repeat(TASK_RULE_WIDTH);
    writeln!(output, "\n📋 {label} Tasks ({} total):", tasks.len())?;
    writeln!(output, "{rule}")?;
    for task in tasks {
        writeln!(output, "{}", render_task(task, &Local))?;
        writeln!(output, "{rule}")?;
    }
    Ok(())
}
