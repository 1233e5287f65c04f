use crate::task::Task;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders a task as a multi-line summary with timestamps shown in `tz`.
///
/// ```text
/// ✓ [1] Buy milk
///   Description: Semi-skimmed
///   Created: 2025-01-01 09:30 (Completed: 2025-01-01 10:00)
/// ```
pub fn render_task<Tz>(task: &Task, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let glyph = if task.is_completed() { '✓' } else { '○' };
    let mut out = format!("{} [{}] {}", glyph, task.id(), task.title());
    if !task.description().is_empty() {
        out.push_str(&format!("\n  Description: {}", task.description()));
    }
    out.push_str(&format!(
        "\n  Created: {}",
        format_timestamp(task.created_at(), tz)
    ));
    if let Some(completed_at) = task.completed_at() {
        out.push_str(&format!(
            " (Completed: {})",
            format_timestamp(completed_at, tz)
        ));
    }
    out
}

fn format_timestamp<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
