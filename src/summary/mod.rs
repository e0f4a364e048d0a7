//! Dashboard summary
//!
//! Aggregates a task snapshot into per-column counts, the urgent count and
//! the nearest deadline. Everything here is a pure function of its inputs.

pub mod greeting;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::storage::session::CurrentUser;
use crate::storage::tasks::{BoardColumn, Priority, Task};

/// Per-column task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnCounts {
    pub todo: usize,
    pub progress: usize,
    pub awaiting: usize,
    pub done: usize,
    /// Every task on the board, recognized column or not
    pub onboard: usize,
}

/// Count tasks per board column. Unrecognized columns only count towards `onboard`.
pub fn count_task_columns(tasks: &[Task]) -> ColumnCounts {
    let mut counts = ColumnCounts::default();
    for task in tasks {
        counts.onboard += 1;
        match task.content.column() {
            Some(BoardColumn::Todo) => counts.todo += 1,
            Some(BoardColumn::Progress) => counts.progress += 1,
            Some(BoardColumn::Await) => counts.awaiting += 1,
            Some(BoardColumn::Done) => counts.done += 1,
            None => {}
        }
    }
    counts
}

pub fn count_urgent_tasks(tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| t.content.priority() == Some(Priority::Urgent))
        .count()
}

/// Parse a task date: RFC 3339, or a bare `YYYY-MM-DD` (midnight UTC), or a
/// zone-less `YYYY-MM-DDTHH:MM[:SS]`.
///
/// Zone-less date-times are read as UTC, not local time as a browser's
/// `Date` parser would; on a machine east or west of UTC such a deadline
/// can land on a different calendar day than the browser showed.
pub fn parse_task_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Earliest task date; the first of several equal minimums wins.
///
/// Tasks whose date does not parse are skipped, so a list without any
/// parseable date yields `None` just like an empty one.
pub fn earliest_deadline(tasks: &[Task]) -> Option<DateTime<Utc>> {
    tasks
        .iter()
        .filter_map(|t| parse_task_date(&t.content.date))
        .fold(None, |earliest, date| match earliest {
            Some(current) if current <= date => Some(current),
            _ => Some(date),
        })
}

/// US long date ("May 1, 2024"), or "No tasks" when there is no deadline.
pub fn format_deadline(deadline: Option<DateTime<Utc>>) -> String {
    match deadline {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => "No tasks".to_string(),
    }
}

/// Everything the summary page shows
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub greeting: &'static str,
    pub display_name: String,
    pub counts: ColumnCounts,
    pub urgent: usize,
    pub earliest_deadline: Option<DateTime<Utc>>,
}

impl Summary {
    pub fn build(session: Option<&CurrentUser>, tasks: &[Task], hour: u32) -> Self {
        Self {
            greeting: greeting::greeting_for_hour(hour),
            display_name: greeting::display_name(session),
            counts: count_task_columns(tasks),
            urgent: count_urgent_tasks(tasks),
            earliest_deadline: earliest_deadline(tasks),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deadline = format_deadline(self.earliest_deadline);
        let rows: [(&str, &dyn fmt::Display); 7] = [
            ("To-do", &self.counts.todo),
            ("Done", &self.counts.done),
            ("Urgent", &self.urgent),
            ("Upcoming deadline", &deadline),
            ("Tasks in board", &self.counts.onboard),
            ("Tasks in progress", &self.counts.progress),
            ("Awaiting feedback", &self.counts.awaiting),
        ];

        write!(f, "{} {}", self.greeting, self.display_name)?;
        for (label, value) in rows {
            write!(f, "\n  {:<18} {}", label, value)?;
        }
        Ok(())
    }
}
