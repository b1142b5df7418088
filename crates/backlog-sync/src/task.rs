//! Canonical backlog task model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Priority of a backlog task.
///
/// The closed set matches the literal vocabulary the destination
/// platforms expect (Jira's default priority scheme in particular).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Wire label as sent to the destination platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single backlog item, immutable once constructed by the task source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier, `TASK-NNN`, unique within one run.
    pub id: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description of the work.
    pub description: String,
    /// Sprint number this task belongs to (>= 1).
    pub sprint: u32,
    /// Effort estimate in days (>= 1).
    pub estimation_days: u32,
    /// Severity label, passed through to the destination priority field.
    pub priority: Priority,
    /// Free-text acceptance criteria.
    pub acceptance_criteria: String,
    /// First day of the task's sprint window.
    pub start_date: NaiveDate,
    /// Last day of the task's sprint window (`start_date` + 14 days).
    pub end_date: NaiveDate,
    /// Ids of tasks this one depends on. Currently always empty; no
    /// ordering or validation logic consumes it.
    pub dependencies: Vec<String>,
    /// Ordered tags, forwarded verbatim to platforms that support labels.
    pub labels: Vec<String>,
}

/// Reference to the issue or work item a submission created.
///
/// Remote identifiers are best-effort: the driver only inspects the
/// success/failure outcome, never the reference itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRef {
    /// Platform-native identifier (Jira key, GitHub issue number, ...).
    pub id: Option<String>,
    /// Browsable URL, when the platform returns one.
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_wire_labels() {
        assert_eq!(Priority::High.as_str(), "High");
        assert_eq!(Priority::Medium.as_str(), "Medium");
        assert_eq!(Priority::Low.as_str(), "Low");
        assert_eq!(Priority::High.to_string(), "High");
    }
}
