//! CSV export adapter.
//!
//! The no-network fallback: the header row is written when the adapter
//! is constructed and each submission appends one row, so a run that is
//! cut short leaves a readable partial file. Fields containing commas,
//! quotes or newlines are quoted RFC-4180 style.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::error::AdapterError;
use crate::task::{IssueRef, Task};

use super::IssueAdapter;

/// Column order of the exported file.
const HEADER: &str = "ID,Title,Description,Sprint,Estimation_Days,Priority,\
                      Acceptance_Criteria,Start_Date,End_Date,Labels";

/// CSV file-export adapter.
pub struct CsvAdapter {
    writer: Mutex<BufWriter<File>>,
}

impl CsvAdapter {
    /// Create the output file at `path` and write the header row.
    pub fn create(path: &Path) -> Result<Self, AdapterError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{HEADER}")?;
        writer.flush()?;
        debug!(path = %path.display(), "CSV export opened");

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Format one task as an escaped CSV row.
    fn format_row(task: &Task) -> String {
        let columns = [
            task.id.clone(),
            task.title.clone(),
            task.description.clone(),
            task.sprint.to_string(),
            task.estimation_days.to_string(),
            task.priority.to_string(),
            task.acceptance_criteria.clone(),
            task.start_date.format("%Y-%m-%d").to_string(),
            task.end_date.format("%Y-%m-%d").to_string(),
            task.labels.join(", "),
        ];

        columns
            .iter()
            .map(|field| escape(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Quote a field when it contains separators, quotes or newlines.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[async_trait]
impl IssueAdapter for CsvAdapter {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn submit(&self, task: &Task) -> Result<IssueRef, AdapterError> {
        let row = Self::format_row(task);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{row}")?;
        writer.flush()?;

        Ok(IssueRef::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::produce_tasks;

    #[test]
    fn test_escape_quotes_only_when_needed() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_row_column_order() {
        let task = produce_tasks().remove(0);
        let row = CsvAdapter::format_row(&task);

        assert!(row.starts_with("TASK-001,"));
        assert!(row.contains(",1,1,High,"));
        assert!(row.contains("2024-09-10"));
        assert!(row.contains("2024-09-24"));
        assert!(row.ends_with("\"setup, git, infrastructure\""));
    }

    #[tokio::test]
    async fn test_submit_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backlog.csv");
        let adapter = CsvAdapter::create(&path).unwrap();

        let tasks = produce_tasks();
        adapter.submit(&tasks[0]).await.unwrap();
        adapter.submit(&tasks[1]).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("TASK-001,"));
        assert!(lines[2].starts_with("TASK-002,"));
    }
}
