//! Platform adapter implementations.
//!
//! Each adapter owns the mapping from the canonical [`Task`] to one
//! destination's wire schema and performs exactly one remote call (or
//! one local file write) per submission. Adapters are selected once at
//! startup through [`for_platform`]; the driver never branches on the
//! platform per task.

pub mod azure;
pub mod csv;
pub mod github;
pub mod jira;

use std::path::Path;

use async_trait::async_trait;
use clap::ValueEnum;

use crate::config::SyncConfig;
use crate::error::AdapterError;
use crate::task::{IssueRef, Task};

pub use azure::AzureAdapter;
pub use csv::CsvAdapter;
pub use github::GithubAdapter;
pub use jira::JiraAdapter;

/// Destination platform selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Jira,
    Github,
    Azure,
    Csv,
}

/// Trait for issue-creation adapters (Jira, GitHub, Azure DevOps, CSV).
#[async_trait]
pub trait IssueAdapter: Send + Sync {
    /// Human-readable adapter name, used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Create one issue/work item/row for `task`.
    ///
    /// Exactly one remote call per invocation, no retries. Any fault is
    /// converted into an [`AdapterError`]; nothing panics across this
    /// boundary.
    async fn submit(&self, task: &Task) -> Result<IssueRef, AdapterError>;
}

/// Build the adapter for `platform`.
///
/// Network adapters are constructed even when their credentials are
/// absent; they fail at the first submission with a clear
/// `NotConfigured` message. Only the CSV adapter can fail here, when the
/// output file cannot be created.
pub fn for_platform(
    platform: Platform,
    config: &SyncConfig,
    csv_path: &Path,
) -> Result<Box<dyn IssueAdapter>, AdapterError> {
    let adapter: Box<dyn IssueAdapter> = match platform {
        Platform::Jira => Box::new(JiraAdapter::new(config.jira.clone())),
        Platform::Github => Box::new(GithubAdapter::new(config.github.clone())),
        Platform::Azure => Box::new(AzureAdapter::new(config.azure.clone())),
        Platform::Csv => Box::new(CsvAdapter::create(csv_path)?),
    };
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_by_platform() {
        let config = SyncConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("out.csv");

        let jira = for_platform(Platform::Jira, &config, &csv_path).unwrap();
        assert_eq!(jira.name(), "jira");
        let github = for_platform(Platform::Github, &config, &csv_path).unwrap();
        assert_eq!(github.name(), "github");
        let azure = for_platform(Platform::Azure, &config, &csv_path).unwrap();
        assert_eq!(azure.name(), "azure");
        let csv = for_platform(Platform::Csv, &config, &csv_path).unwrap();
        assert_eq!(csv.name(), "csv");
    }

    #[test]
    fn test_csv_factory_fails_for_unwritable_path() {
        let config = SyncConfig::default();
        let result = for_platform(
            Platform::Csv,
            &config,
            Path::new("/nonexistent-dir/out.csv"),
        );
        assert!(matches!(result, Err(AdapterError::Io(_))));
    }
}
