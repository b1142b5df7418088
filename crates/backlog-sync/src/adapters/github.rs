//! GitHub Issues adapter.
//!
//! Creates one issue per task through the REST API. Description,
//! acceptance criteria, sprint and estimate are concatenated into a
//! single Markdown body; labels pass through verbatim.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::GithubConfig;
use crate::error::AdapterError;
use crate::task::{IssueRef, Task};

use super::IssueAdapter;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The GitHub API rejects requests without a User-Agent header.
const CLIENT_USER_AGENT: &str = "backlog-sync";

/// Create-issue request body.
#[derive(Debug, Serialize)]
struct IssueRequest<'a> {
    title: &'a str,
    body: String,
    labels: &'a [String],
}

/// GitHub issue-creation adapter.
pub struct GithubAdapter {
    config: Option<GithubConfig>,
    api_base: String,
    client: Client,
}

impl GithubAdapter {
    /// Create an adapter against the public GitHub API.
    #[must_use]
    pub fn new(config: Option<GithubConfig>) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE.to_string())
    }

    /// Create an adapter against a specific API base URL (GitHub
    /// Enterprise, or a mock server in tests).
    #[must_use]
    pub fn with_api_base(config: Option<GithubConfig>, api_base: String) -> Self {
        Self {
            config,
            api_base,
            client: Client::new(),
        }
    }

    /// Render the Markdown issue body for `task`.
    fn build_body(task: &Task) -> String {
        format!(
            "{}\n\n**Acceptance criteria:**\n{}\n\n**Sprint:** {}\n**Estimate:** {} days",
            task.description, task.acceptance_criteria, task.sprint, task.estimation_days
        )
    }
}

#[async_trait]
impl IssueAdapter for GithubAdapter {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn submit(&self, task: &Task) -> Result<IssueRef, AdapterError> {
        // An empty token or repo must fail here, not as a live
        // unauthenticated request against the API.
        let config = self
            .config
            .as_ref()
            .filter(|c| !c.token.is_empty() && !c.repo.is_empty())
            .ok_or_else(|| {
                AdapterError::NotConfigured("github: missing token/repo in config".to_string())
            })?;

        let request = IssueRequest {
            title: &task.title,
            body: Self::build_body(task),
            labels: &task.labels,
        };
        debug!(task = %task.id, repo = %config.repo, "Creating GitHub issue");

        let response = self
            .client
            .post(format!("{}/repos/{}/issues", self.api_base, config.repo))
            .bearer_auth(&config.token)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 201 {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: Value = response.json().await.unwrap_or(Value::Null);
        let id = created
            .get("number")
            .and_then(Value::as_u64)
            .map(|n| n.to_string());
        let url = created
            .get("html_url")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Ok(IssueRef { id, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::produce_tasks;

    #[test]
    fn test_body_contains_all_sections() {
        let task = produce_tasks().remove(0);
        let body = GithubAdapter::build_body(&task);

        assert!(body.starts_with(&task.description));
        assert!(body.contains("**Acceptance criteria:**"));
        assert!(body.contains(&task.acceptance_criteria));
        assert!(body.contains("**Sprint:** 1"));
        assert!(body.contains("**Estimate:** 1 days"));
    }

    #[tokio::test]
    async fn test_submit_without_config_is_not_configured() {
        let adapter = GithubAdapter::new(None);
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_submit_with_empty_credentials_is_not_configured() {
        let adapter = GithubAdapter::new(Some(crate::config::GithubConfig {
            token: String::new(),
            repo: String::new(),
            project_id: String::new(),
        }));
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }
}
