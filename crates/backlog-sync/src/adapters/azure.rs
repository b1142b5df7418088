//! Azure DevOps adapter.
//!
//! Creates one Task work item per task through the work-item tracking
//! API, using a JSON-Patch body (`application/json-patch+json`). Auth is
//! basic with an empty user and the personal access token as password,
//! which encodes to the same `:pat` form the API documents.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::AzureConfig;
use crate::error::AdapterError;
use crate::task::{IssueRef, Task};

use super::IssueAdapter;

const DEFAULT_API_BASE: &str = "https://dev.azure.com";

const API_VERSION: &str = "7.0";

/// Azure DevOps work-item adapter.
pub struct AzureAdapter {
    config: Option<AzureConfig>,
    api_base: String,
    client: Client,
}

impl AzureAdapter {
    /// Create an adapter against the public Azure DevOps service.
    #[must_use]
    pub fn new(config: Option<AzureConfig>) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE.to_string())
    }

    /// Create an adapter against a specific base URL (on-premises
    /// server, or a mock server in tests).
    #[must_use]
    pub fn with_api_base(config: Option<AzureConfig>, api_base: String) -> Self {
        Self {
            config,
            api_base,
            client: Client::new(),
        }
    }

    /// Build the JSON-Patch operation list for `task`.
    fn build_patch(task: &Task) -> Value {
        json!([
            {
                "op": "add",
                "path": "/fields/System.Title",
                "value": task.title,
            },
            {
                "op": "add",
                "path": "/fields/System.Description",
                "value": format!(
                    "{}<br><br><b>Acceptance criteria:</b><br>{}",
                    task.description, task.acceptance_criteria
                ),
            },
            {
                "op": "add",
                "path": "/fields/Microsoft.VSTS.Scheduling.StoryPoints",
                "value": task.estimation_days,
            },
            {
                "op": "add",
                "path": "/fields/System.Tags",
                "value": task.labels.join("; "),
            },
        ])
    }
}

#[async_trait]
impl IssueAdapter for AzureAdapter {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn submit(&self, task: &Task) -> Result<IssueRef, AdapterError> {
        // Blank fields must fail here, not as a live unauthenticated
        // request against the service.
        let config = self
            .config
            .as_ref()
            .filter(|c| {
                !c.organization.is_empty()
                    && !c.project.is_empty()
                    && !c.personal_access_token.is_empty()
            })
            .ok_or_else(|| {
                AdapterError::NotConfigured(
                    "azure: missing organization/project/personal_access_token in config"
                        .to_string(),
                )
            })?;

        let patch = Self::build_patch(task);
        let body = serde_json::to_vec(&patch)?;
        debug!(task = %task.id, project = %config.project, "Creating Azure DevOps work item");

        let url = format!(
            "{}/{}/{}/_apis/wit/workitems/$Task?api-version={API_VERSION}",
            self.api_base, config.organization, config.project
        );
        let response = self
            .client
            .post(url)
            .basic_auth("", Some(&config.personal_access_token))
            .header("Content-Type", "application/json-patch+json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: Value = response.json().await.unwrap_or(Value::Null);
        let id = created
            .get("id")
            .and_then(Value::as_u64)
            .map(|n| n.to_string());
        let url = created
            .get("url")
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
    fn test_patch_operations() {
        let task = produce_tasks().remove(0);
        let patch = AzureAdapter::build_patch(&task);
        let ops = patch.as_array().unwrap();

        assert_eq!(ops.len(), 4);
        assert!(ops.iter().all(|op| op["op"] == "add"));
        assert_eq!(ops[0]["path"], "/fields/System.Title");
        assert_eq!(ops[0]["value"], task.title);
        assert_eq!(ops[1]["path"], "/fields/System.Description");
        assert_eq!(
            ops[2]["path"],
            "/fields/Microsoft.VSTS.Scheduling.StoryPoints"
        );
        assert_eq!(ops[2]["value"], task.estimation_days);
        assert_eq!(ops[3]["path"], "/fields/System.Tags");
    }

    #[test]
    fn test_description_joins_criteria_with_html() {
        let task = produce_tasks().remove(0);
        let patch = AzureAdapter::build_patch(&task);
        let description = patch[1]["value"].as_str().unwrap();

        assert!(description.starts_with(&task.description));
        assert!(description.contains("<br><br><b>Acceptance criteria:</b><br>"));
        assert!(description.ends_with(&task.acceptance_criteria));
    }

    #[test]
    fn test_tags_joined_with_semicolons() {
        let task = produce_tasks().remove(0);
        let patch = AzureAdapter::build_patch(&task);
        assert_eq!(patch[3]["value"], "setup; git; infrastructure");
    }

    #[tokio::test]
    async fn test_submit_without_config_is_not_configured() {
        let adapter = AzureAdapter::new(None);
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_submit_with_empty_credentials_is_not_configured() {
        let adapter = AzureAdapter::new(Some(AzureConfig {
            organization: String::new(),
            project: String::new(),
            personal_access_token: String::new(),
        }));
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }
}
