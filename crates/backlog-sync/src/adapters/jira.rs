//! Jira Cloud adapter.
//!
//! Creates one issue per task through the v3 REST API. The description
//! is sent as an Atlassian Document Format body with the task
//! description and acceptance criteria as separate paragraphs; the
//! effort estimate and sprint land in the story-points and sprint
//! custom fields.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::JiraConfig;
use crate::error::AdapterError;
use crate::task::{IssueRef, Task};

use super::IssueAdapter;

/// Jira issue-creation adapter.
pub struct JiraAdapter {
    config: Option<JiraConfig>,
    client: Client,
}

impl JiraAdapter {
    /// Create an adapter; `config` may be absent, in which case every
    /// submission fails with `NotConfigured`.
    #[must_use]
    pub fn new(config: Option<JiraConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Build the create-issue payload for `task`.
    fn build_payload(config: &JiraConfig, task: &Task) -> Value {
        json!({
            "fields": {
                "project": { "key": config.project_key },
                "summary": task.title,
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {
                            "type": "paragraph",
                            "content": [
                                { "type": "text", "text": task.description }
                            ]
                        },
                        {
                            "type": "paragraph",
                            "content": [
                                {
                                    "type": "text",
                                    "text": format!("Acceptance criteria: {}", task.acceptance_criteria)
                                }
                            ]
                        }
                    ]
                },
                "issuetype": { "name": "Task" },
                "priority": { "name": task.priority.as_str() },
                "labels": task.labels,
                // Story points and sprint in the default Jira Cloud scheme.
                "customfield_10016": task.estimation_days,
                "customfield_10020": task.sprint,
            }
        })
    }
}

#[async_trait]
impl IssueAdapter for JiraAdapter {
    fn name(&self) -> &'static str {
        "jira"
    }

    async fn submit(&self, task: &Task) -> Result<IssueRef, AdapterError> {
        // An empty field is as unusable as a missing section; never let
        // blank credentials reach the wire.
        let config = self
            .config
            .as_ref()
            .filter(|c| {
                !c.base_url.is_empty()
                    && !c.email.is_empty()
                    && !c.api_token.is_empty()
                    && !c.project_key.is_empty()
            })
            .ok_or_else(|| {
                AdapterError::NotConfigured(
                    "jira: missing base_url/email/api_token in config".to_string(),
                )
            })?;

        let payload = Self::build_payload(config, task);
        debug!(task = %task.id, project = %config.project_key, "Creating Jira issue");

        let response = self
            .client
            .post(format!("{}/rest/api/3/issue", config.base_url))
            .basic_auth(&config.email, Some(&config.api_token))
            .json(&payload)
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
        let key = created
            .get("key")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let url = key
            .as_ref()
            .map(|k| format!("{}/browse/{k}", config.base_url));

        Ok(IssueRef { id: key, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::produce_tasks;

    fn test_config() -> JiraConfig {
        JiraConfig {
            base_url: "https://example.atlassian.net".to_string(),
            email: "dev@example.com".to_string(),
            api_token: "token".to_string(),
            project_key: "PROJ".to_string(),
        }
    }

    #[test]
    fn test_payload_field_mapping() {
        let task = produce_tasks().remove(0);
        let payload = JiraAdapter::build_payload(&test_config(), &task);

        let fields = &payload["fields"];
        assert_eq!(fields["project"]["key"], "PROJ");
        assert_eq!(fields["summary"], task.title);
        assert_eq!(fields["issuetype"]["name"], "Task");
        assert_eq!(fields["priority"]["name"], "High");
        assert_eq!(fields["customfield_10016"], task.estimation_days);
        assert_eq!(fields["customfield_10020"], task.sprint);
        assert_eq!(fields["labels"].as_array().unwrap().len(), task.labels.len());
    }

    #[test]
    fn test_payload_description_is_adf_with_two_paragraphs() {
        let task = produce_tasks().remove(0);
        let payload = JiraAdapter::build_payload(&test_config(), &task);

        let description = &payload["fields"]["description"];
        assert_eq!(description["type"], "doc");
        assert_eq!(description["version"], 1);

        let paragraphs = description["content"].as_array().unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0]["content"][0]["text"], task.description);
        let criteria = paragraphs[1]["content"][0]["text"].as_str().unwrap();
        assert!(criteria.starts_with("Acceptance criteria: "));
        assert!(criteria.contains(&task.acceptance_criteria));
    }

    #[tokio::test]
    async fn test_submit_without_config_is_not_configured() {
        let adapter = JiraAdapter::new(None);
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_submit_with_empty_credentials_is_not_configured() {
        let adapter = JiraAdapter::new(Some(JiraConfig {
            base_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            project_key: String::new(),
        }));
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_submit_with_blank_base_url_is_not_configured() {
        let mut config = test_config();
        config.base_url = String::new();
        let adapter = JiraAdapter::new(Some(config));
        let task = produce_tasks().remove(0);
        let err = adapter.submit(&task).await.unwrap_err();
        assert!(matches!(err, AdapterError::NotConfigured(_)));
    }
}
