//! Sync configuration: per-platform credential bundles.
//!
//! Loaded once at startup from a JSON file and read-only afterwards. A
//! missing or malformed file is recovered locally into an empty
//! configuration so the run can proceed and surface adapter failures
//! with a clear message instead of crashing up front.
//!
//! Credential structs hold secrets; their `Debug` impls redact token
//! fields so the configuration can never leak through logs.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Placeholder shown in redacted `Debug` output.
const REDACTED: &str = "***";

/// Top-level sync configuration. Each section is optional; a platform
/// with no section fails at first submission, not at load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureConfig>,
}

/// Jira Cloud credentials and target project.
#[derive(Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Site base URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Account email for basic auth.
    pub email: String,
    /// API token paired with the email.
    pub api_token: String,
    /// Project key new issues are created under.
    pub project_key: String,
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &REDACTED)
            .field("project_key", &self.project_key)
            .finish()
    }
}

/// GitHub credentials and target repository.
#[derive(Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token sent as a bearer token.
    pub token: String,
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Projects-v2 node id. Accepted for parity with the config format;
    /// issue creation does not use it.
    #[serde(default)]
    pub project_id: String,
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &REDACTED)
            .field("repo", &self.repo)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Azure DevOps credentials and target project.
#[derive(Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Organization name under `dev.azure.com`.
    pub organization: String,
    /// Project name within the organization.
    pub project: String,
    /// Personal access token, sent as basic auth with an empty user.
    pub personal_access_token: String,
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("personal_access_token", &REDACTED)
            .finish()
    }
}

impl SyncConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file or unparseable JSON yields the empty configuration
    /// with a warning; the sync itself decides whether that is fatal.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file not readable, using empty config");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded sync configuration");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file is not valid JSON, using empty config");
                Self::default()
            }
        }
    }

    /// Template configuration with placeholder credentials for every
    /// supported platform.
    #[must_use]
    pub fn template() -> Self {
        Self {
            jira: Some(JiraConfig {
                base_url: "https://your-domain.atlassian.net".to_string(),
                email: "your-email@example.com".to_string(),
                api_token: "your-api-token".to_string(),
                project_key: "PROJECT".to_string(),
            }),
            github: Some(GithubConfig {
                token: "ghp_your-token-here".to_string(),
                repo: "owner/repository".to_string(),
                project_id: "PVT_your-project-id".to_string(),
            }),
            azure: Some(AzureConfig {
                organization: "your-organization".to_string(),
                project: "YourProject".to_string(),
                personal_access_token: "your-pat-here".to_string(),
            }),
        }
    }

    /// Write the placeholder template to `path` as pretty-printed JSON.
    pub fn write_template(path: &Path) -> std::io::Result<()> {
        let template = Self::template();
        let json = serde_json::to_string_pretty(&template)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_empty_config() {
        let config = SyncConfig::load(Path::new("/nonexistent/config.json"));
        assert!(config.jira.is_none());
        assert!(config.github.is_none());
        assert!(config.azure.is_none());
    }

    #[test]
    fn test_malformed_json_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = SyncConfig::load(&path);
        assert!(config.jira.is_none());
        assert!(config.github.is_none());
        assert!(config.azure.is_none());
    }

    #[test]
    fn test_partial_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"github": {"token": "t", "repo": "owner/repo"}}"#,
        )
        .unwrap();

        let config = SyncConfig::load(&path);
        assert!(config.jira.is_none());
        let github = config.github.expect("github section");
        assert_eq!(github.repo, "owner/repo");
        assert_eq!(github.project_id, "");
    }

    #[test]
    fn test_template_has_all_three_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        SyncConfig::write_template(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().expect("top-level object");
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("jira"));
        assert!(object.contains_key("github"));
        assert!(object.contains_key("azure"));
        assert_eq!(
            value["jira"]["base_url"],
            "https://your-domain.atlassian.net"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = SyncConfig::template();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("your-api-token"));
        assert!(!rendered.contains("ghp_your-token-here"));
        assert!(!rendered.contains("your-pat-here"));
        assert!(rendered.contains("***"));
    }
}
