use crate::error::Result;
use crate::secrets::SecretNames;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SecretsConfig / ChannelRepos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Secrets Manager entry holding the GitHub access token.
    pub github_token: String,
    /// Secrets Manager entry holding the Slack app token.
    pub slack_token: String,
}

/// Repos a Slack channel is notified about.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelRepos {
    /// Repos checked for both pending releases and open PRs.
    #[serde(default)]
    pub cloud_apps: Vec<String>,
    /// Repos checked for open PRs only.
    #[serde(default)]
    pub libraries: Vec<String>,
}

// ---------------------------------------------------------------------------
// AppConfig (top-level)
// ---------------------------------------------------------------------------

/// Shared configuration file, read both by this build (for the secret names
/// the permission grant must cover) and by the lambda at runtime (for the
/// organization and channel/repo mapping). Replaces the old arrangement of
/// regex-scraping constants out of the lambda's Python source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub github_organization: String,
    pub secrets: SecretsConfig,
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelRepos>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: AppConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn secret_names(&self) -> SecretNames {
        SecretNames {
            github_token: self.secrets.github_token.clone(),
            slack_token: self.secrets.slack_token.clone(),
        }
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (field, value) in [
            ("secrets.github_token", &self.secrets.github_token),
            ("secrets.slack_token", &self.secrets.slack_token),
        ] {
            if value.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{field} is empty"),
                });
            }
        }

        if self.github_organization.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "github_organization is empty".to_string(),
            });
        }

        if self.channels.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no channels configured; the lambda will have nothing to report"
                    .to_string(),
            });
        }
        for (channel, repos) in &self.channels {
            if repos.cloud_apps.is_empty() && repos.libraries.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("channel '{channel}' has no repos"),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
