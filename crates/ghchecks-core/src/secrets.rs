use crate::error::{Result, StackError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Names of the two Secrets Manager entries the lambda reads at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecretNames {
    pub github_token: String,
    pub slack_token: String,
}

static GITHUB_RE: OnceLock<Regex> = OnceLock::new();
static SLACK_RE: OnceLock<Regex> = OnceLock::new();

fn github_re() -> &'static Regex {
    GITHUB_RE.get_or_init(|| {
        Regex::new(r#"^GITHUB_ACCESS_TOKEN_SECRET_NAME\s*=\s*"(.*)""#).unwrap()
    })
}

fn slack_re() -> &'static Regex {
    SLACK_RE.get_or_init(|| Regex::new(r#"^SLACK_APP_TOKEN_SECRET_NAME\s*=\s*"(.*)""#).unwrap())
}

impl SecretNames {
    /// Legacy extraction path: scrape `NAME = "value"` assignments out of the
    /// lambda's old Python config module. Kept for migration; new deployments
    /// read the shared YAML config instead.
    ///
    /// Scans every line; a later assignment overrides an earlier one. A
    /// pattern that never matches leaves that field empty rather than
    /// erroring — [`SecretNames::validate`] closes that gap before any grant
    /// is emitted.
    pub fn extract(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::extract_from_str(&data))
    }

    pub fn extract_from_str(data: &str) -> Self {
        let mut names = Self::default();
        for line in data.lines() {
            if let Some(caps) = github_re().captures(line) {
                names.github_token = caps[1].to_string();
            }
            if let Some(caps) = slack_re().captures(line) {
                names.slack_token = caps[1].to_string();
            }
        }
        names
    }

    /// Refuse to hand an empty name to the permission grant.
    pub fn validate(&self) -> Result<()> {
        if self.github_token.is_empty() {
            return Err(StackError::EmptySecretName("github_token"));
        }
        if self.slack_token.is_empty() {
            return Err(StackError::EmptySecretName("slack_token"));
        }
        Ok(())
    }
}
