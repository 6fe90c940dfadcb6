use crate::error::{Result, StackError};

pub const ACCOUNT_VAR: &str = "AWS_ACCOUNT";
pub const REGION_VAR: &str = "AWS_REGION";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Deployment target identity, resolved once at the start of the build and
/// passed by value to everything downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployEnv {
    pub account: String,
    pub region: String,
}

impl DeployEnv {
    /// Resolve from `AWS_ACCOUNT` / `AWS_REGION`. Missing account is fatal;
    /// missing region falls back to `us-east-1`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(ACCOUNT_VAR).ok(),
            std::env::var(REGION_VAR).ok(),
        )
    }

    pub fn from_vars(account: Option<String>, region: Option<String>) -> Result<Self> {
        let account = account
            .filter(|a| !a.is_empty())
            .ok_or(StackError::MissingAccount)?;
        let region = region
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        Ok(Self { account, region })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_account_and_region() {
        let env = DeployEnv::from_vars(
            Some("123456789012".to_string()),
            Some("eu-west-1".to_string()),
        )
        .unwrap();
        assert_eq!(env.account, "123456789012");
        assert_eq!(env.region, "eu-west-1");
    }

    #[test]
    fn missing_region_defaults() {
        let env = DeployEnv::from_vars(Some("123456789012".to_string()), None).unwrap();
        assert_eq!(env.region, "us-east-1");
    }

    #[test]
    fn empty_region_defaults() {
        let env =
            DeployEnv::from_vars(Some("123456789012".to_string()), Some(String::new())).unwrap();
        assert_eq!(env.region, "us-east-1");
    }

    #[test]
    fn missing_account_is_fatal() {
        let err = DeployEnv::from_vars(None, Some("us-east-1".to_string())).unwrap_err();
        assert!(matches!(err, StackError::MissingAccount));
    }

    #[test]
    fn empty_account_is_fatal() {
        let err = DeployEnv::from_vars(Some(String::new()), None).unwrap_err();
        assert!(matches!(err, StackError::MissingAccount));
    }
}
