use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("AWS_ACCOUNT environment variable not set; cannot determine deployment target")]
    MissingAccount,

    #[error("secret name for {0} is empty; a grant scoped to an empty name matches nothing")]
    EmptySecretName(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
