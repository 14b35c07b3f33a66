// src/error.rs
use thiserror::Error;

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned {status}{}: {message}", .reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    Status {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(status: u16, reason: Option<&str>, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            reason: reason.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        ApiError::Auth(msg.into())
    }
}

/// Terminal failure of a stack run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("invalid stack input: {0}")]
    InvalidInput(String),

    #[error("failed to setup gcp provider: {0}")]
    ProviderSetup(String),

    #[error("failed to add zone for {domain} domain")]
    ZoneCreation {
        domain: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to create dns-admin iam-binding resource on gcp-project {project}")]
    AccessBinding {
        project: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to add dns record #{index} ({record_type} {name})")]
    RecordCreation {
        index: usize,
        name: String,
        record_type: String,
        #[source]
        source: ApiError,
    },
}

impl StackError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        StackError::InvalidInput(msg.into())
    }

    pub fn provider_setup(msg: impl Into<String>) -> Self {
        StackError::ProviderSetup(msg.into())
    }

    /// Input position of the rejected record, if this is a record failure.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            StackError::RecordCreation { index, .. } => Some(*index),
            _ => None,
        }
    }
}
