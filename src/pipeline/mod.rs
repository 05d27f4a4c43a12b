//! Downstream application-creation pipeline.
//!
//! The pipeline is external; the entry screen only hands it a prompt and a
//! category and learns whether the handoff was accepted.

mod http;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use http::HttpCreationPipeline;

/// Accepted handoff. Opaque to the entry screen; the downstream view takes over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Handoff {
    /// Id of the application being created, when the pipeline reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub prompt: String,
    pub category: String,
    /// Raw response body, passed through untouched.
    pub response: serde_json::Value,
}

/// Why the pipeline did not accept a prompt. Always recoverable.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Creation service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Creation request rejected: {message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed creation response: {0}")]
    Protocol(String),

    #[error("Creation request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl PipelineError {
    /// Short message for the status line.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Transport(_) => "Couldn't reach the creation service".to_string(),
            PipelineError::Rejected { message, .. } => message.clone(),
            PipelineError::Protocol(_) => "The creation service sent an unexpected reply".to_string(),
            PipelineError::Timeout { seconds } => {
                format!("The creation service didn't answer within {}s", seconds)
            }
        }
    }
}

/// Contract with the external creation pipeline.
#[async_trait]
pub trait CreationPipeline: Send + Sync {
    async fn create(&self, prompt: &str, category: &str) -> Result<Handoff, PipelineError>;
}
