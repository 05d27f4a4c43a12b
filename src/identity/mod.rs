//! Identity service access.
//!
//! The identity provider is external. This module defines the contract the
//! entry screen relies on ([`IdentityService`]), an HTTP implementation of it,
//! and the startup [`SessionProbe`].

mod credentials;
mod http;
mod probe;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use credentials::{AuthMode, Credentials, SecureString};
pub use http::HttpIdentityService;
pub use probe::SessionProbe;

/// Authenticated identity held client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque, unique user id.
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Session {
    /// First word of the display name, for the greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.email)
    }

    /// Up to two uppercase initials, for the header badge.
    pub fn initials(&self) -> String {
        let source = if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        };
        let words: Vec<&str> = source.split_whitespace().collect();
        let initials: String = match words.as_slice() {
            [] => String::new(),
            [single] => single.chars().take(2).collect(),
            [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
        };
        initials.to_uppercase()
    }
}

/// Errors reported by an [`IdentityService`].
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The request never produced a response.
    #[error("Identity service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("Identity service returned status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("Malformed identity response: {0}")]
    Protocol(String),

    /// The service refused the credentials.
    #[error("{0}")]
    Rejected(String),

    /// The call exceeded its time budget.
    #[error("Identity service timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl IdentityError {
    /// Short message for the sign-in dialog.
    pub fn user_message(&self) -> String {
        match self {
            IdentityError::Rejected(reason) => reason.clone(),
            IdentityError::Transport(_) | IdentityError::Timeout { .. } => {
                "Couldn't reach the sign-in service. Please try again.".to_string()
            }
            IdentityError::Status { .. } | IdentityError::Protocol(_) => {
                "Sign-in failed. Please try again.".to_string()
            }
        }
    }
}

/// Contract with the external identity provider.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns the currently established session, if any.
    ///
    /// "Not signed in" is `Ok(None)`, not an error.
    async fn current_session(&self) -> Result<Option<Session>, IdentityError>;

    /// Ends the session on the server side.
    async fn logout(&self) -> Result<(), IdentityError>;

    /// Verifies credentials (sign in or sign up) and returns the new session.
    async fn verify_credentials(&self, credentials: &Credentials)
        -> Result<Session, IdentityError>;
}
