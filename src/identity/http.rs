use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::{IdentityConfig, TimeoutConfig};

use super::{AuthMode, Credentials, IdentityError, IdentityService, Session};

/// Response envelope shared by the identity endpoints.
#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    user: Option<Session>,
    #[serde(default)]
    message: Option<String>,
}

/// [`IdentityService`] backed by the identity provider's HTTP API.
pub struct HttpIdentityService {
    client: Client,
    config: IdentityConfig,
}

impl HttpIdentityService {
    pub fn new(config: IdentityConfig, timeouts: &TimeoutConfig) -> Self {
        // Cookies carry the session between the introspection, login and
        // logout endpoints, the same way a browser would.
        let client = Client::builder()
            .connect_timeout(timeouts.connect())
            .cookie_store(true)
            .build()
            .expect("Failed to build identity client");

        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn current_session(&self) -> Result<Option<Session>, IdentityError> {
        let response = self
            .client
            .get(self.url(&self.config.session_path))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Session check returned no session");
            return Ok(None);
        }

        let envelope: AuthEnvelope = response
            .json()
            .await
            .map_err(|e| IdentityError::Protocol(e.to_string()))?;

        match envelope {
            AuthEnvelope {
                success: true,
                user: Some(user),
                ..
            } => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.url(&self.config.logout_path))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(IdentityError::Status {
                status: status.as_u16(),
            })
        }
    }

    async fn verify_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, IdentityError> {
        let path = match credentials.mode {
            AuthMode::SignIn => &self.config.login_path,
            AuthMode::SignUp => &self.config.register_path,
        };

        let response = self
            .client
            .post(self.url(path))
            .json(&credentials.body())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let envelope: AuthEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(rejection_for_status(status, credentials.mode));
            }
            Err(e) => return Err(IdentityError::Protocol(e.to_string())),
        };

        match envelope {
            AuthEnvelope {
                success: true,
                user: Some(user),
                ..
            } if status.is_success() => Ok(user),
            AuthEnvelope {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Err(IdentityError::Rejected(message)),
            _ if status.is_success() => Err(IdentityError::Protocol(
                "response reported success without a user".to_string(),
            )),
            _ => Err(rejection_for_status(status, credentials.mode)),
        }
    }
}

fn rejection_for_status(status: StatusCode, mode: AuthMode) -> IdentityError {
    match (status, mode) {
        (StatusCode::UNAUTHORIZED, AuthMode::SignIn) => {
            IdentityError::Rejected("Invalid email or password".to_string())
        }
        (StatusCode::CONFLICT, AuthMode::SignUp) => {
            IdentityError::Rejected("An account with this email already exists".to_string())
        }
        _ => IdentityError::Status {
            status: status.as_u16(),
        },
    }
}
