use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use super::{IdentityService, Session};

/// One-shot check for an existing session at startup.
///
/// Never fails: transport errors, protocol errors and timeouts all read as
/// "no session" and are only logged.
#[derive(Clone)]
pub struct SessionProbe {
    service: Arc<dyn IdentityService>,
    timeout: Duration,
}

impl SessionProbe {
    pub fn new(service: Arc<dyn IdentityService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub async fn probe(&self) -> Option<Session> {
        match timeout(self.timeout, self.service.current_session()).await {
            Ok(Ok(Some(session))) => {
                tracing::info!(user_id = %session.id, "Restored existing session");
                Some(session)
            }
            Ok(Ok(None)) => {
                tracing::debug!("No existing session");
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "Session check failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Session check timed out"
                );
                None
            }
        }
    }
}
