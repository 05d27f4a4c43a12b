use async_trait::async_trait;

use crate::identity::Session;

/// How a credential-collection interaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials verified; the new session.
    Resolved(Session),
    /// Dismissed by the user. Credential failures inside the interaction
    /// are handled there and never surface as anything but this.
    Abandoned,
}

/// Modal credential collection.
///
/// The dispatcher guarantees at most one `open()` is outstanding.
#[async_trait]
pub trait AuthGate: Send + Sync {
    async fn open(&self) -> AuthOutcome;
}
