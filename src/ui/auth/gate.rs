//! [`AuthGate`] realized as the terminal sign-in dialog.

use std::sync::mpsc::Sender;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::gate::{AuthGate, AuthOutcome};
use crate::ui::events::AppEvent;

/// Asks the UI thread to show the sign-in dialog and waits for its outcome.
///
/// The UI holds the responder while the dialog is open; dropping it (quit,
/// teardown) reads as `Abandoned`.
pub struct ModalAuthGate {
    events: Sender<AppEvent>,
}

impl ModalAuthGate {
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl AuthGate for ModalAuthGate {
    async fn open(&self) -> AuthOutcome {
        let (respond_to, receiver) = oneshot::channel();
        if self
            .events
            .send(AppEvent::AuthRequested { respond_to })
            .is_err()
        {
            tracing::trace!("Sign-in request dropped (UI gone)");
            return AuthOutcome::Abandoned;
        }

        receiver.await.unwrap_or(AuthOutcome::Abandoned)
    }
}
