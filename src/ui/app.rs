use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::gate::{
    AuthOutcome, GateState, IgnoreReason, SignInOutcome, SubmissionDispatcher, SubmitOutcome,
};
use crate::identity::{IdentityService, Session};
use crate::pipeline::Handoff;
use crate::ui::auth::{AuthDialogState, AuthIntent, AuthReducer};
use crate::ui::events::AppEvent;
use crate::ui::mvi::Reducer;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// View-side state of the entry screen.
///
/// Gate state, session and draft live in the dispatcher; the app keeps what
/// only the terminal needs: the dialog, the pending gate responder and the
/// status line. Async work runs on the tokio runtime and reports back through
/// [`AppEvent`]s.
pub struct App {
    should_quit: bool,
    dispatcher: Arc<SubmissionDispatcher>,
    identity: Arc<dyn IdentityService>,
    runtime: Handle,
    events: Sender<AppEvent>,
    verify_timeout: Duration,
    /// State of the sign-in dialog (MVI pattern).
    auth_dialog: AuthDialogState,
    /// Responder of the gate that opened the dialog.
    pending_gate: Option<oneshot::Sender<AuthOutcome>>,
    /// Bumped per verification request and on dismissal; answers carrying an
    /// older value are stale.
    verification: u64,
    status: Option<StatusMessage>,
    handoff: Option<Handoff>,
    spinner_tick: usize,
    /// Shift+Enter reaches us as a distinct key.
    keyboard_enhanced: bool,
}

impl App {
    pub fn new(
        dispatcher: Arc<SubmissionDispatcher>,
        identity: Arc<dyn IdentityService>,
        runtime: Handle,
        events: Sender<AppEvent>,
        verify_timeout: Duration,
    ) -> Self {
        Self {
            should_quit: false,
            dispatcher,
            identity,
            runtime,
            events,
            verify_timeout,
            auth_dialog: AuthDialogState::default(),
            pending_gate: None,
            verification: 0,
            status: None,
            handoff: None,
            spinner_tick: 0,
            keyboard_enhanced: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dispatcher(&self) -> &SubmissionDispatcher {
        &self.dispatcher
    }

    pub fn auth_dialog(&self) -> &AuthDialogState {
        &self.auth_dialog
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn spinner_tick(&self) -> usize {
        self.spinner_tick
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn set_keyboard_enhanced(&mut self, enabled: bool) {
        self.keyboard_enhanced = enabled;
    }

    /// Handoff of the accepted dispatch, if the view ended because of one.
    pub fn take_handoff(&mut self) -> Option<Handoff> {
        self.handoff.take()
    }

    /// Kicks off the one-time session probe.
    pub fn start(&self) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            dispatcher.initialize().await;
            let _ = events.send(AppEvent::SessionProbed);
        });
    }

    pub fn on_tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
        dispatch_mvi!(self, auth_dialog, AuthReducer, AuthIntent::AnimationTick);
    }

    pub fn on_session_probed(&mut self) {
        if let Some(session) = self.dispatcher.session() {
            self.set_status(StatusKind::Info, format!("Signed in as {}", session.email));
        }
    }

    /// Enter in the editor.
    pub fn request_submit(&mut self) {
        if self.dispatcher.state() != GateState::Ready || !self.dispatcher.can_submit() {
            return;
        }
        self.status = None;
        let dispatcher = Arc::clone(&self.dispatcher);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = dispatcher.attempt_submit().await;
            let _ = events.send(AppEvent::SubmitFinished(outcome));
        });
    }

    pub fn request_sign_in(&mut self) {
        if self.dispatcher.session().is_some() {
            self.set_status(StatusKind::Info, "Already signed in");
            return;
        }
        let dispatcher = Arc::clone(&self.dispatcher);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = dispatcher.sign_in().await;
            let _ = events.send(AppEvent::SignInFinished(outcome));
        });
    }

    pub fn request_logout(&mut self) {
        if self.dispatcher.session().is_none() || self.dispatcher.state().is_busy() {
            return;
        }
        let dispatcher = Arc::clone(&self.dispatcher);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            dispatcher.logout().await;
            let _ = events.send(AppEvent::SignedOut);
        });
    }

    /// The gate asked for credentials.
    pub fn on_auth_requested(&mut self, respond_to: oneshot::Sender<AuthOutcome>) {
        if self.pending_gate.is_some() {
            // The dispatcher never opens two gates at once; refuse a stray one.
            let _ = respond_to.send(AuthOutcome::Abandoned);
            return;
        }
        self.pending_gate = Some(respond_to);
        dispatch_mvi!(self, auth_dialog, AuthReducer, AuthIntent::Open);
    }

    /// Routes a dialog intent; `Submit` also starts verification.
    pub fn dispatch_auth(&mut self, intent: AuthIntent) {
        let submitting = matches!(intent, AuthIntent::Submit);
        dispatch_mvi!(self, auth_dialog, AuthReducer, intent);
        if submitting && self.auth_dialog.is_verifying() {
            self.start_verification();
        }
    }

    pub fn dismiss_auth(&mut self) {
        self.verification = self.verification.wrapping_add(1);
        dispatch_mvi!(self, auth_dialog, AuthReducer, AuthIntent::Dismiss);
        self.resolve_gate(AuthOutcome::Abandoned);
    }

    fn start_verification(&mut self) {
        let Some(form) = self.auth_dialog.form() else {
            return;
        };
        let credentials = form.credentials();
        self.verification = self.verification.wrapping_add(1);
        let generation = self.verification;
        let identity = Arc::clone(&self.identity);
        let events = self.events.clone();
        let limit = self.verify_timeout;
        self.runtime.spawn(async move {
            let result = match timeout(limit, identity.verify_credentials(&credentials)).await {
                Ok(Ok(session)) => Ok(session),
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "Credential verification failed");
                    Err(err.user_message())
                }
                Err(_) => {
                    tracing::warn!(timeout_secs = limit.as_secs(), "Credential verification timed out");
                    Err("Sign-in timed out. Please try again.".to_string())
                }
            };
            let _ = events.send(AppEvent::CredentialsVerified { generation, result });
        });
    }

    pub fn on_credentials_verified(&mut self, generation: u64, result: Result<Session, String>) {
        // Answer to a dialog that was dismissed or superseded meanwhile.
        if generation != self.verification || !self.auth_dialog.is_verifying() {
            tracing::debug!(
                generation,
                current = self.verification,
                "Stale verification result dropped"
            );
            return;
        }
        match result {
            Ok(session) => {
                dispatch_mvi!(self, auth_dialog, AuthReducer, AuthIntent::Verified);
                self.resolve_gate(AuthOutcome::Resolved(session));
            }
            Err(message) => {
                dispatch_mvi!(
                    self,
                    auth_dialog,
                    AuthReducer,
                    AuthIntent::VerificationFailed { message }
                );
            }
        }
    }

    fn resolve_gate(&mut self, outcome: AuthOutcome) {
        if let Some(responder) = self.pending_gate.take() {
            let _ = responder.send(outcome);
        }
    }

    pub fn on_submit_finished(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Dispatched(handoff) => {
                self.handoff = Some(handoff);
                self.should_quit = true;
            }
            SubmitOutcome::Rejected(err) => {
                self.set_status(StatusKind::Error, err.user_message());
            }
            SubmitOutcome::Abandoned => {
                self.set_status(StatusKind::Info, "Sign in to send your prompt");
            }
            SubmitOutcome::Ignored(IgnoreReason::Busy(state)) => {
                tracing::trace!(%state, "Submit ignored");
            }
            SubmitOutcome::Ignored(IgnoreReason::EmptyDraft) => {}
        }
    }

    pub fn on_sign_in_finished(&mut self, outcome: SignInOutcome) {
        match outcome {
            SignInOutcome::SignedIn(session) => {
                self.set_status(StatusKind::Info, format!("Signed in as {}", session.email));
            }
            SignInOutcome::AlreadySignedIn => self.set_status(StatusKind::Info, "Already signed in"),
            SignInOutcome::Abandoned | SignInOutcome::Busy(_) => {}
        }
    }

    pub fn on_signed_out(&mut self) {
        self.set_status(StatusKind::Info, "Signed out");
    }

    /// Edits the draft, unless the dialog has focus.
    pub fn edit_draft(&mut self, f: impl FnOnce(&mut crate::gate::InputController)) {
        if self.auth_dialog.is_visible() {
            return;
        }
        self.dispatcher.with_input(f);
        if matches!(self.status.as_ref(), Some(s) if s.kind == StatusKind::Error) {
            self.status = None;
            self.dispatcher.dismiss_failure();
        }
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.auth_dialog.is_visible() {
            for ch in text.chars().filter(|ch| !ch.is_control()) {
                self.dispatch_auth(AuthIntent::Input(ch));
            }
            return;
        }
        self.edit_draft(|input| input.insert_str(text));
    }

    /// Unmounts the view: abandons an open dialog and idles the gate.
    pub fn shutdown(&mut self) {
        self.verification = self.verification.wrapping_add(1);
        self.resolve_gate(AuthOutcome::Abandoned);
        self.auth_dialog = AuthDialogState::Hidden;
        self.dispatcher.teardown();
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }
}
