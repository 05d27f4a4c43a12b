use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::TimeoutConfig;
use crate::identity::{IdentityService, Session, SessionProbe};
use crate::pipeline::{CreationPipeline, Handoff, PipelineError};

use super::auth::{AuthGate, AuthOutcome};
use super::input::{DraftIntent, InputController};
use super::state::GateState;

/// Why a submission attempt did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another probe, sign-in or dispatch is in flight (or the view is idle).
    Busy(GateState),
    /// The draft is blank.
    EmptyDraft,
}

/// Result of [`SubmissionDispatcher::attempt_submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    /// The credential dialog was dismissed; the draft is untouched.
    Abandoned,
    /// The pipeline accepted the prompt; the draft was cleared.
    Dispatched(Handoff),
    /// The pipeline declined; the draft is untouched and the failure recorded.
    Rejected(PipelineError),
}

/// Result of [`SubmissionDispatcher::sign_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Session),
    AlreadySignedIn,
    Abandoned,
    Busy(GateState),
}

struct Inner {
    state: GateState,
    session: Option<Session>,
    input: InputController,
    last_failure: Option<String>,
    initialized: bool,
    /// Completed logouts; a probe that started before one must not restore
    /// the session it cleared.
    logouts: u64,
}

impl Inner {
    fn transition(&mut self, next: GateState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "Gate transition");
            self.state = next;
        }
    }
}

/// Owns the gate state machine, the held session and the draft.
///
/// All operations take `&self`; the lock is never held across an `.await`,
/// so a call that arrives while another is parked sees the non-`Ready` state
/// and is coalesced into a no-op.
pub struct SubmissionDispatcher {
    inner: Mutex<Inner>,
    probe: SessionProbe,
    identity: Arc<dyn IdentityService>,
    gate: Arc<dyn AuthGate>,
    pipeline: Arc<dyn CreationPipeline>,
    timeouts: TimeoutConfig,
}

impl SubmissionDispatcher {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        gate: Arc<dyn AuthGate>,
        pipeline: Arc<dyn CreationPipeline>,
        input: InputController,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: GateState::Idle,
                session: None,
                input,
                last_failure: None,
                initialized: false,
                logouts: 0,
            }),
            probe: SessionProbe::new(Arc::clone(&identity), timeouts.probe()),
            identity,
            gate,
            pipeline,
            timeouts,
        }
    }

    pub fn state(&self) -> GateState {
        self.inner.lock().state
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.lock().session.clone()
    }

    pub fn draft(&self) -> DraftIntent {
        self.inner.lock().input.draft().clone()
    }

    pub fn can_submit(&self) -> bool {
        self.inner.lock().input.can_submit()
    }

    /// User-visible message of the last rejected dispatch.
    pub fn last_failure(&self) -> Option<String> {
        self.inner.lock().last_failure.clone()
    }

    pub fn dismiss_failure(&self) {
        self.inner.lock().last_failure = None;
    }

    /// Runs `f` against the input controller.
    pub fn with_input<R>(&self, f: impl FnOnce(&mut InputController) -> R) -> R {
        f(&mut self.inner.lock().input)
    }

    pub fn set_text(&self, value: impl Into<String>) {
        self.with_input(|input| input.set_text(value));
    }

    pub fn apply_suggestion(&self, value: &str) {
        self.with_input(|input| input.apply_suggestion(value));
    }

    /// Probes for an existing session, then becomes `Ready`.
    ///
    /// Runs once per dispatcher; later calls return immediately.
    pub async fn initialize(&self) {
        let logouts = {
            let mut inner = self.inner.lock();
            if inner.initialized {
                return;
            }
            inner.initialized = true;
            inner.transition(GateState::ProbingSession);
            inner.logouts
        };

        let session = self.probe.probe().await;

        let mut inner = self.inner.lock();
        if inner.state != GateState::ProbingSession {
            // Torn down while probing.
            return;
        }
        if inner.logouts == logouts {
            inner.session = session;
        } else {
            tracing::debug!("Signed out while probing, discarding probed session");
        }
        inner.transition(GateState::Ready);
    }

    /// The gated submit.
    pub async fn attempt_submit(&self) -> SubmitOutcome {
        let attempt = Uuid::new_v4();
        let (intent, signed_in) = {
            let mut inner = self.inner.lock();
            if !inner.state.is_ready() {
                tracing::debug!(%attempt, state = ?inner.state, "Submit coalesced");
                return SubmitOutcome::Ignored(IgnoreReason::Busy(inner.state));
            }
            if !inner.input.can_submit() {
                return SubmitOutcome::Ignored(IgnoreReason::EmptyDraft);
            }
            inner.last_failure = None;
            let signed_in = inner.session.is_some();
            inner.transition(if signed_in {
                GateState::Dispatching
            } else {
                GateState::AwaitingCredentials
            });
            (inner.input.draft().clone(), signed_in)
        };

        if !signed_in {
            tracing::debug!(%attempt, "No session, opening sign-in");
            if self.await_credentials(GateState::Dispatching).await.is_none() {
                return SubmitOutcome::Abandoned;
            }
        }

        self.dispatch(attempt, intent).await
    }

    /// Opens the sign-in dialog without submitting anything.
    pub async fn sign_in(&self) -> SignInOutcome {
        {
            let mut inner = self.inner.lock();
            if !inner.state.is_ready() {
                return SignInOutcome::Busy(inner.state);
            }
            if inner.session.is_some() {
                return SignInOutcome::AlreadySignedIn;
            }
            inner.transition(GateState::AwaitingCredentials);
        }

        match self.await_credentials(GateState::Ready).await {
            Some(session) => SignInOutcome::SignedIn(session),
            None => SignInOutcome::Abandoned,
        }
    }

    /// Signs out remotely, then drops the local session regardless of the result.
    pub async fn logout(&self) {
        match timeout(self.timeouts.logout(), self.identity.logout()).await {
            Ok(Ok(())) => tracing::info!("Signed out"),
            Ok(Err(err)) => tracing::warn!(error = %err, "Sign-out request failed"),
            Err(_) => tracing::warn!(
                timeout_secs = self.timeouts.logout_seconds,
                "Sign-out request timed out"
            ),
        }

        let previous = {
            let mut inner = self.inner.lock();
            inner.logouts += 1;
            inner.session.take()
        };
        if let Some(session) = previous {
            tracing::debug!(user_id = %session.id, "Local session cleared");
        }
    }

    /// Returns the gate to `Idle` when the view goes away.
    pub fn teardown(&self) {
        self.inner.lock().transition(GateState::Idle);
    }

    /// Waits on the credential dialog. On success stores the session and moves
    /// straight to `next`, so no other attempt can slip in between.
    async fn await_credentials(&self, next: GateState) -> Option<Session> {
        let outcome = self.gate.open().await;

        let mut inner = self.inner.lock();
        if inner.state != GateState::AwaitingCredentials {
            return None;
        }
        match outcome {
            AuthOutcome::Resolved(session) => {
                tracing::info!(user_id = %session.id, "Signed in");
                inner.session = Some(session.clone());
                inner.transition(next);
                Some(session)
            }
            AuthOutcome::Abandoned => {
                tracing::debug!("Sign-in abandoned");
                inner.transition(GateState::Ready);
                None
            }
        }
    }

    async fn dispatch(&self, attempt: Uuid, intent: DraftIntent) -> SubmitOutcome {
        tracing::info!(%attempt, category = %intent.category, "Dispatching prompt");

        let result = match timeout(
            self.timeouts.dispatch(),
            self.pipeline.create(&intent.text, &intent.category),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(PipelineError::Timeout {
                seconds: self.timeouts.dispatch_seconds,
            }),
        };

        let mut inner = self.inner.lock();
        let mounted = inner.state == GateState::Dispatching;

        match result {
            Ok(handoff) => {
                tracing::info!(%attempt, app_id = ?handoff.app_id, "Prompt accepted");
                // Edits made while the request was in flight survive.
                if inner.input.text() == intent.text {
                    inner.input.clear();
                }
                if mounted {
                    inner.transition(GateState::Ready);
                }
                SubmitOutcome::Dispatched(handoff)
            }
            Err(err) => {
                tracing::warn!(%attempt, error = %err, "Prompt rejected");
                if matches!(err, PipelineError::Rejected { status: Some(401), .. }) {
                    // The pipeline no longer trusts the session; re-gate next time.
                    inner.session = None;
                }
                inner.last_failure = Some(err.user_message());
                if mounted {
                    inner.transition(GateState::Ready);
                }
                SubmitOutcome::Rejected(err)
            }
        }
    }
}
