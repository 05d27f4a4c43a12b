//! Shared test utilities: in-memory collaborators for the submission gate.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use parking_lot::Mutex;
use promptgate::config::{default_suggestions, TimeoutConfig, DEFAULT_CATEGORY};
use promptgate::gate::{AuthGate, AuthOutcome, GateState, InputController, SubmissionDispatcher};
use promptgate::identity::{Credentials, IdentityError, IdentityService, Session};
use promptgate::pipeline::{CreationPipeline, Handoff, PipelineError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Notify};

pub fn zo() -> Session {
    Session {
        id: "u1".to_string(),
        name: "Zo".to_string(),
        email: "z@x.com".to_string(),
    }
}

/// Timeouts short enough for tests that exercise expiry.
pub fn quick_timeouts() -> TimeoutConfig {
    TimeoutConfig {
        probe_seconds: 1,
        verify_seconds: 1,
        dispatch_seconds: 1,
        logout_seconds: 1,
        connect_seconds: 1,
    }
}

// -- Identity -----------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ProbeBehavior {
    Session(Option<Session>),
    Fail,
    Hang,
}

#[derive(Debug, Clone, Copy)]
pub enum LogoutBehavior {
    Ok,
    Fail,
    Hang,
}

pub struct FakeIdentity {
    probe: Mutex<ProbeBehavior>,
    logout: Mutex<LogoutBehavior>,
    /// Held until notified, so tests can overlap calls with a running probe.
    probe_hold: Option<Arc<Notify>>,
    pub probe_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn new(probe: ProbeBehavior) -> Self {
        Self {
            probe: Mutex::new(probe),
            logout: Mutex::new(LogoutBehavior::Ok),
            probe_hold: None,
            probe_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
        }
    }

    pub fn signed_out() -> Self {
        Self::new(ProbeBehavior::Session(None))
    }

    pub fn signed_in(session: Session) -> Self {
        Self::new(ProbeBehavior::Session(Some(session)))
    }

    pub fn with_logout(self, behavior: LogoutBehavior) -> Self {
        *self.logout.lock() = behavior;
        self
    }

    pub fn with_probe_hold(mut self, hold: Arc<Notify>) -> Self {
        self.probe_hold = Some(hold);
        self
    }

    pub fn probes(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn current_session(&self) -> Result<Option<Session>, IdentityError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = &self.probe_hold {
            hold.notified().await;
        }
        let behavior = self.probe.lock().clone();
        match behavior {
            ProbeBehavior::Session(session) => Ok(session),
            ProbeBehavior::Fail => Err(IdentityError::Status { status: 503 }),
            ProbeBehavior::Hang => std::future::pending().await,
        }
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = *self.logout.lock();
        match behavior {
            LogoutBehavior::Ok => Ok(()),
            LogoutBehavior::Fail => Err(IdentityError::Status { status: 500 }),
            LogoutBehavior::Hang => std::future::pending().await,
        }
    }

    async fn verify_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, IdentityError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Session {
            id: "verified".to_string(),
            name: credentials.name.clone().unwrap_or_default(),
            email: credentials.email.clone(),
        })
    }
}

// -- Gates --------------------------------------------------------------------

/// Answers each `open()` immediately with the next scripted outcome.
pub struct ScriptedGate {
    outcomes: Mutex<VecDeque<AuthOutcome>>,
    pub opens: AtomicUsize,
}

impl ScriptedGate {
    pub fn new(outcomes: impl IntoIterator<Item = AuthOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            opens: AtomicUsize::new(0),
        }
    }

    pub fn resolving(session: Session) -> Self {
        Self::new([AuthOutcome::Resolved(session)])
    }

    pub fn abandoning() -> Self {
        Self::new([AuthOutcome::Abandoned])
    }

    pub fn opened(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGate for ScriptedGate {
    async fn open(&self) -> AuthOutcome {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or(AuthOutcome::Abandoned)
    }
}

/// Hands each `open()` responder to the test, which answers when it chooses.
pub struct ManualGate {
    requests: mpsc::UnboundedSender<oneshot::Sender<AuthOutcome>>,
    pub opens: AtomicUsize,
}

impl ManualGate {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<oneshot::Sender<AuthOutcome>>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (
            Self {
                requests,
                opens: AtomicUsize::new(0),
            },
            rx,
        )
    }

    pub fn opened(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGate for ManualGate {
    async fn open(&self) -> AuthOutcome {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let (respond_to, answer) = oneshot::channel();
        if self.requests.send(respond_to).is_err() {
            return AuthOutcome::Abandoned;
        }
        answer.await.unwrap_or(AuthOutcome::Abandoned)
    }
}

// -- Pipeline -----------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum PipelineBehavior {
    Accept,
    Reject { status: u16, message: String },
    /// Accept once the notify fires.
    AcceptAfter(Arc<Notify>),
    Hang,
}

pub struct FakePipeline {
    behaviors: Mutex<VecDeque<PipelineBehavior>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakePipeline {
    /// Plays `behaviors` in order, then accepts everything.
    pub fn new(behaviors: impl IntoIterator<Item = PipelineBehavior>) -> Self {
        Self {
            behaviors: Mutex::new(behaviors.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new([])
    }

    pub fn rejecting_once(status: u16, message: &str) -> Self {
        Self::new([PipelineBehavior::Reject {
            status,
            message: message.to_string(),
        }])
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CreationPipeline for FakePipeline {
    async fn create(&self, prompt: &str, category: &str) -> Result<Handoff, PipelineError> {
        self.calls
            .lock()
            .push((prompt.to_string(), category.to_string()));
        let behavior = self
            .behaviors
            .lock()
            .pop_front()
            .unwrap_or(PipelineBehavior::Accept);

        match behavior {
            PipelineBehavior::Accept => {}
            PipelineBehavior::AcceptAfter(release) => release.notified().await,
            PipelineBehavior::Reject { status, message } => {
                return Err(PipelineError::Rejected {
                    status: Some(status),
                    message,
                })
            }
            PipelineBehavior::Hang => std::future::pending::<()>().await,
        }

        Ok(Handoff {
            app_id: Some(format!("app-{}", self.calls.lock().len())),
            prompt: prompt.to_string(),
            category: category.to_string(),
            response: serde_json::json!({ "success": true }),
        })
    }
}

// -- Dispatcher helpers -------------------------------------------------------

pub struct Harness<G> {
    pub dispatcher: Arc<SubmissionDispatcher>,
    pub identity: Arc<FakeIdentity>,
    pub gate: Arc<G>,
    pub pipeline: Arc<FakePipeline>,
}

pub fn harness<G: AuthGate + 'static>(
    identity: FakeIdentity,
    gate: G,
    pipeline: FakePipeline,
    timeouts: TimeoutConfig,
) -> Harness<G> {
    let identity = Arc::new(identity);
    let gate = Arc::new(gate);
    let pipeline = Arc::new(pipeline);
    let dispatcher = Arc::new(SubmissionDispatcher::new(
        identity.clone(),
        gate.clone(),
        pipeline.clone(),
        InputController::new(DEFAULT_CATEGORY, default_suggestions()),
        timeouts,
    ));
    Harness {
        dispatcher,
        identity,
        gate,
        pipeline,
    }
}

/// Polls until the dispatcher reaches `state`, or panics after two seconds.
pub async fn wait_for_state(dispatcher: &SubmissionDispatcher, state: GateState) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while dispatcher.state() != state {
        if tokio::time::Instant::now() > deadline {
            panic!(
                "dispatcher stuck in {:?}, expected {:?}",
                dispatcher.state(),
                state
            );
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
