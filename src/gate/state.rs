use std::fmt;

/// Phase of the submission flow. Exactly one per mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Not mounted yet, or torn down.
    #[default]
    Idle,
    /// Startup session check in flight.
    ProbingSession,
    /// Accepting submissions.
    Ready,
    /// Credential dialog open.
    AwaitingCredentials,
    /// Prompt handed to the creation pipeline, awaiting its answer.
    Dispatching,
}

impl GateState {
    pub fn is_ready(self) -> bool {
        self == GateState::Ready
    }

    /// True while an outbound call or the credential dialog is pending.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            GateState::ProbingSession | GateState::AwaitingCredentials | GateState::Dispatching
        )
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GateState::Idle => "idle",
            GateState::ProbingSession => "checking session",
            GateState::Ready => "ready",
            GateState::AwaitingCredentials => "waiting for sign-in",
            GateState::Dispatching => "sending",
        };
        f.write_str(label)
    }
}
