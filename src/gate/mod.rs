//! Authentication-gated submission flow.
//!
//! ```text
//! Idle ──initialize──→ ProbingSession ──→ Ready
//!                                          │  ↑
//!              no session: AwaitingCredentials ─┤
//!              session held: Dispatching ───────┘
//! ```
//!
//! [`SubmissionDispatcher`] owns the state, the held session and the draft.
//! Every collaborator is reached through a trait so the flow can be driven by
//! the terminal view or by tests alike.

mod auth;
mod dispatcher;
mod input;
mod state;

pub use auth::{AuthGate, AuthOutcome};
pub use dispatcher::{IgnoreReason, SignInOutcome, SubmissionDispatcher, SubmitOutcome};
pub use input::{DraftIntent, InputController};
pub use state::GateState;
