//! Sign-in dialog feature module.
//!
//! The dialog is the terminal realization of the submission gate's
//! credential step: it opens when the gate asks for credentials, verifies
//! them against the identity service, and resolves the gate.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Dialog state enum and form
//! - `intent.rs` - User/system actions
//! - `reducer.rs` - State transitions
//! - `dialog.rs` - Rendering
//! - `gate.rs` - `AuthGate` bridge between the dispatcher and the UI thread

mod dialog;
mod gate;
mod intent;
mod reducer;
mod state;

pub use dialog::render_auth_dialog;
pub use gate::ModalAuthGate;
pub use intent::AuthIntent;
pub use reducer::AuthReducer;
pub use state::{AuthDialogState, AuthField, AuthForm};
