//! Model-View-Intent (MVI) primitives for the modal dialogs.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: everything the dialog needs to render
//! - **Intent**: a key press or a completed background call
//! - **Reducer**: pure `(State, Intent) -> State`; side effects stay in `App`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
