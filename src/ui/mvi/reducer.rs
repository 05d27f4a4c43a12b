//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place dialog state changes.
///
/// Must stay pure: network calls and channel sends happen in the caller
/// around the dispatch.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
