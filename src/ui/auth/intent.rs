//! Intents for the sign-in dialog.

use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum AuthIntent {
    /// The gate asked for credentials.
    Open,

    /// Character typed into the focused field.
    Input(char),

    /// Delete the last character of the focused field.
    Backspace,

    NextField,
    PrevField,

    /// Switch between sign in and sign up.
    ToggleMode,

    /// User pressed Enter. Moves to `Verifying` only if the form is valid.
    Submit,

    /// Identity service refused the credentials or could not be reached.
    VerificationFailed { message: String },

    /// Identity service accepted the credentials.
    Verified,

    /// User pressed Escape.
    Dismiss,

    /// Animation tick (for spinner updates).
    AnimationTick,
}

impl Intent for AuthIntent {}
