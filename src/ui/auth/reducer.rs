//! Reducer for the sign-in dialog.

use crate::identity::SecureString;
use crate::ui::mvi::Reducer;

use super::intent::AuthIntent;
use super::state::{AuthDialogState, AuthField, AuthForm};

/// Reducer for sign-in dialog state transitions.
///
/// Pure: sending credentials and resolving the gate happen in `App`.
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthDialogState;
    type Intent = AuthIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Open => AuthDialogState::Editing {
                form: AuthForm::default(),
            },

            AuthIntent::Dismiss | AuthIntent::Verified => AuthDialogState::Hidden,

            AuthIntent::AnimationTick => match state {
                AuthDialogState::Verifying {
                    form,
                    animation_tick,
                } => AuthDialogState::Verifying {
                    form,
                    animation_tick: animation_tick.wrapping_add(1),
                },
                other => other,
            },

            AuthIntent::VerificationFailed { message } => match state {
                AuthDialogState::Verifying { mut form, .. } => {
                    form.error = Some(message);
                    form.password = SecureString::default();
                    form.focus = AuthField::Password;
                    AuthDialogState::Editing { form }
                }
                other => other,
            },

            AuthIntent::Submit => match state {
                AuthDialogState::Editing { mut form } => match form.validation_error() {
                    Some(problem) => {
                        form.error = Some(problem.to_string());
                        AuthDialogState::Editing { form }
                    }
                    None => {
                        form.error = None;
                        AuthDialogState::Verifying {
                            form,
                            animation_tick: 0,
                        }
                    }
                },
                other => other,
            },

            AuthIntent::Input(ch) => edit(state, |form| match form.focus {
                AuthField::Name => form.name.push(ch),
                AuthField::Email => form.email.push(ch),
                AuthField::Password => {
                    let mut value = form.password.expose().to_string();
                    value.push(ch);
                    form.password = SecureString::new(value);
                }
            }),

            AuthIntent::Backspace => edit(state, |form| match form.focus {
                AuthField::Name => {
                    form.name.pop();
                }
                AuthField::Email => {
                    form.email.pop();
                }
                AuthField::Password => {
                    let mut value = form.password.expose().to_string();
                    value.pop();
                    form.password = SecureString::new(value);
                }
            }),

            AuthIntent::NextField => edit(state, |form| move_focus(form, 1)),
            AuthIntent::PrevField => edit(state, |form| move_focus(form, -1)),

            AuthIntent::ToggleMode => edit(state, |form| {
                form.mode = form.mode.toggled();
                if !form.fields().contains(&form.focus) {
                    form.focus = form.fields()[0];
                }
            }),
        }
    }
}

/// Applies `f` to the form while editing; clears any previous error.
/// Ignored in every other state.
fn edit(state: AuthDialogState, f: impl FnOnce(&mut AuthForm)) -> AuthDialogState {
    match state {
        AuthDialogState::Editing { mut form } => {
            f(&mut form);
            form.error = None;
            AuthDialogState::Editing { form }
        }
        other => other,
    }
}

fn move_focus(form: &mut AuthForm, step: isize) {
    let fields = form.fields();
    let current = fields.iter().position(|f| *f == form.focus).unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(fields.len() as isize) as usize;
    form.focus = fields[next];
}
