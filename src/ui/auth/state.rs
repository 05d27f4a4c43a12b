//! State for the sign-in dialog.

use crate::identity::{AuthMode, Credentials, SecureString};
use crate::ui::mvi::UiState;

/// Input field of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    /// Display name (sign-up only).
    Name,
    #[default]
    Email,
    Password,
}

/// Values typed into the dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: SecureString,
    pub focus: AuthField,
    /// Validation or verification failure shown under the fields.
    pub error: Option<String>,
}

impl AuthForm {
    /// Fields shown for the current mode, in focus order.
    pub fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::SignIn => &[AuthField::Email, AuthField::Password],
            AuthMode::SignUp => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    /// First problem that prevents verification, if any.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.mode == AuthMode::SignUp && self.name.trim().is_empty() {
            return Some("Name is required");
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Some("Email is required");
        }
        if !email.contains('@') {
            return Some("Enter a valid email address");
        }
        if self.password.is_empty() {
            return Some("Password is required");
        }
        None
    }

    pub fn credentials(&self) -> Credentials {
        match self.mode {
            AuthMode::SignIn => Credentials::sign_in(self.email.trim(), self.password.expose()),
            AuthMode::SignUp => Credentials::sign_up(
                self.name.trim(),
                self.email.trim(),
                self.password.expose(),
            ),
        }
    }
}

/// State of the sign-in dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthDialogState {
    /// Dialog is not visible.
    #[default]
    Hidden,

    /// Collecting credentials.
    Editing { form: AuthForm },

    /// Credentials sent; waiting for the identity service.
    Verifying {
        form: AuthForm,
        /// Animation tick for spinner.
        animation_tick: u8,
    },
}

impl UiState for AuthDialogState {}

impl AuthDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_verifying(&self) -> bool {
        matches!(self, Self::Verifying { .. })
    }

    pub fn form(&self) -> Option<&AuthForm> {
        match self {
            Self::Hidden => None,
            Self::Editing { form } | Self::Verifying { form, .. } => Some(form),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.form().and_then(|form| form.error.as_deref())
    }
}
