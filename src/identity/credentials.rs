//! Credentials collected by the sign-in dialog.
//!
//! The password is wrapped so that it never reaches logs or panic messages.

use serde::Serialize;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when building the request body.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to the identity service.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Which identity endpoint the credentials are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Existing account.
    #[default]
    SignIn,
    /// New account; requires a display name.
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Sign up",
        }
    }
}

/// Credentials to verify against the identity service.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub mode: AuthMode,
    /// Display name, only sent for sign-up.
    pub name: Option<String>,
    pub email: String,
    pub password: SecureString,
}

/// JSON body sent to the sign-in / sign-up endpoints.
#[derive(Serialize)]
pub(crate) struct CredentialsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub password: &'a str,
}

impl Credentials {
    pub fn sign_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::SignIn,
            name: None,
            email: email.into(),
            password: SecureString::new(password.into()),
        }
    }

    pub fn sign_up(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::SignUp,
            name: Some(name.into()),
            email: email.into(),
            password: SecureString::new(password.into()),
        }
    }

    pub(crate) fn body(&self) -> CredentialsBody<'_> {
        CredentialsBody {
            name: match self.mode {
                AuthMode::SignUp => self.name.as_deref(),
                AuthMode::SignIn => None,
            },
            email: &self.email,
            password: self.password.expose(),
        }
    }
}
