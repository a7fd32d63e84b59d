//! Authentication inputs: login credentials and registration requests.
//!
//! Inbound adapters build these values from their own payloads before calling
//! the [`crate::domain::AuthService`]. Credentials are deliberately left
//! unvalidated: an empty or oddly cased email simply fails to match the roster.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::Role;

/// Email/password pair submitted to a login form.
///
/// The email is kept verbatim (no trimming, no case folding).
///
/// # Examples
/// ```
/// use colipass::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin@example.com", "password");
/// assert_eq!(creds.email(), "admin@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Wrap raw email/password inputs.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Email string used for roster lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Role a new account may choose at signup. Admin accounts are never
/// self-registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SignupRole {
    Traveler,
    Sender,
}

impl From<SignupRole> for Role {
    fn from(value: SignupRole) -> Self {
        match value {
            SignupRole::Traveler => Role::Traveler,
            SignupRole::Sender => Role::Sender,
        }
    }
}

impl FromStr for SignupRole {
    type Err = RegistrationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traveler" => Ok(Self::Traveler),
            "sender" => Ok(Self::Sender),
            other => Err(RegistrationValidationError::UnsupportedRole {
                role: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while assembling a [`Registration`] from form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Password and confirmation differ.
    PasswordMismatch,
    /// The requested role cannot be chosen at signup.
    UnsupportedRole { role: String },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::UnsupportedRole { role } => {
                write!(f, "role '{role}' cannot be selected at signup")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Raw signup form fields.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: SignupRole,
    pub phone: Option<String>,
}

/// Profile fields accepted for a new account.
///
/// No uniqueness or format checks happen here. The password is accepted and
/// held only until the registration is dropped; it never reaches the
/// persisted user record.
#[derive(Debug, Clone)]
pub struct Registration {
    email: String,
    password: Zeroizing<String>,
    first_name: String,
    last_name: String,
    role: SignupRole,
    phone: Option<String>,
}

impl Registration {
    /// Accept form fields as-is. Blank phone input is treated as absent.
    pub fn new(form: RegistrationForm) -> Self {
        let RegistrationForm {
            email,
            password,
            first_name,
            last_name,
            role,
            phone,
        } = form;
        Self {
            email,
            password: Zeroizing::new(password),
            first_name,
            last_name,
            role,
            phone: phone.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Accept form fields after checking the password confirmation.
    ///
    /// # Examples
    /// ```
    /// use colipass::domain::{Registration, RegistrationForm, RegistrationValidationError, SignupRole};
    ///
    /// let form = RegistrationForm {
    ///     email: "new@x.com".into(),
    ///     password: "secret".into(),
    ///     first_name: "Nina".into(),
    ///     last_name: "Roy".into(),
    ///     role: SignupRole::Traveler,
    ///     phone: None,
    /// };
    /// let err = Registration::confirmed(form, "other").unwrap_err();
    /// assert_eq!(err, RegistrationValidationError::PasswordMismatch);
    /// ```
    pub fn confirmed(
        form: RegistrationForm,
        confirmation: &str,
    ) -> Result<Self, RegistrationValidationError> {
        if form.password != confirmation {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        Ok(Self::new(form))
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Role selected on the form.
    pub fn role(&self) -> SignupRole {
        self.role
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}
