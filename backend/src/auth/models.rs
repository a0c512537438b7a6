//! Data structures for authentication-related entities.
//!
//! The session is whatever the browser's cookies say it is; the form types only
//! carry the fields checked before a request goes upstream.

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Session state as read from the request cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Outcome of running the session gate over a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
    /// Admin path reached without the required role.
    RoleMismatch,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }
}

/// Fields of the registration form that are checked locally. The full body
/// is forwarded as sent.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub password_confirm: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        match &self.password_confirm {
            Some(confirm) if confirm != &self.password => Err(AuthError::PasswordMismatch),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordForm {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
    pub new_password_confirm: Option<String>,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.old_password.is_empty() {
            return Err(AuthError::MissingField("old_password"));
        }
        if self.new_password.is_empty() {
            return Err(AuthError::MissingField("new_password"));
        }
        match &self.new_password_confirm {
            Some(confirm) if confirm != &self.new_password => Err(AuthError::PasswordMismatch),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_requires_both_fields() {
        let form: LoginRequest = serde_json::from_value(json!({"email": "a@b.com"})).unwrap();
        assert_eq!(form.validate(), Err(AuthError::MissingCredentials));

        let form: LoginRequest =
            serde_json::from_value(json!({"email": "a@b.com", "password": "x"})).unwrap();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn register_checks_confirmation() {
        let form: RegisterForm = serde_json::from_value(json!({
            "email": "a@b.com",
            "password": "secret",
            "password_confirm": "other",
        }))
        .unwrap();
        assert_eq!(form.validate(), Err(AuthError::PasswordMismatch));

        let form: RegisterForm =
            serde_json::from_value(json!({"email": "a@b.com", "password": "secret"})).unwrap();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn change_password_checks_fields() {
        let form: ChangePasswordForm =
            serde_json::from_value(json!({"new_password": "n"})).unwrap();
        assert_eq!(form.validate(), Err(AuthError::MissingField("old_password")));

        let form: ChangePasswordForm = serde_json::from_value(json!({
            "old_password": "o",
            "new_password": "n",
            "new_password_confirm": "m",
        }))
        .unwrap();
        assert_eq!(form.validate(), Err(AuthError::PasswordMismatch));
    }
}
