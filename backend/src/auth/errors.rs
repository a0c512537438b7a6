//! Custom error types specific to authentication flows.
//!
//! These cover the checks made before a login, registration or password change
//! is relayed, plus the one way a successful login reply can be unusable.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Request body must be valid JSON")]
    InvalidBody,

    #[error("login reply carried no access_token")]
    MissingToken,
}
