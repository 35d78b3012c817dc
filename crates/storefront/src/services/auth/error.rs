//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] ruouvan_core::EmailError),

    /// Registration fields missing or invalid.
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    /// No account exists for the given email.
    #[error("no account with this email")]
    UnknownEmail,

    /// The email exists but the password is wrong.
    #[error("wrong password")]
    WrongPassword,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
