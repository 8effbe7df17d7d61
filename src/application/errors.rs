//! Application layer error types

use crate::domain::DomainError;
use thiserror::Error;

/// Application-level errors. Each variant maps to one HTTP status in the
/// presentation layer.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApplicationError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApplicationError::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        ApplicationError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApplicationError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApplicationError::Internal {
            message: message.into(),
        }
    }

    /// Get the error kind as a string for logs and API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ApplicationError::Domain(_) | ApplicationError::Validation { .. } => "validation_error",
            ApplicationError::Repository(RepositoryError::Database(_)) => "internal_error",
            ApplicationError::Repository(RepositoryError::MissingReference) => "validation_error",
            ApplicationError::Repository(_) | ApplicationError::Conflict { .. } => "conflict",
            ApplicationError::Auth(
                AuthError::Hashing(_)
                | AuthError::TokenIssue(_)
                | AuthError::InvalidTokenLifetime(_),
            ) => {
                "internal_error"
            }
            ApplicationError::Auth(_) | ApplicationError::Unauthorized { .. } => "unauthorized",
            ApplicationError::Forbidden { .. } => "forbidden",
            ApplicationError::NotFound { .. } => "not_found",
            ApplicationError::Internal { .. } => "internal_error",
        }
    }
}

/// Store errors, classified from driver error codes
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Duplicate entry. This record already exists.")]
    Duplicate,

    #[error("Referenced record does not exist.")]
    MissingReference,

    #[error("Cannot delete this record as it is referenced by other records.")]
    StillReferenced,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => RepositoryError::Duplicate,
            Some(db) if db.is_foreign_key_violation() => RepositoryError::MissingReference,
            _ => RepositoryError::Database(err),
        }
    }
}

impl RepositoryError {
    /// Classify an error raised by a DELETE, where a foreign key failure means
    /// other rows still reference the target.
    pub fn on_delete(err: sqlx::Error) -> Self {
        match RepositoryError::from(err) {
            RepositoryError::MissingReference => RepositoryError::StillReferenced,
            other => other,
        }
    }
}

/// Token and password errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Access denied. No token provided.")]
    MissingToken,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Token expired.")]
    ExpiredToken,

    #[error("Invalid token. User not found.")]
    UnknownUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issue failed: {0}")]
    TokenIssue(String),

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidTokenLifetime(i64),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        }
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}
