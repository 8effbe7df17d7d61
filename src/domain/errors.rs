//! Domain-specific error types

use thiserror::Error;

use super::value_objects::BookingStatus;

/// Domain-level errors for travel bookings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{message}")]
    InvalidInput { field: String, message: String },

    #[error("Invalid status. Must be pending, confirmed, or cancelled")]
    InvalidStatus { status: String },

    #[error("Invalid role. Must be user or admin")]
    InvalidRole { role: String },

    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },

    #[error("Booking is already cancelled")]
    AlreadyCancelled,
}

impl DomainError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}
