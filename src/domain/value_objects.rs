//! Domain value objects representing immutable concepts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::errors::DomainError;

/// Account role. Closed set: every access rule is expressed against it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Check the central access table for this role
    pub fn can(&self, capability: Capability) -> bool {
        ACCESS_RULES
            .iter()
            .find(|(cap, _)| *cap == capability)
            .is_some_and(|(_, roles)| roles.contains(self))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

/// Booking lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Allowed transitions: pending -> confirmed, pending -> cancelled,
    /// confirmed -> cancelled. Cancelled is terminal.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }

    /// Validate a transition, returning the target status on success
    pub fn transition_to(&self, next: BookingStatus) -> Result<BookingStatus, DomainError> {
        if *self == BookingStatus::Cancelled && next == BookingStatus::Cancelled {
            return Err(DomainError::AlreadyCancelled);
        }
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: *self,
                to: next,
            })
        }
    }

    /// Capability a caller needs to move a booking into this status
    pub fn required_capability(&self) -> Capability {
        match self {
            BookingStatus::Pending => Capability::ReopenBooking,
            BookingStatus::Confirmed => Capability::ConfirmBooking,
            BookingStatus::Cancelled => Capability::CancelBooking,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(DomainError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManagePackages,
    ManageUsers,
    ManageAllBookings,
    ViewDashboard,
    ConfirmBooking,
    CancelBooking,
    ReopenBooking,
    CreateBooking,
    WriteReview,
}

/// Central (capability, allowed roles) table
pub const ACCESS_RULES: &[(Capability, &[Role])] = &[
    (Capability::ManagePackages, &[Role::Admin]),
    (Capability::ManageUsers, &[Role::Admin]),
    (Capability::ManageAllBookings, &[Role::Admin]),
    (Capability::ViewDashboard, &[Role::Admin]),
    (Capability::ConfirmBooking, &[Role::Admin]),
    (Capability::ReopenBooking, &[Role::Admin]),
    (Capability::CancelBooking, &[Role::User, Role::Admin]),
    (Capability::CreateBooking, &[Role::User, Role::Admin]),
    (Capability::WriteReview, &[Role::User, Role::Admin]),
];

/// Normalized page request (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if page < 1 {
            return Err(DomainError::invalid_input(
                "page",
                "Page must be a positive integer",
            ));
        }
        if limit < 1 || limit > Self::MAX_LIMIT {
            return Err(DomainError::invalid_input(
                "limit",
                "Limit must be between 1 and 100",
            ));
        }

        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
