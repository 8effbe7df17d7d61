//! Domain services containing business rules that span entities

use chrono::NaiveDate;

use super::errors::DomainError;
use super::value_objects::{BookingStatus, Role};

pub const MIN_GUESTS: i64 = 1;
pub const MAX_GUESTS: i64 = 10;
pub const MIN_ROOMS: i64 = 1;
pub const MAX_ROOMS: i64 = 5;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Pricing and date rules for new bookings
pub struct BookingPolicy;

impl BookingPolicy {
    /// Total charged for a booking, fixed at creation time
    pub fn total_amount(price: f64, guests: i64, rooms: i64) -> f64 {
        price * guests as f64 * rooms as f64
    }

    /// Reject dates before `today` and out-of-range party sizes
    pub fn check_request(
        booking_date: NaiveDate,
        guests: i64,
        rooms: i64,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        if booking_date < today {
            return Err(DomainError::invalid_input(
                "bookingDate",
                "Booking date cannot be in the past",
            ));
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
            return Err(DomainError::invalid_input(
                "guests",
                "Number of guests must be between 1 and 10",
            ));
        }
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&rooms) {
            return Err(DomainError::invalid_input(
                "rooms",
                "Number of rooms must be between 1 and 5",
            ));
        }
        Ok(())
    }
}

/// Outcome of checking a status change request against the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChangeDecision {
    Allowed(BookingStatus),
    Forbidden,
}

/// Decide whether `role` may move a booking from `current` to `requested`.
/// Role is checked before the transition table so a user asking for
/// `confirmed` is refused regardless of the booking's state.
pub fn decide_status_change(
    role: Role,
    current: BookingStatus,
    requested: BookingStatus,
) -> Result<StatusChangeDecision, DomainError> {
    if !role.can(requested.required_capability()) {
        return Ok(StatusChangeDecision::Forbidden);
    }
    current
        .transition_to(requested)
        .map(StatusChangeDecision::Allowed)
}

pub fn check_rating(rating: i64) -> Result<(), DomainError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::invalid_input(
            "rating",
            "Rating must be between 1 and 5",
        ))
    }
}
