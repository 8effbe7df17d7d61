//! Domain entities representing core business concepts

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::value_objects::*;

/// Public view of an account. The password hash never leaves the repository
/// except through [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

/// Account row including the stored password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Admin listing row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub user: User,
    pub total_bookings: i64,
}

/// A purchasable travel offering. `rating` and `total_reviews` are a cache
/// of the package's review aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Package {
    pub id: i64,
    pub title: String,
    pub destination: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub rating: f64,
    pub total_reviews: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Package ranked by popularity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PopularPackage {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub package: Package,
    pub booking_count: i64,
}

/// Package detail with its reviews
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PackageDetails {
    #[serde(flatten)]
    pub package: Package,
    pub reviews: Vec<ReviewDetails>,
}

/// Fields accepted when creating or replacing a package
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDraft {
    pub title: String,
    pub destination: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub image_url: Option<String>,
}

/// Search filters for package listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFilter {
    pub search: Option<String>,
    pub destination: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub package_id: i64,
    pub booking_date: NaiveDate,
    pub guests: i64,
    pub rooms: i64,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Booking joined with package (and, for admin views, user) columns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub package_title: String,
    pub destination: String,
    #[sqlx(default)]
    pub image_url: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Input for a new booking, after validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: i64,
    pub package_id: i64,
    pub booking_date: NaiveDate,
    pub guests: i64,
    pub rooms: i64,
    pub total_amount: f64,
}

/// Filters for booking listings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<i64>,
    pub status: Option<BookingStatus>,
}

/// Per-user booking statistics
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserBookingStats {
    pub total_bookings: i64,
    pub confirmed_bookings: i64,
    pub pending_bookings: i64,
    pub cancelled_bookings: i64,
    pub total_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub package_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Review joined with reviewer and/or package columns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReviewDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_title: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial review update; at least one field must be present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewChanges {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.comment.is_none()
    }
}

/// Cached review aggregate for one package
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RatingSummary {
    pub rating: f64,
    pub total_reviews: i64,
}

/// Lead captured from the public booking-intent form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingContact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBookingContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub booking_date: NaiveDate,
}

/// Headline counters for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardTotals {
    pub total_users: i64,
    pub total_packages: i64,
    pub total_bookings: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: i64,
}

/// Point-in-time admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub stats: DashboardTotals,
    pub recent_bookings: Vec<BookingDetails>,
    pub popular_packages: Vec<PopularPackage>,
    pub status_distribution: Vec<StatusCount>,
    pub recent_contacts: Vec<BookingContact>,
}

/// One page of results plus the total row count
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Number of pages, rounding up
    pub fn pages(&self) -> i64 {
        let limit = self.request.limit as i64;
        (self.total + limit - 1) / limit
    }
}
