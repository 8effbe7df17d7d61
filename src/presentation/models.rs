//! API request and response models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{
    BookingContact, BookingDetails, Package, PackageDetails, PackageDraft, PackageFilter, Page,
    ReviewDetails, User, UserBookingStats,
};
use crate::presentation::extractors::FieldOrder;

macro_rules! field_order {
    ($ty:ty => [$($field:ident),* $(,)?]) => {
        impl FieldOrder for $ty {
            const FIELD_ORDER: &'static [&'static str] = &[$(stringify!($field)),*];
        }
    };
}

const INVALID_BOOKING_DATE: &str = "Booking date must be a valid date";
const INVALID_PACKAGE_ID: &str = "Package ID must be a positive integer";
const INVALID_GUESTS: &str = "Number of guests must be between 1 and 10";
const INVALID_ROOMS: &str = "Number of rooms must be between 1 and 5";
const INVALID_RATING: &str = "Rating must be between 1 and 5";

fn letters_and_spaces(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        Ok(())
    } else {
        Err(ValidationError::new("person_name"))
    }
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

fn trimmed_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

/// Emails are compared case-insensitively
fn normalized_email<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.trim().to_lowercase())
}

fn normalized_email_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_lowercase()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Query strings send empty values for untouched form fields
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(non_empty(trimmed_opt(deserializer)?))
}

/// Calendar date from `YYYY-MM-DD` or an ISO 8601 timestamp
fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn booking_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw =
        String::deserialize(deserializer).map_err(|_| D::Error::custom(INVALID_BOOKING_DATE))?;
    parse_calendar_date(&raw).ok_or_else(|| D::Error::custom(INVALID_BOOKING_DATE))
}

fn booking_date_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)
        .map_err(|_| D::Error::custom(INVALID_BOOKING_DATE))?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_calendar_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(INVALID_BOOKING_DATE)),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

impl IntOrText {
    fn into_int(self) -> Option<i64> {
        match self {
            IntOrText::Int(n) => Some(n),
            IntOrText::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Integer sent as a number or a numeric string; anything else fails with `message`
fn lenient_int<'de, D: Deserializer<'de>>(
    deserializer: D,
    message: &'static str,
) -> Result<i64, D::Error> {
    IntOrText::deserialize(deserializer)
        .ok()
        .and_then(IntOrText::into_int)
        .ok_or_else(|| D::Error::custom(message))
}

fn package_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_int(deserializer, INVALID_PACKAGE_ID)
}

fn guest_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_int(deserializer, INVALID_GUESTS)
}

fn room_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_int(deserializer, INVALID_ROOMS)
}

fn rating_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_int(deserializer, INVALID_RATING)
}

fn rating_value_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<IntOrText>::deserialize(deserializer) {
        Ok(None) => Ok(None),
        Ok(Some(value)) => value
            .into_int()
            .map(Some)
            .ok_or_else(|| D::Error::custom(INVALID_RATING)),
        Err(_) => Err(D::Error::custom(INVALID_RATING)),
    }
}

// ---------------------------------------------------------------- auth

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"),
        custom(
            function = "letters_and_spaces",
            message = "Name can only contain letters and spaces"
        )
    )]
    #[schema(example = "Jane Doe")]
    pub name: String,

    #[serde(deserialize_with = "normalized_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

field_order!(RegisterRequest => [name, email, password]);

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "normalized_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

field_order!(LoginRequest => [email, password]);

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,

    #[serde(deserialize_with = "normalized_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
}

field_order!(UpdateProfileRequest => [name, email]);

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password and new password are required"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "New password must be at least 6 characters long"))]
    pub new_password: String,
}

field_order!(ChangePasswordRequest => [current_password, new_password]);

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------- packages

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PackageRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 3, max = 255, message = "Title must be between 3 and 255 characters"))]
    #[schema(example = "Italian Adventure")]
    pub title: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(
        min = 2,
        max = 255,
        message = "Destination must be between 2 and 255 characters"
    ))]
    #[schema(example = "Italy")]
    pub destination: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    #[schema(example = 2400.0)]
    pub price: f64,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 100, message = "Duration must be between 2 and 100 characters"))]
    #[schema(example = "7 days")]
    pub duration: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub image_url: Option<String>,
}

field_order!(PackageRequest => [title, destination, description, price, duration, image_url]);

impl From<PackageRequest> for PackageDraft {
    fn from(request: PackageRequest) -> Self {
        PackageDraft {
            title: request.title,
            destination: request.destination,
            description: request.description,
            price: request.price,
            duration: request.duration,
            image_url: non_empty(request.image_url),
        }
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PackageQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(
        min = 2,
        max = 100,
        message = "Search term must be between 2 and 100 characters"
    ))]
    pub search: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(
        min = 2,
        max = 100,
        message = "Destination filter must be between 2 and 100 characters"
    ))]
    pub destination: Option<String>,

    #[validate(range(min = 0.0, message = "Minimum price must be a positive number"))]
    pub min_price: Option<f64>,

    #[validate(range(min = 0.0, message = "Maximum price must be a positive number"))]
    pub max_price: Option<f64>,

    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

field_order!(PackageQuery => [search, destination, min_price, max_price, page, limit]);

impl PackageQuery {
    pub fn filter(&self) -> PackageFilter {
        PackageFilter {
            search: self.search.clone(),
            destination: self.destination.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub package: Package,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageDetailsResponse {
    pub package: PackageDetails,
}

// ---------------------------------------------------------------- bookings

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(deserialize_with = "package_ref")]
    #[validate(range(min = 1, message = "Package ID must be a positive integer"))]
    pub package_id: i64,

    #[serde(deserialize_with = "booking_date")]
    #[schema(value_type = String, format = Date, example = "2030-06-01")]
    pub booking_date: NaiveDate,

    #[serde(deserialize_with = "guest_count")]
    #[validate(range(min = 1, max = 10, message = "Number of guests must be between 1 and 10"))]
    pub guests: i64,

    #[serde(deserialize_with = "room_count")]
    #[validate(range(min = 1, max = 5, message = "Number of rooms must be between 1 and 5"))]
    pub rooms: i64,
}

field_order!(CreateBookingRequest => [package_id, booking_date, guests, rooms]);

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StatusUpdateRequest {
    #[serde(deserialize_with = "trimmed")]
    #[schema(example = "confirmed")]
    pub status: String,
}

field_order!(StatusUpdateRequest => [status]);

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct BookingListQuery {
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    pub status: Option<String>,
}

field_order!(BookingListQuery => [page, limit, status]);

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingQuery {
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    pub status: Option<String>,

    #[validate(range(min = 1, message = "User ID must be a positive integer"))]
    pub user_id: Option<i64>,
}

field_order!(AdminBookingQuery => [page, limit, status, user_id]);

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub booking: BookingDetails,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingStatsResponse {
    pub stats: UserBookingStats,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingContactRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(
        required(message = "All fields (name, email, phone, booking_date) are required."),
        length(min = 1, message = "All fields (name, email, phone, booking_date) are required.")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "normalized_email_opt")]
    #[validate(
        required(message = "All fields (name, email, phone, booking_date) are required."),
        email(message = "Please provide a valid email address")
    )]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(
        required(message = "All fields (name, email, phone, booking_date) are required."),
        length(min = 1, message = "All fields (name, email, phone, booking_date) are required.")
    )]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "booking_date_opt")]
    #[validate(required(message = "All fields (name, email, phone, booking_date) are required."))]
    #[schema(value_type = Option<String>, format = Date)]
    pub booking_date: Option<NaiveDate>,
}

field_order!(BookingContactRequest => [name, email, phone, booking_date]);

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingContactResponse {
    pub message: String,
    pub contact: BookingContact,
}

// ---------------------------------------------------------------- reviews

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[serde(deserialize_with = "package_ref")]
    #[validate(range(min = 1, message = "Package ID must be a positive integer"))]
    pub package_id: i64,

    #[serde(deserialize_with = "rating_value")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 10, max = 500, message = "Comment must be between 10 and 500 characters"))]
    pub comment: String,
}

field_order!(CreateReviewRequest => [package_id, rating, comment]);

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[serde(default, deserialize_with = "rating_value_opt")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i64>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 10, max = 500, message = "Comment must be between 10 and 500 characters"))]
    pub comment: Option<String>,
}

field_order!(UpdateReviewRequest => [rating, comment]);

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub review: ReviewDetails,
}

/// Reviews for one package with its live average, rounded to one decimal
#[derive(Debug, Serialize, ToSchema)]
pub struct PackageReviewsResponse {
    pub items: Vec<ReviewDetails>,
    pub average_rating: f64,
    pub total_reviews: i64,
    pub pagination: PaginationDto,
}

// ---------------------------------------------------------------- admin

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct UserListQuery {
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub search: Option<String>,
}

field_order!(UserListQuery => [page, limit, search]);

impl UserListQuery {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoleUpdateRequest {
    #[serde(deserialize_with = "trimmed")]
    #[schema(example = "admin")]
    pub role: String,
}

field_order!(RoleUpdateRequest => [role]);

// ---------------------------------------------------------------- contact

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,

    #[serde(deserialize_with = "normalized_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 100, message = "Subject must be between 5 and 100 characters"))]
    pub subject: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Message must be between 10 and 1000 characters"
    ))]
    pub message: String,
}

field_order!(ContactRequest => [name, email, subject, message]);

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

// ---------------------------------------------------------------- shared

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct PaginationQuery {
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

field_order!(PaginationQuery => [page, limit]);

/// DTO for pagination information
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationDto {
    /// Current page number (1-based indexing)
    #[schema(example = 1, minimum = 1)]
    pub page: u32,

    /// Number of items per page
    #[schema(example = 10, minimum = 1, maximum = 100)]
    pub limit: u32,

    /// Total number of items across all pages
    #[schema(example = 42)]
    pub total: i64,

    /// Total number of pages available
    #[schema(example = 5)]
    pub pages: i64,
}

impl<T> From<&Page<T>> for PaginationDto {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.request.page,
            limit: page.request.limit,
            total: page.total,
            pages: page.pages(),
        }
    }
}

/// One page of a list endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: ToSchema> {
    pub items: Vec<T>,
    pub pagination: PaginationDto,
}

impl<T: ToSchema> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        let pagination = PaginationDto::from(&page);
        Self {
            items: page.items,
            pagination,
        }
    }
}

/// Unpaginated list
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse<T: ToSchema> {
    pub items: Vec<T>,
}

impl<T: ToSchema> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Error response model
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Package not found")]
    pub error: String,

    /// HTTP status code
    #[schema(example = 404)]
    pub status: u16,

    /// Error occurrence timestamp
    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,
}

/// Health check response model
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,

    #[schema(example = "Wavv Travel API is running")]
    pub message: String,

    #[schema(example = "0.1.0")]
    pub version: String,

    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
