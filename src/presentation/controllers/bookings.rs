//! Booking endpoints for signed-in customers

use axum::{extract::State, http::StatusCode, response::Json};

use crate::application::errors::ApplicationError;
use crate::domain::{BookingDetails, BookingStatus, PageRequest};
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::presentation::middleware::AuthUser;
use crate::presentation::models::{
    BookingListQuery, BookingResponse, BookingStatsResponse, CreateBookingRequest, ErrorResponse,
    PaginatedResponse, StatusUpdateRequest,
};

/// Parse an optional `status` query value; blank means no filter
pub(crate) fn status_filter(
    status: Option<&str>,
) -> Result<Option<BookingStatus>, ApplicationError> {
    match status.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Ok(Some(value.parse()?)),
    }
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "bookings",
    security(("bearer" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid booking request", body = ErrorResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApplicationError> {
    let booking = app_state
        .booking_service
        .create(
            &user,
            request.package_id,
            request.booking_date,
            request.guests,
            request.rooms,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: Some("Booking created successfully".to_string()),
            booking,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/bookings/my-bookings",
    tag = "bookings",
    security(("bearer" = [])),
    params(BookingListQuery),
    responses(
        (status = 200, description = "Caller's bookings, newest first", body = PaginatedResponse<BookingDetails>)
    )
)]
pub async fn my_bookings(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> Result<Json<PaginatedResponse<BookingDetails>>, ApplicationError> {
    let page = PageRequest::new(query.page, query.limit)?;
    let status = status_filter(query.status.as_deref())?;
    let bookings = app_state
        .booking_service
        .list_for_user(user.id, status, page)
        .await?;

    Ok(Json(bookings.into()))
}

/// Admins may read any booking; customers only their own
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "bookings",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking detail", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<BookingResponse>, ApplicationError> {
    let booking = app_state.booking_service.get(&user, id).await?;
    Ok(Json(BookingResponse {
        message: None,
        booking,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    tag = "bookings",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status changed", body = BookingResponse),
        (status = 400, description = "Invalid status or transition", body = ErrorResponse),
        (status = 403, description = "Role may not set this status", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<BookingResponse>, ApplicationError> {
    let status: BookingStatus = request.status.parse()?;
    let booking = app_state
        .booking_service
        .change_status(&user, id, status)
        .await?;

    Ok(Json(BookingResponse {
        message: Some("Booking status updated successfully".to_string()),
        booking,
    }))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 400, description = "Booking is already cancelled", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<BookingResponse>, ApplicationError> {
    let booking = app_state.booking_service.cancel(&user, id).await?;
    Ok(Json(BookingResponse {
        message: Some("Booking cancelled successfully".to_string()),
        booking,
    }))
}

#[utoipa::path(
    get,
    path = "/api/bookings/stats/user",
    tag = "bookings",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's booking counters", body = BookingStatsResponse)
    )
)]
pub async fn booking_stats(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<BookingStatsResponse>, ApplicationError> {
    let stats = app_state.booking_service.stats(user.id).await?;
    Ok(Json(BookingStatsResponse { stats }))
}
