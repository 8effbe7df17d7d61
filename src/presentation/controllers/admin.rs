//! Admin console endpoints. Every handler requires the admin role.

use axum::{extract::State, response::Json};

use crate::application::errors::ApplicationError;
use crate::domain::{BookingDetails, BookingFilter, Dashboard, PageRequest, Role, UserSummary};
use crate::presentation::controllers::AppState;
use crate::presentation::controllers::bookings::status_filter;
use crate::presentation::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::presentation::middleware::AdminUser;
use crate::presentation::models::{
    AdminBookingQuery, BookingResponse, ErrorResponse, MessageResponse, PaginatedResponse,
    RoleUpdateRequest, StatusUpdateRequest, UserListQuery,
};

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer" = [])),
    params(UserListQuery),
    responses(
        (status = 200, description = "Users with their booking counts", body = PaginatedResponse<UserSummary>),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
) -> Result<Json<PaginatedResponse<UserSummary>>, ApplicationError> {
    let page = PageRequest::new(query.page, query.limit)?;
    let users = app_state
        .admin_service
        .list_users(query.search(), page)
        .await?;

    Ok(Json(users.into()))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    tag = "admin",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = RoleUpdateRequest,
    responses(
        (status = 200, description = "Role changed", body = MessageResponse),
        (status = 400, description = "Invalid role", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user_role(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<RoleUpdateRequest>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    let role: Role = request.role.parse()?;
    app_state.admin_service.change_role(id, role).await?;
    Ok(Json(MessageResponse::new("User role updated successfully")))
}

/// Admins and users with bookings cannot be deleted
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "User has bookings", body = ErrorResponse),
        (status = 403, description = "Target is an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    app_state.admin_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    tag = "admin",
    security(("bearer" = [])),
    params(AdminBookingQuery),
    responses(
        (status = 200, description = "All bookings with customer details", body = PaginatedResponse<BookingDetails>)
    )
)]
pub async fn list_all_bookings(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedQuery(query): ValidatedQuery<AdminBookingQuery>,
) -> Result<Json<PaginatedResponse<BookingDetails>>, ApplicationError> {
    let page = PageRequest::new(query.page, query.limit)?;
    let filter = BookingFilter {
        user_id: query.user_id,
        status: status_filter(query.status.as_deref())?,
    };
    let bookings = app_state.booking_service.list_all(&filter, page).await?;

    Ok(Json(bookings.into()))
}

#[utoipa::path(
    patch,
    path = "/api/admin/bookings/{id}/status",
    tag = "admin",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status changed", body = BookingResponse),
        (status = 400, description = "Invalid status or transition", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn admin_update_booking_status(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<BookingResponse>, ApplicationError> {
    let status = request.status.parse()?;
    let booking = app_state
        .booking_service
        .change_status(&admin, id, status)
        .await?;

    Ok(Json(BookingResponse {
        message: Some("Booking status updated successfully".to_string()),
        booking,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/bookings/{id}",
    tag = "admin",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn admin_delete_booking(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    app_state.booking_service.delete(&admin, id).await?;
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}

/// Headline totals, recent activity and status breakdown
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dashboard snapshot", body = Dashboard),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    )
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Dashboard>, ApplicationError> {
    let dashboard = app_state.admin_service.dashboard().await?;
    Ok(Json(dashboard))
}
