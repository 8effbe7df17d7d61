//! Registration, login and profile endpoints

use axum::{extract::State, http::StatusCode, response::Json};

use crate::application::errors::ApplicationError;
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::presentation::models::{
    AuthResponse, ChangePasswordRequest, ErrorResponse, LoginRequest, MessageResponse,
    RegisterRequest, UpdateProfileRequest, UserResponse,
};

/// Create an account and sign it in
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApplicationError> {
    let session = app_state
        .auth_service
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: session.user,
            token: session.token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApplicationError> {
    let session = app_state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: session.user,
        token: session.token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, ApplicationError> {
    let user = app_state.auth_service.profile(user.id).await?;
    Ok(Json(UserResponse {
        message: None,
        user,
    }))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "auth",
    security(("bearer" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid input or email taken", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApplicationError> {
    let user = app_state
        .auth_service
        .update_profile(user.id, &request.name, &request.email)
        .await?;

    Ok(Json(UserResponse {
        message: Some("Profile updated successfully".to_string()),
        user,
    }))
}

#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = "auth",
    security(("bearer" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Current password is incorrect", body = ErrorResponse)
    )
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    app_state
        .auth_service
        .change_password(user.id, &request.current_password, &request.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Tokens are stateless; the client discards its copy
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
pub async fn logout(AuthUser(_user): AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}
