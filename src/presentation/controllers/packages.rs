//! Package catalogue endpoints

use axum::{extract::State, http::StatusCode, response::Json};

use crate::application::errors::ApplicationError;
use crate::domain::{Package, PageRequest, PopularPackage};
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::presentation::middleware::AdminUser;
use crate::presentation::models::{
    ErrorResponse, ListResponse, MessageResponse, PackageDetailsResponse, PackageQuery,
    PackageRequest, PackageResponse, PaginatedResponse,
};

/// Search and page through packages
#[utoipa::path(
    get,
    path = "/api/packages",
    tag = "packages",
    params(PackageQuery),
    responses(
        (status = 200, description = "Page of packages", body = PaginatedResponse<Package>),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    )
)]
pub async fn list_packages(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PackageQuery>,
) -> Result<Json<PaginatedResponse<Package>>, ApplicationError> {
    let page = PageRequest::new(query.page, query.limit)?;
    let packages = app_state
        .package_service
        .list(&query.filter(), page)
        .await?;

    Ok(Json(packages.into()))
}

/// Package with its reviews
#[utoipa::path(
    get,
    path = "/api/packages/{id}",
    tag = "packages",
    params(("id" = i64, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package detail", body = PackageDetailsResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
pub async fn get_package(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PackageDetailsResponse>, ApplicationError> {
    let package = app_state.package_service.details(id).await?;
    Ok(Json(PackageDetailsResponse { package }))
}

#[utoipa::path(
    get,
    path = "/api/packages/popular/{limit}",
    tag = "packages",
    params(("limit" = i64, Path, description = "How many packages to return (1-100)")),
    responses(
        (status = 200, description = "Most booked packages", body = ListResponse<PopularPackage>),
        (status = 400, description = "Limit out of range", body = ErrorResponse)
    )
)]
pub async fn popular_packages(
    State(app_state): State<AppState>,
    ApiPath(limit): ApiPath<i64>,
) -> Result<Json<ListResponse<PopularPackage>>, ApplicationError> {
    let packages = app_state.package_service.popular(limit).await?;
    Ok(Json(packages.into()))
}

#[utoipa::path(
    get,
    path = "/api/packages/by-destination/{destination}",
    tag = "packages",
    params(("destination" = String, Path, description = "Destination name fragment")),
    responses(
        (status = 200, description = "Matching packages", body = ListResponse<Package>)
    )
)]
pub async fn packages_by_destination(
    State(app_state): State<AppState>,
    ApiPath(destination): ApiPath<String>,
) -> Result<Json<ListResponse<Package>>, ApplicationError> {
    let packages = app_state
        .package_service
        .by_destination(destination.trim())
        .await?;
    Ok(Json(packages.into()))
}

#[utoipa::path(
    post,
    path = "/api/packages",
    tag = "packages",
    security(("bearer" = [])),
    request_body = PackageRequest,
    responses(
        (status = 201, description = "Package created", body = PackageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    )
)]
pub async fn create_package(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(request): ValidatedJson<PackageRequest>,
) -> Result<(StatusCode, Json<PackageResponse>), ApplicationError> {
    let package = app_state.package_service.create(&request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageResponse {
            message: Some("Package created successfully".to_string()),
            package,
        }),
    ))
}

/// Replace every editable field of a package
#[utoipa::path(
    put,
    path = "/api/packages/{id}",
    tag = "packages",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Package ID")),
    request_body = PackageRequest,
    responses(
        (status = 200, description = "Package updated", body = PackageResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
pub async fn update_package(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<PackageRequest>,
) -> Result<Json<PackageResponse>, ApplicationError> {
    let package = app_state
        .package_service
        .update(id, &request.into())
        .await?;

    Ok(Json(PackageResponse {
        message: Some("Package updated successfully".to_string()),
        package,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/packages/{id}",
    tag = "packages",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package deleted", body = MessageResponse),
        (status = 400, description = "Package has bookings", body = ErrorResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
pub async fn delete_package(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    app_state.package_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Package deleted successfully")))
}
