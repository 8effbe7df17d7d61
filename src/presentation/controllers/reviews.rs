//! Review endpoints

use axum::{extract::State, http::StatusCode, response::Json};

use crate::application::errors::ApplicationError;
use crate::domain::{PageRequest, ReviewChanges, ReviewDetails};
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::presentation::middleware::AuthUser;
use crate::presentation::models::{
    CreateReviewRequest, ErrorResponse, ListResponse, MessageResponse, PackageReviewsResponse,
    PaginatedResponse, PaginationDto, PaginationQuery, ReviewResponse, UpdateReviewRequest,
};

/// Only customers holding a confirmed booking for the package may review it, once
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    security(("bearer" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid input or already reviewed", body = ErrorResponse),
        (status = 403, description = "No confirmed booking for this package", body = ErrorResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApplicationError> {
    let review = app_state
        .review_service
        .create(
            &user,
            request.package_id,
            request.rating,
            Some(request.comment.as_str()),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            message: Some("Review created successfully".to_string()),
            review,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reviews/package/{package_id}",
    tag = "reviews",
    params(
        ("package_id" = i64, Path, description = "Package ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Reviews with the package's average", body = PackageReviewsResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
pub async fn package_reviews(
    State(app_state): State<AppState>,
    ApiPath(package_id): ApiPath<i64>,
    ValidatedQuery(query): ValidatedQuery<PaginationQuery>,
) -> Result<Json<PackageReviewsResponse>, ApplicationError> {
    let page = PageRequest::new(query.page, query.limit)?;
    let result = app_state
        .review_service
        .for_package(package_id, page)
        .await?;

    let pagination = PaginationDto::from(&result.reviews);
    Ok(Json(PackageReviewsResponse {
        items: result.reviews.items,
        average_rating: (result.summary.rating * 10.0).round() / 10.0,
        total_reviews: result.summary.total_reviews,
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/reviews/my-reviews",
    tag = "reviews",
    security(("bearer" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Caller's reviews", body = PaginatedResponse<ReviewDetails>)
    )
)]
pub async fn my_reviews(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedQuery(query): ValidatedQuery<PaginationQuery>,
) -> Result<Json<PaginatedResponse<ReviewDetails>>, ApplicationError> {
    let page = PageRequest::new(query.page, query.limit)?;
    let reviews = app_state.review_service.for_user(user.id, page).await?;
    Ok(Json(reviews.into()))
}

#[utoipa::path(
    get,
    path = "/api/reviews/recent/{limit}",
    tag = "reviews",
    params(("limit" = i64, Path, description = "How many reviews to return (1-100)")),
    responses(
        (status = 200, description = "Latest reviews across all packages", body = ListResponse<ReviewDetails>),
        (status = 400, description = "Limit out of range", body = ErrorResponse)
    )
)]
pub async fn recent_reviews(
    State(app_state): State<AppState>,
    ApiPath(limit): ApiPath<i64>,
) -> Result<Json<ListResponse<ReviewDetails>>, ApplicationError> {
    let reviews = app_state.review_service.recent(limit).await?;
    Ok(Json(reviews.into()))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "reviews",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "No fields to update", body = ErrorResponse),
        (status = 404, description = "Review not found for this user", body = ErrorResponse)
    )
)]
pub async fn update_review(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, ApplicationError> {
    let changes = ReviewChanges {
        rating: request.rating,
        comment: request.comment,
    };
    let review = app_state
        .review_service
        .update(user.id, id, &changes)
        .await?;

    Ok(Json(ReviewResponse {
        message: Some("Review updated successfully".to_string()),
        review,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "reviews",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 404, description = "Review not found for this user", body = ErrorResponse)
    )
)]
pub async fn delete_review(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    app_state.review_service.delete(user.id, id).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
