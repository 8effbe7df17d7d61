//! Health check controller

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde_json::json;
use std::time::Instant;

use crate::presentation::controllers::AppState;
use crate::presentation::models::HealthResponse;

/// Basic health check endpoint for liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Wavv Travel API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        details: None,
    })
}

/// Readiness probe: the store answers and the schema is in place
#[utoipa::path(
    get,
    path = "/api/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready to accept traffic", body = HealthResponse),
        (status = 503, description = "Service is not ready", body = HealthResponse)
    )
)]
pub async fn readiness_probe(
    State(app_state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let start_time = Instant::now();

    let database = match app_state.database.ping().await {
        Ok(()) => match app_state.database.has_required_tables().await {
            Ok(true) => json!({ "status": "healthy", "message": "Database is operational" }),
            Ok(false) => json!({ "status": "unhealthy", "message": "Schema is missing tables" }),
            Err(e) => json!({ "status": "unhealthy", "message": e.to_string() }),
        },
        Err(e) => json!({ "status": "unhealthy", "message": e.to_string() }),
    };
    let ready = database["status"] == "healthy";

    let response = HealthResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        message: if ready {
            "Wavv Travel API is ready"
        } else {
            "Wavv Travel API is not ready"
        }
        .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        details: Some(json!({
            "database": database,
            "check_duration_ms": start_time.elapsed().as_millis(),
            "build_info": {
                "version": env!("CARGO_PKG_VERSION"),
                "build_date": option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown"),
                "git_sha": option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
            }
        })),
    };

    if ready {
        Ok(Json(response))
    } else {
        tracing::warn!("Readiness check failed");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// API roots
#[utoipa::path(
    get,
    path = "/api",
    tag = "health",
    responses(
        (status = 200, description = "API information")
    )
)]
pub async fn api_info() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Wavv Travel API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "packages": "/api/packages",
            "bookings": "/api/bookings",
            "reviews": "/api/reviews",
            "admin": "/api/admin",
            "contact": "/api/contact",
            "health": "/api/health"
        }
    }))
}
