//! Route definitions and server setup

use axum::{
    Router,
    extract::{DefaultBodyLimit, OriginalUri},
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, patch, post, put},
};
use serde_json::json;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, ServerConfig};
use crate::domain::{
    Booking, BookingContact, BookingDetails, BookingStatus, Dashboard, DashboardTotals, Package,
    PackageDetails, PopularPackage, Review, ReviewDetails, Role, StatusCount, User,
    UserBookingStats, UserSummary,
};
use crate::presentation::{
    controllers::{AppState, admin, auth, bookings, contact, health, packages, reviews},
    middleware::logging_middleware,
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::auth::register,
        crate::presentation::controllers::auth::login,
        crate::presentation::controllers::auth::get_profile,
        crate::presentation::controllers::auth::update_profile,
        crate::presentation::controllers::auth::change_password,
        crate::presentation::controllers::auth::logout,
        crate::presentation::controllers::packages::list_packages,
        crate::presentation::controllers::packages::get_package,
        crate::presentation::controllers::packages::popular_packages,
        crate::presentation::controllers::packages::packages_by_destination,
        crate::presentation::controllers::packages::create_package,
        crate::presentation::controllers::packages::update_package,
        crate::presentation::controllers::packages::delete_package,
        crate::presentation::controllers::bookings::create_booking,
        crate::presentation::controllers::bookings::my_bookings,
        crate::presentation::controllers::bookings::get_booking,
        crate::presentation::controllers::bookings::update_booking_status,
        crate::presentation::controllers::bookings::cancel_booking,
        crate::presentation::controllers::bookings::booking_stats,
        crate::presentation::controllers::reviews::create_review,
        crate::presentation::controllers::reviews::package_reviews,
        crate::presentation::controllers::reviews::my_reviews,
        crate::presentation::controllers::reviews::recent_reviews,
        crate::presentation::controllers::reviews::update_review,
        crate::presentation::controllers::reviews::delete_review,
        crate::presentation::controllers::admin::list_users,
        crate::presentation::controllers::admin::update_user_role,
        crate::presentation::controllers::admin::delete_user,
        crate::presentation::controllers::admin::list_all_bookings,
        crate::presentation::controllers::admin::admin_update_booking_status,
        crate::presentation::controllers::admin::admin_delete_booking,
        crate::presentation::controllers::admin::dashboard,
        crate::presentation::controllers::contact::submit_contact,
        crate::presentation::controllers::contact::create_booking_contact,
        crate::presentation::controllers::contact::list_booking_contacts,
        crate::presentation::controllers::contact::update_booking_contact_status,
        crate::presentation::controllers::contact::delete_booking_contact,
        crate::presentation::controllers::health::health_check,
        crate::presentation::controllers::health::readiness_probe,
        crate::presentation::controllers::health::api_info
    ),
    components(
        schemas(
            User,
            UserSummary,
            Role,
            Package,
            PopularPackage,
            PackageDetails,
            Booking,
            BookingDetails,
            BookingStatus,
            UserBookingStats,
            Review,
            ReviewDetails,
            BookingContact,
            Dashboard,
            DashboardTotals,
            StatusCount,
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            ChangePasswordRequest,
            PackageRequest,
            CreateBookingRequest,
            StatusUpdateRequest,
            BookingContactRequest,
            CreateReviewRequest,
            UpdateReviewRequest,
            RoleUpdateRequest,
            ContactRequest,
            AuthResponse,
            UserResponse,
            MessageResponse,
            PackageResponse,
            PackageDetailsResponse,
            BookingResponse,
            BookingStatsResponse,
            BookingContactResponse,
            ReviewResponse,
            PackageReviewsResponse,
            ContactResponse,
            PaginationDto,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and profile"),
        (name = "packages", description = "Travel package catalogue"),
        (name = "bookings", description = "Customer bookings"),
        (name = "reviews", description = "Package reviews and ratings"),
        (name = "admin", description = "Admin console"),
        (name = "contact", description = "Contact form and booking leads"),
        (name = "health", description = "Liveness, readiness and API info")
    ),
    info(
        title = "Wavv Travel API",
        version = "1.0.0",
        description = "Travel booking backend: browse packages, book trips, review completed bookings and run the admin console.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    )
)]
pub struct ApiDoc;

/// Registers the bearer token scheme referenced by protected operations
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Create the application router with its middleware stack
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let server = &config.server;
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::get_profile).put(auth::update_profile))
        .route("/change-password", put(auth::change_password))
        .route("/logout", post(auth::logout));

    let package_routes = Router::new()
        .route(
            "/",
            get(packages::list_packages).post(packages::create_package),
        )
        .route("/popular/{limit}", get(packages::popular_packages))
        .route(
            "/by-destination/{destination}",
            get(packages::packages_by_destination),
        )
        .route(
            "/{id}",
            get(packages::get_package)
                .put(packages::update_package)
                .delete(packages::delete_package),
        );

    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/my-bookings", get(bookings::my_bookings))
        .route("/stats/user", get(bookings::booking_stats))
        .route("/contacts", post(contact::create_booking_contact))
        .route("/contacts/all", get(contact::list_booking_contacts))
        .route(
            "/contacts/{id}/status",
            patch(contact::update_booking_contact_status),
        )
        .route(
            "/contacts/{id}",
            delete(contact::delete_booking_contact),
        )
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/status", patch(bookings::update_booking_status))
        .route("/{id}/cancel", post(bookings::cancel_booking));

    let review_routes = Router::new()
        .route("/", post(reviews::create_review))
        .route("/package/{package_id}", get(reviews::package_reviews))
        .route("/my-reviews", get(reviews::my_reviews))
        .route("/recent/{limit}", get(reviews::recent_reviews))
        .route(
            "/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        );

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", patch(admin::update_user_role))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/bookings", get(admin::list_all_bookings))
        .route(
            "/bookings/{id}/status",
            patch(admin::admin_update_booking_status),
        )
        .route(
            "/bookings/{id}",
            delete(admin::admin_delete_booking),
        )
        .route("/dashboard", get(admin::dashboard));

    let api_routes = Router::new()
        .route("/", get(health::api_info))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_probe))
        .route("/contact", post(contact::submit_contact))
        .nest("/auth", auth_routes)
        .nest("/packages", package_routes)
        .nest("/bookings", booking_routes)
        .nest("/reviews", review_routes)
        .nest("/admin", admin_routes);

    let mut router = Router::new().nest("/api", api_routes);

    if server.enable_docs {
        router = router
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(
            ServiceBuilder::new()
                // HTTP tracing
                .layer(TraceLayer::new_for_http())
                // CORS handling
                .layer(cors_layer(server))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_seconds,
                )))
                .layer(middleware::from_fn(logging_middleware)),
        )
        .with_state(app_state)
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "message": format!("Cannot find {} on this server", uri.path()),
        })),
    )
        .into_response()
}
