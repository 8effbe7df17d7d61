//! Wavv Travel - travel booking API
//!
//! Packages, bookings, reviews and an admin console over a relational store,
//! laid out in domain, application, infrastructure and presentation layers.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

use std::sync::Arc;

use application::{
    AdminServiceImpl, AuthServiceImpl, BookingServiceImpl, ContactServiceImpl, PackageServiceImpl,
    ReviewServiceImpl, errors::ApplicationError,
};
use infrastructure::{
    Database, PasswordHasher, SqliteBookingContactRepository, SqliteBookingRepository,
    SqlitePackageRepository, SqliteReviewRepository, SqliteUserRepository, TokenService, seed,
};
use presentation::AppState;

pub use config::Config;
pub use logging::init_tracing;

/// Open the store, apply migrations, seed if configured, and wire every service
pub async fn build_app_state(config: &Config) -> Result<AppState, ApplicationError> {
    let tokens = TokenService::from_config(&config.auth)?;
    let database = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        database.migrate().await?;
    }

    let pool = database.pool().clone();
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let packages = Arc::new(SqlitePackageRepository::new(pool.clone()));
    let bookings = Arc::new(SqliteBookingRepository::new(pool.clone()));
    let reviews = Arc::new(SqliteReviewRepository::new(pool.clone()));
    let contacts = Arc::new(SqliteBookingContactRepository::new(pool));

    let hasher = PasswordHasher::new(config.auth.bcrypt_cost);

    if config.seed.enabled {
        seed::seed(&config.seed, users.as_ref(), packages.as_ref(), &hasher).await?;
    }

    Ok(AppState {
        auth_service: Arc::new(AuthServiceImpl::new(users.clone(), hasher, tokens)),
        package_service: Arc::new(PackageServiceImpl::new(packages.clone(), reviews.clone())),
        booking_service: Arc::new(BookingServiceImpl::new(bookings.clone(), packages.clone())),
        review_service: Arc::new(ReviewServiceImpl::new(
            reviews,
            packages.clone(),
            bookings.clone(),
        )),
        admin_service: Arc::new(AdminServiceImpl::new(
            users,
            packages,
            bookings,
            contacts.clone(),
        )),
        contact_service: Arc::new(ContactServiceImpl::new(contacts)),
        database,
    })
}

/// Fully wired router for `config`
pub async fn create_app(config: Config) -> Result<axum::Router, ApplicationError> {
    let app_state = build_app_state(&config).await?;
    Ok(presentation::create_router(app_state, &config))
}
