//! HTTP controllers for handling requests

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod contact;
pub mod health;
pub mod packages;
pub mod reviews;

use std::sync::Arc;

use crate::application::{
    AdminService, AuthService, BookingService, ContactService, PackageService, ReviewService,
};
use crate::infrastructure::Database;

pub use admin::*;
pub use auth::*;
pub use bookings::*;
pub use contact::*;
pub use health::*;
pub use packages::*;
pub use reviews::*;

/// Application state containing services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub package_service: Arc<dyn PackageService>,
    pub booking_service: Arc<dyn BookingService>,
    pub review_service: Arc<dyn ReviewService>,
    pub admin_service: Arc<dyn AdminService>,
    pub contact_service: Arc<dyn ContactService>,
    pub database: Database,
}
