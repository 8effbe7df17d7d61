//! SQL repositories, one per aggregate

pub mod bookings;
pub mod contacts;
pub mod packages;
pub mod reviews;
pub mod users;

pub use bookings::{BookingRepository, SqliteBookingRepository};
pub use contacts::{BookingContactRepository, SqliteBookingContactRepository};
pub use packages::{PackageRepository, SqlitePackageRepository};
pub use reviews::{ReviewRepository, SqliteReviewRepository, refresh_package_rating};
pub use users::{SqliteUserRepository, UserRepository};
