//! Presentation Layer - Web API and HTTP handling
//!
//! This module contains the Axum web server setup, controllers, extractors and API models.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod routes;


pub use controllers::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
