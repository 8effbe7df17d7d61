//! Domain Layer - Core business logic and entities
//!
//! This module contains the travel-booking entities, value objects, and the
//! pricing, status and access rules that apply to them.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use services::*;
pub use value_objects::*;
