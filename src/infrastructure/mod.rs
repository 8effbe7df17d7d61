//! Infrastructure Layer - External concerns and implementations
//!
//! This module handles the relational store, password hashing and tokens.

pub mod auth;
pub mod database;
pub mod repositories;
pub mod seed;

pub use auth::{Claims, PasswordHasher, TokenService};
pub use database::Database;
pub use repositories::*;
