//! # basket - grocery-list sharing server
//!
//! A minimal grocery-list sharing web service: user registration and login
//! with salted-hash password storage and JWT issuance, plus per-user
//! grocery CRUD with list sharing between named users, persisted as one
//! JSON file per user on local disk.
//!
//! basket can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `basket-server` binary
//! 2. **As a library** - Mount [`api::routes::create_router`] in your own axum app
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Password hashing, JWT issuance, bearer middleware
//! - [`db`] - JSON file stores (users, per-user grocery lists)
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and startup utilities
//!
//! ## Storage model
//!
//! Everything is whole-file read-modify-write over JSON files in one data
//! directory: `users.json` plus one `<username>_groceries.json` per user.
//! There are no locks and no cross-file transactions; the hazards this
//! implies are documented on the stores in [`db`].

/// HTTP API handlers and routes.
pub mod api;
/// Password hashing, JWT issuance, and bearer middleware.
pub mod auth;
/// JSON file persistence.
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and startup utilities.
pub mod utils;

// Re-export commonly used types
pub use api::routes::create_router;
pub use db::{GroceryStore, UserStore};
pub use types::{AppError, Result};
pub use utils::config::Config;

use crate::auth::jwt::AuthService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable process configuration
    pub config: Arc<Config>,
    /// Registered users (`users.json`)
    pub users: Arc<UserStore>,
    /// Per-user grocery lists and sharing propagation
    pub groceries: Arc<GroceryStore>,
    /// Password hashing and token issue/verify
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Builds the shared state from configuration.
    pub fn from_config(config: Config) -> Self {
        let auth_service = Arc::new(AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_issuer.clone(),
            config.auth.jwt_audience.clone(),
            config.auth.token_expiry,
        ));
        let users = Arc::new(UserStore::new(&config.storage.data_dir));
        let groceries = Arc::new(GroceryStore::new(&config.storage.data_dir));

        Self {
            config: Arc::new(config),
            users,
            groceries,
            auth_service,
        }
    }
}
