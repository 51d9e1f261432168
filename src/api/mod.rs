//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for basket, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/api`)
//! - `POST /api/register` - Register new user
//! - `POST /api/login` - Login and receive a JWT token
//!
//! ## Groceries (`/groceries`)
//! - `GET /groceries` - Own items plus items shared with the caller
//! - `POST /groceries` - Add an item, propagating copies to shared users
//! - `DELETE /groceries?name=` - Delete an item and its shared copies
//! - `POST /groceries/sharegrocerylist` - Share the whole list with named users
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint
//!
//! # Authentication
//!
//! All `/groceries` endpoints require a valid JWT token in the
//! `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```

/// Request handlers.
pub mod handlers;
/// Route definitions.
pub mod routes;

use utoipa::OpenApi;

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::groceries::list_groceries,
        handlers::groceries::add_grocery,
        handlers::groceries::delete_grocery,
        handlers::groceries::share_grocery_list,
    ),
    components(schemas(
        crate::types::RegisterRequest,
        crate::types::LoginRequest,
        crate::types::LoginResponse,
        crate::types::MessageResponse,
        crate::types::NewGroceryItem,
        crate::types::GroceryItem,
        crate::types::ShareRequest,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "groceries", description = "Grocery list CRUD and sharing")
    )
)]
pub struct ApiDoc;
