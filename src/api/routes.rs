use crate::auth::jwt::AuthService;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/api/register", post(crate::api::handlers::auth::register))
        .route("/api/login", post(crate::api::handlers::auth::login))
        .route("/api/health", get(crate::api::handlers::health));

    let protected_routes = Router::new()
        // Protected routes (bearer token required)
        .route(
            "/groceries",
            get(crate::api::handlers::groceries::list_groceries)
                .post(crate::api::handlers::groceries::add_grocery)
                .delete(crate::api::handlers::groceries::delete_grocery),
        )
        .route(
            "/groceries/sharegrocerylist",
            post(crate::api::handlers::groceries::share_grocery_list),
        )
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::auth_middleware(auth_service.clone(), req, next)
        }));

    public_routes.merge(protected_routes)
}
