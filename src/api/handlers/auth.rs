use crate::{
    types::{
        AppError, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, Result,
        UserRecord,
    },
    AppState,
};
use axum::{extract::State, Json};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing fields or username already taken"),
        (status = 500, description = "Storage failure")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    // Validate input
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }

    // Hash the password before saving
    let password_hash = state.auth_service.hash_password(&payload.password)?;

    state.users.insert(UserRecord {
        username: payload.username.clone(),
        password_hash,
    })?;

    tracing::info!(user = %payload.username, "user registered");

    Ok(Json(MessageResponse {
        message: "Registration successful".to_string(),
    }))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }

    // Unknown usernames and wrong passwords answer identically so that the
    // response does not reveal which usernames exist.
    let user = state
        .users
        .get(&payload.username)?
        .ok_or_else(|| AppError::Auth("Invalid username or password".to_string()))?;

    if !state
        .auth_service
        .verify_password(&payload.password, &user.password_hash)?
    {
        return Err(AppError::Auth("Invalid username or password".to_string()));
    }

    let token = state.auth_service.generate_token(&user.username)?;

    tracing::info!(user = %user.username, "user logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        username: user.username,
        token,
    }))
}
