use crate::{
    auth::middleware::AuthUser,
    types::{AppError, GroceryItem, MessageResponse, NewGroceryItem, Result, ShareRequest},
    AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    name: Option<String>,
}

/// List the caller's groceries, own and shared with them
#[utoipa::path(
    get,
    path = "/groceries",
    responses(
        (status = 200, description = "Own items plus items shared with the caller", body = [GroceryItem]),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Storage failure")
    ),
    tag = "groceries"
)]
pub async fn list_groceries(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<GroceryItem>>> {
    // An empty combined list is a successful, empty response.
    let items = state.groceries.list(&claims.sub)?;

    Ok(Json(items))
}

/// Add a grocery item, propagating copies to the users it is shared with
#[utoipa::path(
    post,
    path = "/groceries",
    request_body = NewGroceryItem,
    responses(
        (status = 200, description = "The stored item, self-share stripped", body = GroceryItem),
        (status = 400, description = "Missing name or duplicate item"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Storage failure")
    ),
    tag = "groceries"
)]
pub async fn add_grocery(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<NewGroceryItem>,
) -> Result<Json<GroceryItem>> {
    if payload.name.is_empty() {
        return Err(AppError::InvalidInput(
            "Grocery item name is required".to_string(),
        ));
    }

    let item = GroceryItem {
        name: payload.name,
        price: payload.price,
        supermarket: payload.supermarket,
        owner: claims.sub.clone(),
        shared_with: payload.shared_with,
    };

    let item = state.groceries.add(item)?;

    tracing::info!(user = %claims.sub, item = %item.name, "grocery added");

    Ok(Json(item))
}

/// Delete a grocery item by name, removing shared copies as well
#[utoipa::path(
    delete,
    path = "/groceries",
    params(
        ("name" = String, Query, description = "Name of the item to delete (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 400, description = "Missing name parameter"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No grocery file or no matching item"),
        (status = 500, description = "Storage failure")
    ),
    tag = "groceries"
)]
pub async fn delete_grocery(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(params): Query<DeleteParams>,
) -> Result<Json<MessageResponse>> {
    let name = params.name.unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Grocery name is required".to_string()));
    }

    let removed = state.groceries.delete(&claims.sub, &name)?;

    tracing::info!(user = %claims.sub, item = %removed.name, "grocery deleted");

    Ok(Json(MessageResponse {
        message: format!("Grocery item '{}' deleted successfully", name),
    }))
}

/// Share the caller's entire grocery list with the given users
#[utoipa::path(
    post,
    path = "/groceries/sharegrocerylist",
    request_body = ShareRequest,
    responses(
        (status = 200, description = "List shared", body = MessageResponse),
        (status = 400, description = "No usernames given"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Caller has no grocery file"),
        (status = 500, description = "Storage failure")
    ),
    tag = "groceries"
)]
pub async fn share_grocery_list(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ShareRequest>,
) -> Result<Json<MessageResponse>> {
    if payload.usernames.is_empty() {
        return Err(AppError::InvalidInput(
            "Valid usernames are required to share the grocery list".to_string(),
        ));
    }

    state.groceries.share(&claims.sub, &payload.usernames)?;

    tracing::info!(user = %claims.sub, targets = ?payload.usernames, "grocery list shared");

    Ok(Json(MessageResponse {
        message: "Grocery list shared successfully".to_string(),
    }))
}
