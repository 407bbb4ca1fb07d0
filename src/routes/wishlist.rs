use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::{
    dto::wishlist::{AddWishlistRequest, MoveToCartResponse, WishlistView},
    error::AppResult,
    middleware::session::BuyerSession,
    response::ApiResponse,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_to_wishlist).delete(clear_wishlist))
        .route("/toggle", post(toggle_wishlist))
        .route("/{product_id}", delete(remove_from_wishlist))
        .route("/{product_id}/move-to-cart", post(move_to_cart))
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Saved products", body = ApiResponse<WishlistView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    session: BuyerSession,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let store = state.store_for(&session);
    Ok(Json(wishlist_service::list_wishlist(&store)?))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = AddWishlistRequest,
    responses(
        (status = 200, description = "Product saved", body = ApiResponse<WishlistView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    session: BuyerSession,
    Json(payload): Json<AddWishlistRequest>,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let store = state.store_for(&session);
    Ok(Json(wishlist_service::add_to_wishlist(&store, payload)?))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/toggle",
    request_body = AddWishlistRequest,
    responses(
        (status = 200, description = "Product saved, or forgotten if it was already saved", body = ApiResponse<WishlistView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    session: BuyerSession,
    Json(payload): Json<AddWishlistRequest>,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let store = state.store_for(&session);
    Ok(Json(wishlist_service::toggle_wishlist(&store, payload)?))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Removed from wishlist", body = ApiResponse<WishlistView>),
        (status = 404, description = "Product not in wishlist")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let store = state.store_for(&session);
    Ok(Json(wishlist_service::remove_from_wishlist(&store, &product_id)?))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Wishlist emptied", body = ApiResponse<WishlistView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn clear_wishlist(
    State(state): State<AppState>,
    session: BuyerSession,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let store = state.store_for(&session);
    Ok(Json(wishlist_service::clear_wishlist(&store)?))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/{product_id}/move-to-cart",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "One unit added to the cart and removed from the wishlist", body = ApiResponse<MoveToCartResponse>),
        (status = 404, description = "Product not in wishlist")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn move_to_cart(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<MoveToCartResponse>>> {
    let store = state.store_for(&session);
    Ok(Json(wishlist_service::move_to_cart(&store, &product_id)?))
}
