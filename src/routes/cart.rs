use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartView, SetQuantityRequest},
        contact::{CartContactRequest, ContactLink},
    },
    error::AppResult,
    middleware::session::BuyerSession,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart).delete(clear_cart))
        .route("/contact-link", get(contact_link))
        .route("/{product_id}", put(set_quantity).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart with derived total", body = ApiResponse<CartView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    session: BuyerSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let store = state.store_for(&session);
    Ok(Json(cart_service::get_cart(&store)?))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add a product or raise its quantity", body = ApiResponse<CartView>),
        (status = 400, description = "Non-positive increment"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: BuyerSession,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let store = state.store_for(&session);
    Ok(Json(cart_service::add_to_cart(&store, payload)?))
}

#[utoipa::path(
    put,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity replaced; zero or less removes the line", body = ApiResponse<CartView>),
        (status = 404, description = "Product not in cart"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(product_id): Path<String>,
    Json(payload): Json<SetQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let store = state.store_for(&session);
    Ok(Json(cart_service::set_quantity(&store, &product_id, payload)?))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Line removed, or already absent", body = ApiResponse<CartView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let store = state.store_for(&session);
    Ok(Json(cart_service::remove_from_cart(&store, &product_id)?))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: BuyerSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let store = state.store_for(&session);
    Ok(Json(cart_service::clear_cart(&store)?))
}

#[utoipa::path(
    get,
    path = "/api/cart/contact-link",
    params(
        ("vendor_id" = Option<String>, Query, description = "Vendor to message when the cart spans several vendors")
    ),
    responses(
        (status = 200, description = "Order request message and wa.me link", body = ApiResponse<ContactLink>),
        (status = 400, description = "Empty cart or ambiguous vendor"),
        (status = 422, description = "Vendor has no usable phone number"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn contact_link(
    State(state): State<AppState>,
    session: BuyerSession,
    Query(query): Query<CartContactRequest>,
) -> AppResult<Json<ApiResponse<ContactLink>>> {
    let store = state.store_for(&session);
    Ok(Json(cart_service::cart_contact_link(&store, query)?))
}
