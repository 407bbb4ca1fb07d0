use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, CheckoutResponse, OrderList},
    error::AppResult,
    middleware::session::BuyerSession,
    response::ApiResponse,
    routes::params::TrackOrdersQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/track", get(track_orders))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order submitted, cart cleared, vendor hand-off links returned", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Empty cart or missing buyer details"),
        (status = 502, description = "Order service failed; cart left untouched"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: BuyerSession,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    let store = state.store_for(&session);
    let resp = order_service::checkout(&store, &state.catalog, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/track",
    params(
        ("phone" = Option<String>, Query, description = "Buyer phone number"),
        ("order_id" = Option<String>, Query, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Matching orders", body = ApiResponse<OrderList>),
        (status = 400, description = "Neither phone nor order_id given"),
    ),
    tag = "Orders"
)]
pub async fn track_orders(
    State(state): State<AppState>,
    Query(query): Query<TrackOrdersQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::track_orders(&state.catalog, query.into()).await?;
    Ok(Json(resp))
}
