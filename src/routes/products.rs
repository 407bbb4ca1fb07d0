use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    catalog::CatalogProduct,
    dto::catalog::ProductList,
    error::AppResult,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("q" = String, Query, description = "Search text")
    ),
    responses(
        (status = 200, description = "Products matching the search", body = ApiResponse<ProductList>),
        (status = 502, description = "Catalog service unavailable")
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::search_products(&state.catalog, query.q.as_deref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<CatalogProduct>),
        (status = 404, description = "Not Found")
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CatalogProduct>>> {
    let resp = catalog_service::get_product(&state.catalog, &id).await?;
    Ok(Json(resp))
}
