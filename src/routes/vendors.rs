use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    catalog::VendorCatalog, error::AppResult, response::ApiResponse, services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(vendor_catalog))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    params(
        ("id" = String, Path, description = "Vendor ID")
    ),
    responses(
        (status = 200, description = "Vendor and its products", body = ApiResponse<VendorCatalog>),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Catalog service unavailable")
    ),
    tag = "Vendors"
)]
pub async fn vendor_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<VendorCatalog>>> {
    let resp = catalog_service::vendor_catalog(&state.catalog, &id).await?;
    Ok(Json(resp))
}
