use axum::{Json, Router, routing::post};

use crate::{
    dto::contact::{ContactLink, InquiryRequest},
    error::AppResult,
    response::ApiResponse,
    services::inquiry_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(product_inquiry))
}

#[utoipa::path(
    post,
    path = "/api/inquiry",
    request_body = InquiryRequest,
    responses(
        (status = 200, description = "Inquiry message and wa.me link", body = ApiResponse<ContactLink>),
        (status = 422, description = "Vendor has no usable phone number"),
    ),
    tag = "Contact"
)]
pub async fn product_inquiry(
    Json(payload): Json<InquiryRequest>,
) -> AppResult<Json<ApiResponse<ContactLink>>> {
    Ok(Json(inquiry_service::product_inquiry(payload)?))
}
