use crate::{
    composer::{MessageTemplate, build_contact_link, compose_product_inquiry},
    dto::contact::{ContactLink, InquiryRequest},
    error::{AppResult, CartError},
    response::{ApiResponse, Meta},
};

pub fn product_inquiry(payload: InquiryRequest) -> AppResult<ApiResponse<ContactLink>> {
    let product = payload.product;
    let vendor = product
        .vendor
        .clone()
        .ok_or(CartError::MissingVendorContact)?;

    let message = compose_product_inquiry(&product);
    let url = build_contact_link(&vendor, &message)?;

    tracing::debug!(product_id = %product.id, vendor_id = %vendor.id, "product inquiry composed");
    Ok(ApiResponse::success(
        "OK",
        ContactLink {
            template: MessageTemplate::ProductInquiry,
            vendor_id: vendor.id,
            business_name: vendor.business_name,
            message,
            url,
        },
        Some(Meta::empty()),
    ))
}
