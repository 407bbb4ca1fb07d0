use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{composer::MessageTemplate, models::ProductSnapshot};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CartContactRequest {
    /// Needed when the cart holds products from more than one vendor.
    pub vendor_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InquiryRequest {
    pub product: ProductSnapshot,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactLink {
    pub template: MessageTemplate,
    pub vendor_id: String,
    pub business_name: String,
    pub message: String,
    pub url: String,
}
