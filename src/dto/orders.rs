use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{OrderReceipt, TrackedOrder};

/// Fields left out fall back to the cached buyer profile.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub buyer_name: Option<String>,
    pub buyer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub save_profile: bool,
}

/// WhatsApp follow-up for one vendor of a submitted order.
#[derive(Debug, Serialize, ToSchema)]
pub struct VendorHandOff {
    pub vendor_id: String,
    pub business_name: String,
    pub url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub order: OrderReceipt,
    pub total: u64,
    pub hand_offs: Vec<VendorHandOff>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<TrackedOrder>,
}
