use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ProductSnapshot, VendorRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub business_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Vendor {
    pub fn to_ref(&self) -> VendorRef {
        VendorRef {
            id: self.id.clone(),
            business_name: self.business_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vendor: Option<Vendor>,
}

impl CatalogProduct {
    /// Freezes the product for a cart line or wishlist entry. The product's
    /// own vendor wins over the fallback passed by a catalog page.
    pub fn snapshot(&self, fallback_vendor: Option<&Vendor>) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            original_price: self.original_price,
            vendor: self.vendor.as_ref().or(fallback_vendor).map(Vendor::to_ref),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VendorCatalog {
    pub vendor: Vendor,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

/// Body of `POST /orders` on the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderItemPayload>,
    pub total: u64,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub delivery_address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<OrderItemPayload>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
