use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Vendor contact data captured alongside a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorRef {
    pub id: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Copy of catalog product data taken when the product was picked.
///
/// Later catalog price changes never reach an existing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorRef>,
}

impl ProductSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            original_price: None,
            vendor: None,
        }
    }

    pub fn with_vendor(mut self, vendor: VendorRef) -> Self {
        self.vendor = Some(vendor);
        self
    }

    /// True when the snapshot carries a higher pre-discount price.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BuyerProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl BuyerProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.address.is_none()
    }
}
