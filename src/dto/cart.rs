use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::{Cart, CartLine},
    composer::format_price,
    models::{ProductSnapshot, VendorRef},
};

fn one() -> i64 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product: ProductSnapshot,
    pub vendor: Option<VendorRef>,
    #[serde(default = "one")]
    pub increment_by: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub total: u64,
    pub total_formatted: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total,
            total_formatted: format_price(total),
        }
    }
}
