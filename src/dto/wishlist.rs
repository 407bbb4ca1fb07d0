use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::cart::CartView, models::ProductSnapshot, wishlist::Wishlist};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddWishlistRequest {
    pub product: ProductSnapshot,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistView {
    pub items: Vec<ProductSnapshot>,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            items: wishlist.items().to_vec(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MoveToCartResponse {
    pub cart: CartView,
    pub wishlist: WishlistView,
}
