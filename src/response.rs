use serde::Serialize;
use utoipa::ToSchema;

use crate::cart::Cart;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub count: Option<u64>,
    pub item_count: Option<u64>,
    pub total_amount: Option<u64>,
}

impl Meta {
    pub fn count(count: usize) -> Self {
        Self {
            count: Some(count as u64),
            item_count: None,
            total_amount: None,
        }
    }

    /// Line count, unit count and derived total for a cart.
    pub fn cart(cart: &Cart) -> Self {
        Self {
            count: Some(cart.len() as u64),
            item_count: Some(cart.item_count()),
            total_amount: Some(cart.total()),
        }
    }

    pub fn empty() -> Self {
        Self {
            count: None,
            item_count: None,
            total_amount: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
