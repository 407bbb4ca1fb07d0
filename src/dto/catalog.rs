use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogProduct;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<CatalogProduct>,
}
