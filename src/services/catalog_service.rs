use crate::{
    catalog::{CatalogApi, CatalogProduct, VendorCatalog},
    dto::catalog::ProductList,
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

// These only read from the order service; a failure here never touches the
// buyer's stored cart.

pub async fn vendor_catalog<C: CatalogApi>(
    catalog: &C,
    vendor_id: &str,
) -> AppResult<ApiResponse<VendorCatalog>> {
    let data = catalog.vendor_catalog(vendor_id).await?;
    let meta = Meta::count(data.products.len());
    Ok(ApiResponse::success("OK", data, Some(meta)))
}

pub async fn get_product<C: CatalogApi>(
    catalog: &C,
    product_id: &str,
) -> AppResult<ApiResponse<CatalogProduct>> {
    let product = catalog.product(product_id).await?;
    Ok(ApiResponse::success("OK", product, Some(Meta::empty())))
}

pub async fn search_products<C: CatalogApi>(
    catalog: &C,
    query: Option<&str>,
) -> AppResult<ApiResponse<ProductList>> {
    let query = query.map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::BadRequest("q is required".into()));
    }
    let items = catalog.search_products(query).await?;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("OK", ProductList { items }, Some(meta)))
}
