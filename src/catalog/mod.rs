//! Client for the remote vendor catalog and order service.

mod types;

pub use types::{
    CatalogProduct, OrderItemPayload, OrderReceipt, OrderRequest, TrackedOrder, Vendor,
    VendorCatalog,
};

use std::{future::Future, time::Duration};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::BuyerProfile;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Lookup by buyer phone, order id, or both.
#[derive(Debug, Clone, Default)]
pub struct TrackQuery {
    pub phone: Option<String>,
    pub order_id: Option<String>,
}

/// Operations the storefront needs from the order service.
pub trait CatalogApi: Send + Sync {
    fn vendor_catalog(
        &self,
        vendor_id: &str,
    ) -> impl Future<Output = Result<VendorCatalog, CatalogError>> + Send;

    fn product(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<CatalogProduct, CatalogError>> + Send;

    fn search_products(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<CatalogProduct>, CatalogError>> + Send;

    fn create_order(
        &self,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<OrderReceipt, CatalogError>> + Send;

    fn track_orders(
        &self,
        query: &TrackQuery,
    ) -> impl Future<Output = Result<Vec<TrackedOrder>, CatalogError>> + Send;

    fn buyer_profile(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<BuyerProfile, CatalogError>> + Send;
}

#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, CatalogError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

impl CatalogApi for CatalogClient {
    async fn vendor_catalog(&self, vendor_id: &str) -> Result<VendorCatalog, CatalogError> {
        let url = self.url(&format!("/vendors/{}", urlencoding::encode(vendor_id)));
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, &format!("vendor {vendor_id}")).await
    }

    async fn product(&self, product_id: &str) -> Result<CatalogProduct, CatalogError> {
        let url = self.url(&format!("/products/{}", urlencoding::encode(product_id)));
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, &format!("product {product_id}")).await
    }

    async fn search_products(&self, query: &str) -> Result<Vec<CatalogProduct>, CatalogError> {
        let url = self.url(&format!("/products?search={}", urlencoding::encode(query)));
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, "products").await
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, CatalogError> {
        let response = self
            .client
            .post(self.url("/orders"))
            .json(order)
            .send()
            .await?;
        Self::read_json(response, "orders").await
    }

    async fn track_orders(&self, query: &TrackQuery) -> Result<Vec<TrackedOrder>, CatalogError> {
        let mut params = Vec::new();
        if let Some(phone) = query.phone.as_deref() {
            params.push(format!("phone={}", urlencoding::encode(phone)));
        }
        if let Some(order_id) = query.order_id.as_deref() {
            params.push(format!("orderId={}", urlencoding::encode(order_id)));
        }
        let url = self.url(&format!("/orders/track?{}", params.join("&")));
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, "orders").await
    }

    async fn buyer_profile(&self, token: &str) -> Result<BuyerProfile, CatalogError> {
        let response = self
            .client
            .get(self.url("/buyers/me"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::read_json(response, "buyer profile").await
    }
}
