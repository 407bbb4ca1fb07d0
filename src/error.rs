use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    catalog::CatalogError,
    response::{ApiResponse, Meta},
    store::StoreError,
};

/// Failures of the cart mutators and the message composer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    #[error("product {0} is not in the cart")]
    LineNotFound(String),

    #[error("This store cannot be contacted on WhatsApp")]
    MissingVendorContact,

    #[error("persisted {0} could not be decoded")]
    MalformedPersistedState(&'static str),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Storage error")]
    Store(#[from] StoreError),

    #[error("Catalog service unavailable")]
    Catalog(#[from] CatalogError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Cart(CartError::InvalidQuantity) => StatusCode::BAD_REQUEST,
            AppError::Cart(CartError::LineNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Cart(CartError::MissingVendorContact) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Cart(CartError::MalformedPersistedState(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Catalog(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            AppError::Cart(CartError::MissingVendorContact) => {
                tracing::info!(error = %self, "vendor hand-off blocked")
            }
            AppError::Cart(err) => tracing::debug!(error = %err, "cart contract violation"),
            AppError::Store(err) => tracing::error!(error = %err, "storage failure"),
            AppError::Catalog(err) => tracing::warn!(error = %err, "catalog request failed"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            _ => {}
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
