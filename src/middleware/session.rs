use axum::{extract::FromRequestParts, http::header};

use crate::error::AppError;

pub const BUYER_ID_HEADER: &str = "x-buyer-id";

/// Who is shopping. The bearer token (or the anonymous `X-Buyer-Id`) is
/// trusted as-is and only used to pick the buyer's storage namespace.
#[derive(Debug, Clone)]
pub struct BuyerSession {
    pub buyer_key: String,
    pub token: Option<String>,
}

impl BuyerSession {
    pub fn anonymous(buyer_id: &str) -> Self {
        Self {
            buyer_key: format!("guest-{buyer_id}"),
            token: None,
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            buyer_key: format!("token-{token}"),
            token: Some(token.to_string()),
        }
    }
}

fn valid_key(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 512
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '+' | '/' | '='))
}

impl<S> FromRequestParts<S> for BuyerSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;
            let token = auth_str
                .strip_prefix("Bearer ")
                .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?
                .trim();
            if !valid_key(token) {
                return Err(AppError::BadRequest("Invalid bearer token".into()));
            }
            return Ok(BuyerSession::with_token(token));
        }

        let buyer_id = parts
            .headers
            .get(BUYER_ID_HEADER)
            .ok_or_else(|| {
                AppError::BadRequest("Missing Authorization or X-Buyer-Id header".into())
            })?
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid X-Buyer-Id header".into()))?
            .trim();
        if !valid_key(buyer_id) {
            return Err(AppError::BadRequest("Invalid X-Buyer-Id header".into()));
        }
        Ok(BuyerSession::anonymous(buyer_id))
    }
}
