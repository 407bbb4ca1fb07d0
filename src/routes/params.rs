use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::TrackQuery;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackOrdersQuery {
    pub phone: Option<String>,
    pub order_id: Option<String>,
}

impl From<TrackOrdersQuery> for TrackQuery {
    fn from(query: TrackOrdersQuery) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        TrackQuery {
            phone: clean(query.phone),
            order_id: clean(query.order_id),
        }
    }
}
