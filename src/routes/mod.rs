use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod doc;
pub mod health;
pub mod inquiry;
pub mod orders;
pub mod params;
pub mod products;
pub mod profile;
pub mod vendors;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart::router())
        .nest("/wishlist", wishlist::router())
        .nest("/inquiry", inquiry::router())
        .nest("/orders", orders::router())
        .nest("/profile", profile::router())
        .nest("/helpers", profile::helpers_router())
        .nest("/products", products::router())
        .nest("/vendors", vendors::router())
}
