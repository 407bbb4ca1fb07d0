use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLine,
    catalog::{CatalogProduct, OrderItemPayload, OrderReceipt, TrackedOrder, Vendor, VendorCatalog},
    composer::MessageTemplate,
    dto::{
        cart::{AddToCartRequest, CartView, SetQuantityRequest},
        catalog::ProductList,
        contact::{CartContactRequest, ContactLink, InquiryRequest},
        orders::{CheckoutRequest, CheckoutResponse, OrderList, VendorHandOff},
        profile::{HelperState, ProfileSource, ProfileView, UpdateProfileRequest},
        wishlist::{AddWishlistRequest, MoveToCartResponse, WishlistView},
    },
    models::{BuyerProfile, ProductSnapshot, VendorRef},
    response::{ApiResponse, Meta},
    routes::{cart, health, inquiry, orders, params, products, profile, vendors, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("opaque")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::cart_list,
        cart::add_to_cart,
        cart::set_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        cart::contact_link,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::toggle_wishlist,
        wishlist::remove_from_wishlist,
        wishlist::clear_wishlist,
        wishlist::move_to_cart,
        inquiry::product_inquiry,
        orders::checkout,
        orders::track_orders,
        profile::get_profile,
        profile::update_profile,
        profile::helper_state,
        profile::mark_helper_seen,
        profile::reset_helper,
        products::search_products,
        products::get_product,
        vendors::vendor_catalog
    ),
    components(
        schemas(
            ProductSnapshot,
            VendorRef,
            BuyerProfile,
            CartLine,
            CartView,
            AddToCartRequest,
            SetQuantityRequest,
            WishlistView,
            AddWishlistRequest,
            MoveToCartResponse,
            MessageTemplate,
            CartContactRequest,
            InquiryRequest,
            ContactLink,
            CheckoutRequest,
            CheckoutResponse,
            VendorHandOff,
            OrderList,
            OrderReceipt,
            OrderItemPayload,
            TrackedOrder,
            Vendor,
            VendorCatalog,
            CatalogProduct,
            ProductList,
            ProfileView,
            ProfileSource,
            UpdateProfileRequest,
            HelperState,
            params::ProductQuery,
            params::TrackOrdersQuery,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<WishlistView>,
            ApiResponse<ContactLink>,
            ApiResponse<CheckoutResponse>,
            ApiResponse<ProfileView>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Contact", description = "WhatsApp hand-off endpoints"),
        (name = "Orders", description = "Checkout and order tracking"),
        (name = "Profile", description = "Buyer profile and helper markers"),
        (name = "Products", description = "Catalog product endpoints"),
        (name = "Vendors", description = "Vendor catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
