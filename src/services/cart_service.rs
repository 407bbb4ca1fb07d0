use crate::{
    cart::Cart,
    composer::{MessageTemplate, build_contact_link, compose_cart_message},
    dto::{
        cart::{AddToCartRequest, CartView, SetQuantityRequest},
        contact::{CartContactRequest, ContactLink},
    },
    error::{AppError, AppResult, CartError},
    models::VendorRef,
    repository::CartRepository,
    response::{ApiResponse, Meta},
    store::KeyValueStore,
};

fn cart_response(message: &str, cart: &Cart) -> ApiResponse<CartView> {
    ApiResponse::success(message, CartView::from(cart), Some(Meta::cart(cart)))
}

pub fn get_cart(store: &dyn KeyValueStore) -> AppResult<ApiResponse<CartView>> {
    let cart = CartRepository::new(store).load();
    Ok(cart_response("OK", &cart))
}

pub fn add_to_cart(
    store: &dyn KeyValueStore,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let AddToCartRequest {
        product,
        vendor,
        increment_by,
    } = payload;
    let product_id = product.id.clone();
    let (cart, quantity) = CartRepository::new(store)
        .update(|cart| cart.add(product, vendor, increment_by).map_err(AppError::from))?;

    tracing::debug!(product_id = %product_id, quantity, "cart line added");
    Ok(cart_response("Added to cart", &cart))
}

pub fn set_quantity(
    store: &dyn KeyValueStore,
    product_id: &str,
    payload: SetQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let (cart, ()) = CartRepository::new(store).update(|cart| {
        cart.set_quantity(product_id, payload.quantity)
            .map_err(AppError::from)
    })?;

    tracing::debug!(product_id = %product_id, quantity = payload.quantity, "cart quantity set");
    Ok(cart_response("Cart updated", &cart))
}

pub fn remove_from_cart(
    store: &dyn KeyValueStore,
    product_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let (cart, removed) =
        CartRepository::new(store).update(|cart| Ok::<_, AppError>(cart.remove(product_id)))?;

    tracing::debug!(product_id = %product_id, removed, "cart line removed");
    Ok(cart_response("Removed from cart", &cart))
}

pub fn clear_cart(store: &dyn KeyValueStore) -> AppResult<ApiResponse<CartView>> {
    CartRepository::new(store).clear()?;
    Ok(cart_response("Cart cleared", &Cart::new()))
}

/// Picks the vendor a cart message goes to: the requested one, or the only
/// vendor present in the cart.
fn resolve_vendor(cart: &Cart, vendor_id: Option<&str>) -> AppResult<(VendorRef, Cart)> {
    let groups = cart.vendor_groups();
    let mut vendors = groups
        .into_iter()
        .filter_map(|group| group.vendor.map(|vendor| (vendor, group.cart)));

    match vendor_id {
        Some(id) => vendors
            .find(|(vendor, _)| vendor.id == id)
            .ok_or_else(|| AppError::BadRequest(format!("no cart items from vendor {id}"))),
        None => {
            let first = vendors.next().ok_or(CartError::MissingVendorContact)?;
            if vendors.next().is_some() {
                return Err(AppError::BadRequest(
                    "cart holds items from several vendors, vendor_id is required".into(),
                ));
            }
            Ok(first)
        }
    }
}

pub fn cart_contact_link(
    store: &dyn KeyValueStore,
    payload: CartContactRequest,
) -> AppResult<ApiResponse<ContactLink>> {
    let cart = CartRepository::new(store).load();
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let (vendor, vendor_cart) = resolve_vendor(&cart, payload.vendor_id.as_deref())?;
    let message = compose_cart_message(&vendor_cart, &vendor);
    let url = build_contact_link(&vendor, &message)?;

    Ok(ApiResponse::success(
        "OK",
        ContactLink {
            template: MessageTemplate::CartCheckout,
            vendor_id: vendor.id,
            business_name: vendor.business_name,
            message,
            url,
        },
        Some(Meta::cart(&vendor_cart)),
    ))
}
