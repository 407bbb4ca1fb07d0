use crate::{
    cart::Cart,
    catalog::{CatalogApi, OrderItemPayload, OrderRequest, TrackQuery},
    composer::{build_contact_link, compose_order_follow_up},
    dto::orders::{CheckoutRequest, CheckoutResponse, OrderList, VendorHandOff},
    error::{AppError, AppResult},
    models::BuyerProfile,
    repository::{CartRepository, ProfileRepository},
    response::{ApiResponse, Meta},
    store::{KeyValueStore, StoreError},
};

fn pick(value: Option<String>, cached: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or(cached)
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

pub fn build_order_request(
    cart: &Cart,
    buyer: &BuyerProfile,
    notes: Option<String>,
) -> AppResult<OrderRequest> {
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let items = cart
        .lines()
        .iter()
        .map(|line| OrderItemPayload {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            price: line.product.price,
            quantity: line.quantity,
            vendor_id: line.product.vendor.as_ref().map(|vendor| vendor.id.clone()),
        })
        .collect();

    Ok(OrderRequest {
        items,
        total: cart.total(),
        buyer_name: required(buyer.name.clone(), "buyer_name")?,
        buyer_phone: required(buyer.phone.clone(), "buyer_phone")?,
        delivery_address: required(buyer.address.clone(), "delivery_address")?,
        notes: notes.filter(|n| !n.trim().is_empty()),
    })
}

fn hand_offs(order_id: &str, cart: &Cart, buyer: &BuyerProfile) -> Vec<VendorHandOff> {
    cart.vendor_groups()
        .into_iter()
        .filter_map(|group| group.vendor.map(|vendor| (vendor, group.cart)))
        .map(|(vendor, vendor_cart)| {
            let message = compose_order_follow_up(order_id, &vendor_cart, &vendor, buyer);
            let (url, error) = match build_contact_link(&vendor, &message) {
                Ok(url) => (Some(url), None),
                Err(err) => (None, Some(err.to_string())),
            };
            VendorHandOff {
                vendor_id: vendor.id,
                business_name: vendor.business_name,
                url,
                error,
            }
        })
        .collect()
}

/// Submits the cart as an order. The ordered units only leave the cart once
/// the order service accepted it.
pub async fn checkout<C: CatalogApi>(
    store: &dyn KeyValueStore,
    catalog: &C,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutResponse>> {
    let carts = CartRepository::new(store);
    let profiles = ProfileRepository::new(store);

    let cart = carts.load();
    let cached = profiles.load();
    let buyer = BuyerProfile {
        name: pick(payload.buyer_name, cached.name.clone()),
        phone: pick(payload.buyer_phone, cached.phone.clone()),
        address: pick(payload.delivery_address, cached.address.clone()),
        email: cached.email.clone(),
    };

    let order = build_order_request(&cart, &buyer, payload.notes)?;
    let receipt = catalog.create_order(&order).await?;
    tracing::info!(order_id = %receipt.id, total = order.total, lines = cart.len(), "order submitted");

    // The order exists remotely at this point; failing the request now
    // would invite a duplicate submission. Only the submitted units leave
    // the cart, anything added meanwhile stays.
    let deducted = carts.update(|latest| {
        for item in &order.items {
            latest.deduct(&item.product_id, item.quantity);
        }
        Ok::<_, StoreError>(latest.len())
    });
    match deducted {
        Ok((_, remaining)) if remaining > 0 => {
            tracing::debug!(order_id = %receipt.id, remaining, "lines added during checkout kept")
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(error = %err, order_id = %receipt.id, "cart update failed after checkout")
        }
    }
    if payload.save_profile && buyer != cached {
        if let Err(err) = profiles.save(&buyer) {
            tracing::warn!(error = %err, "profile save failed after checkout");
        }
    }

    let hand_offs = hand_offs(&receipt.id, &cart, &buyer);
    Ok(ApiResponse::success(
        "Checkout success",
        CheckoutResponse {
            total: order.total,
            order: receipt,
            hand_offs,
        },
        Some(Meta::empty()),
    ))
}

pub async fn track_orders<C: CatalogApi>(
    catalog: &C,
    query: TrackQuery,
) -> AppResult<ApiResponse<OrderList>> {
    if query.phone.is_none() && query.order_id.is_none() {
        return Err(AppError::BadRequest("phone or order_id is required".into()));
    }
    let items = catalog.track_orders(&query).await?;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}
