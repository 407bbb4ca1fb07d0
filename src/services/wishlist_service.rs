use crate::{
    dto::{
        cart::CartView,
        wishlist::{AddWishlistRequest, MoveToCartResponse, WishlistView},
    },
    error::{AppError, AppResult},
    repository::{CartRepository, WishlistRepository},
    response::{ApiResponse, Meta},
    store::KeyValueStore,
    wishlist::Wishlist,
};

fn wishlist_response(message: &str, wishlist: &Wishlist) -> ApiResponse<WishlistView> {
    ApiResponse::success(
        message,
        WishlistView::from(wishlist),
        Some(Meta::count(wishlist.len())),
    )
}

pub fn list_wishlist(store: &dyn KeyValueStore) -> AppResult<ApiResponse<WishlistView>> {
    let wishlist = WishlistRepository::new(store).load();
    Ok(wishlist_response("OK", &wishlist))
}

pub fn add_to_wishlist(
    store: &dyn KeyValueStore,
    payload: AddWishlistRequest,
) -> AppResult<ApiResponse<WishlistView>> {
    let product_id = payload.product.id.clone();
    let (wishlist, added) = WishlistRepository::new(store)
        .update(|wishlist| Ok::<_, AppError>(wishlist.add(payload.product)))?;

    tracing::debug!(product_id = %product_id, added, "wishlist add");
    let message = if added {
        "Added to wishlist"
    } else {
        "Already in wishlist"
    };
    Ok(wishlist_response(message, &wishlist))
}

/// Heart button: saves the product, or forgets it when already saved.
pub fn toggle_wishlist(
    store: &dyn KeyValueStore,
    payload: AddWishlistRequest,
) -> AppResult<ApiResponse<WishlistView>> {
    let product_id = payload.product.id.clone();
    let (wishlist, saved) = WishlistRepository::new(store)
        .update(|wishlist| Ok::<_, AppError>(wishlist.toggle(payload.product)))?;

    tracing::debug!(product_id = %product_id, saved, "wishlist toggle");
    let message = if saved {
        "Added to wishlist"
    } else {
        "Removed from wishlist"
    };
    Ok(wishlist_response(message, &wishlist))
}

pub fn remove_from_wishlist(
    store: &dyn KeyValueStore,
    product_id: &str,
) -> AppResult<ApiResponse<WishlistView>> {
    let (wishlist, removed) = WishlistRepository::new(store)
        .update(|wishlist| Ok::<_, AppError>(wishlist.remove(product_id)))?;

    if removed.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(wishlist_response("Removed from wishlist", &wishlist))
}

pub fn clear_wishlist(store: &dyn KeyValueStore) -> AppResult<ApiResponse<WishlistView>> {
    WishlistRepository::new(store).clear()?;
    Ok(wishlist_response("Wishlist cleared", &Wishlist::new()))
}

/// Adds one unit of a saved product to the cart, then forgets it from the
/// wishlist. The two writes are separate; if the second fails the product
/// stays in both.
pub fn move_to_cart(
    store: &dyn KeyValueStore,
    product_id: &str,
) -> AppResult<ApiResponse<MoveToCartResponse>> {
    let wishlists = WishlistRepository::new(store);
    let product = wishlists
        .load()
        .get(product_id)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let (cart, _) = CartRepository::new(store)
        .update(|cart| cart.add(product, None, 1).map_err(AppError::from))?;

    let (wishlist, _) =
        wishlists.update(|wishlist| Ok::<_, AppError>(wishlist.remove(product_id)))?;

    tracing::debug!(product_id = %product_id, "wishlist item moved to cart");
    Ok(ApiResponse::success(
        "Moved to cart",
        MoveToCartResponse {
            cart: CartView::from(&cart),
            wishlist: WishlistView::from(&wishlist),
        },
        Some(Meta::cart(&cart)),
    ))
}
