use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use whatsapp_storefront::{
    catalog::{
        CatalogApi, CatalogError, CatalogProduct, OrderReceipt, OrderRequest, TrackQuery,
        TrackedOrder, Vendor, VendorCatalog,
    },
    composer::MessageTemplate,
    dto::{
        cart::{AddToCartRequest, SetQuantityRequest},
        contact::{CartContactRequest, InquiryRequest},
        orders::CheckoutRequest,
        profile::{ProfileSource, UpdateProfileRequest},
        wishlist::AddWishlistRequest,
    },
    error::{AppError, CartError},
    middleware::session::BuyerSession,
    models::{BuyerProfile, ProductSnapshot},
    repository::CartRepository,
    services::{
        cart_service, catalog_service, inquiry_service, order_service, profile_service,
        wishlist_service,
    },
    store::{KeyValueStore, MemoryStore, ScopedStore},
};

#[derive(Default)]
struct FakeCatalog {
    fail: AtomicBool,
    orders: Mutex<Vec<OrderRequest>>,
    remote_profile: Option<BuyerProfile>,
    during_order: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl FakeCatalog {
    fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::Api {
                status: 503,
                message: "down".into(),
            });
        }
        Ok(())
    }
}

fn ada() -> Vendor {
    Vendor {
        id: "v1".into(),
        business_name: "Ada's Shoes".into(),
        phone_number: Some("+234 801 234 5678".into()),
        description: None,
        logo: None,
    }
}

fn sneakers() -> CatalogProduct {
    CatalogProduct {
        id: "p1".into(),
        name: "Sneakers".into(),
        price: 3000,
        original_price: None,
        image: None,
        description: None,
        vendor: None,
    }
}

impl CatalogApi for FakeCatalog {
    async fn vendor_catalog(&self, vendor_id: &str) -> Result<VendorCatalog, CatalogError> {
        self.check()?;
        if vendor_id != "v1" {
            return Err(CatalogError::NotFound(format!("vendor {vendor_id}")));
        }
        Ok(VendorCatalog {
            vendor: ada(),
            products: vec![sneakers()],
        })
    }

    async fn product(&self, _product_id: &str) -> Result<CatalogProduct, CatalogError> {
        self.check()?;
        Ok(sneakers())
    }

    async fn search_products(&self, _query: &str) -> Result<Vec<CatalogProduct>, CatalogError> {
        self.check()?;
        Ok(vec![sneakers()])
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, CatalogError> {
        self.check()?;
        self.orders.lock().unwrap().push(order.clone());
        let during_order = self.during_order.lock().unwrap().take();
        if let Some(during_order) = during_order {
            during_order();
        }
        Ok(OrderReceipt {
            id: "ord-1".into(),
            status: Some("pending".into()),
            created_at: None,
        })
    }

    async fn track_orders(&self, _query: &TrackQuery) -> Result<Vec<TrackedOrder>, CatalogError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn buyer_profile(&self, _token: &str) -> Result<BuyerProfile, CatalogError> {
        self.check()?;
        self.remote_profile
            .clone()
            .ok_or_else(|| CatalogError::NotFound("buyer".into()))
    }
}

fn add_request(product: ProductSnapshot, increment_by: i64) -> AddToCartRequest {
    AddToCartRequest {
        product,
        vendor: Some(ada().to_ref()),
        increment_by,
    }
}

fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        buyer_name: Some("Chidi".into()),
        buyer_phone: Some("08030000000".into()),
        delivery_address: Some("12 Marina, Lagos".into()),
        notes: Some("Call on arrival".into()),
        save_profile: true,
    }
}

#[tokio::test]
async fn grid_detail_and_widget_share_one_cart() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let catalog = FakeCatalog::default();

    // Catalog grid adds from the vendor page.
    let page = catalog_service::vendor_catalog(&catalog, "v1").await?;
    let page = page.data.unwrap();
    let snapshot = page.products[0].snapshot(Some(&page.vendor));
    cart_service::add_to_cart(&store, add_request(snapshot.clone(), 1))?;

    // Product detail adds two more.
    cart_service::add_to_cart(&store, add_request(snapshot, 2))?;

    // Floating widget sets the final quantity.
    let resp = cart_service::set_quantity(&store, "p1", SetQuantityRequest { quantity: 4 })?;
    let view = resp.data.unwrap();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].quantity, 4);
    assert_eq!(view.total, 12_000);
    assert_eq!(view.total_formatted, "₦12,000");
    assert_eq!(resp.meta.unwrap().item_count, Some(4));

    let resp = cart_service::remove_from_cart(&store, "p1")?;
    assert!(resp.data.unwrap().lines.is_empty());
    // Removing again is still fine.
    cart_service::remove_from_cart(&store, "p1")?;
    Ok(())
}

#[tokio::test]
async fn invalid_intents_surface_typed_errors() {
    let store = MemoryStore::new();

    let err = cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 0))
        .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::InvalidQuantity)));

    let err = cart_service::set_quantity(&store, "nope", SetQuantityRequest { quantity: 2 })
        .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::LineNotFound(_))));
}

#[tokio::test]
async fn failed_catalog_fetch_keeps_existing_cart() {
    let store = MemoryStore::new();
    cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 2)).unwrap();

    let catalog = FakeCatalog::failing();
    assert!(catalog_service::vendor_catalog(&catalog, "v1").await.is_err());
    assert!(catalog_service::get_product(&catalog, "p1").await.is_err());

    assert_eq!(CartRepository::new(&store).load().item_count(), 2);
}

#[tokio::test]
async fn cart_contact_link_targets_vendor_phone() {
    let store = MemoryStore::new();
    cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 2)).unwrap();

    let link = cart_service::cart_contact_link(&store, CartContactRequest::default())
        .unwrap()
        .data
        .unwrap();
    assert_eq!(link.template, MessageTemplate::CartCheckout);
    assert!(link.url.starts_with("https://wa.me/2348012345678?text="));
    assert!(link.message.contains("Sneakers × 2 — ₦6,000"));
}

#[tokio::test]
async fn cart_contact_link_needs_a_reachable_vendor() {
    let store = MemoryStore::new();
    let mut silent = ada().to_ref();
    silent.phone_number = Some(String::new());
    cart_service::add_to_cart(
        &store,
        AddToCartRequest {
            product: sneakers().snapshot(None),
            vendor: Some(silent),
            increment_by: 1,
        },
    )
    .unwrap();

    let err = cart_service::cart_contact_link(&store, CartContactRequest::default()).unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::MissingVendorContact)));
}

#[tokio::test]
async fn inquiry_link_uses_inquiry_template() {
    let product = sneakers().snapshot(Some(&ada()));
    let link = inquiry_service::product_inquiry(InquiryRequest { product })
        .unwrap()
        .data
        .unwrap();
    assert_eq!(link.template, MessageTemplate::ProductInquiry);
    assert!(link.message.contains("interested in Sneakers"));

    let err = inquiry_service::product_inquiry(InquiryRequest {
        product: sneakers().snapshot(None),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::MissingVendorContact)));
}

#[tokio::test]
async fn move_to_cart_adds_one_and_drops_wishlist_entry() {
    let store = MemoryStore::new();
    let product = sneakers().snapshot(Some(&ada()));
    wishlist_service::add_to_wishlist(&store, AddWishlistRequest { product: product.clone() })
        .unwrap();
    cart_service::add_to_cart(&store, add_request(product, 1)).unwrap();

    let moved = wishlist_service::move_to_cart(&store, "p1").unwrap().data.unwrap();
    assert_eq!(moved.cart.lines[0].quantity, 2);
    assert!(moved.wishlist.items.is_empty());

    let err = wishlist_service::move_to_cart(&store, "p1").unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn checkout_submits_order_and_clears_cart() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let catalog = FakeCatalog::default();
    cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 2))?;

    let resp = order_service::checkout(&store, &catalog, checkout_request()).await?;
    let data = resp.data.unwrap();
    assert_eq!(data.order.id, "ord-1");
    assert_eq!(data.total, 6000);
    assert_eq!(data.hand_offs.len(), 1);
    let url = data.hand_offs[0].url.as_deref().unwrap();
    assert!(url.starts_with("https://wa.me/2348012345678?text="));
    assert!(url.contains("ord-1"));

    let submitted = catalog.orders.lock().unwrap().clone();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].total, 6000);
    assert_eq!(submitted[0].items[0].quantity, 2);
    assert_eq!(submitted[0].items[0].vendor_id.as_deref(), Some("v1"));
    assert_eq!(submitted[0].notes.as_deref(), Some("Call on arrival"));

    assert!(CartRepository::new(&store).load().is_empty());

    // Details were saved, so the next checkout can omit them.
    let profile = profile_service::get_profile(&store, &catalog, &BuyerSession::anonymous("a"))
        .await?
        .data
        .unwrap();
    assert_eq!(profile.profile.name.as_deref(), Some("Chidi"));
    Ok(())
}

#[tokio::test]
async fn failed_checkout_leaves_cart_intact() {
    let store = MemoryStore::new();
    let catalog = FakeCatalog::failing();
    cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 2)).unwrap();

    let err = order_service::checkout(&store, &catalog, checkout_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Catalog(_)));
    assert_eq!(CartRepository::new(&store).load().item_count(), 2);
}

#[tokio::test]
async fn checkout_rejects_empty_cart_and_missing_details() {
    let store = MemoryStore::new();
    let catalog = FakeCatalog::default();

    let err = order_service::checkout(&store, &catalog, checkout_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 1)).unwrap();
    let err = order_service::checkout(&store, &catalog, CheckoutRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(catalog.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn profile_prefers_remote_and_falls_back_to_cache() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    profile_service::update_profile(
        &store,
        UpdateProfileRequest {
            name: Some("Local Name".into()),
            ..UpdateProfileRequest::default()
        },
    )?;

    let session = BuyerSession::with_token("tok-1");
    let remote = FakeCatalog {
        remote_profile: Some(BuyerProfile {
            name: Some("Remote Name".into()),
            ..BuyerProfile::default()
        }),
        ..FakeCatalog::default()
    };
    let view = profile_service::get_profile(&store, &remote, &session)
        .await?
        .data
        .unwrap();
    assert_eq!(view.source, ProfileSource::Remote);
    assert_eq!(view.profile.name.as_deref(), Some("Remote Name"));

    let view = profile_service::get_profile(&store, &FakeCatalog::failing(), &session)
        .await?
        .data
        .unwrap();
    assert_eq!(view.source, ProfileSource::Local);
    assert_eq!(view.profile.name.as_deref(), Some("Remote Name"));
    Ok(())
}

#[tokio::test]
async fn helper_markers_flip_once_seen() {
    let store = MemoryStore::new();
    let state = profile_service::helper_state(&store, "cart").unwrap().data.unwrap();
    assert!(!state.seen);

    profile_service::mark_helper_seen(&store, "cart").unwrap();
    let state = profile_service::helper_state(&store, "cart").unwrap().data.unwrap();
    assert!(state.seen);

    assert!(profile_service::helper_state(&store, "../etc").is_err());
}

#[tokio::test]
async fn order_tracking_needs_a_key() {
    let catalog = FakeCatalog::default();
    let err = order_service::track_orders(&catalog, TrackQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let resp = order_service::track_orders(
        &catalog,
        TrackQuery {
            phone: Some("0803".into()),
            order_id: None,
        },
    )
    .await
    .unwrap();
    assert!(resp.data.unwrap().items.is_empty());
}

#[tokio::test]
async fn checkout_keeps_lines_added_while_order_is_in_flight() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    cart_service::add_to_cart(&*store, add_request(sneakers().snapshot(None), 2))?;

    let widget = store.clone();
    let catalog = FakeCatalog::default();
    *catalog.during_order.lock().unwrap() = Some(Box::new(move || {
        let socks = ProductSnapshot::new("p2", "Socks", 500);
        cart_service::add_to_cart(&*widget, add_request(socks, 1)).unwrap();
        let more = sneakers().snapshot(None);
        cart_service::add_to_cart(&*widget, add_request(more, 1)).unwrap();
    }));

    let data = order_service::checkout(&*store, &catalog, checkout_request())
        .await?
        .data
        .unwrap();
    assert_eq!(data.total, 6000);

    let submitted = catalog.orders.lock().unwrap().clone();
    assert_eq!(submitted[0].items.len(), 1);
    assert_eq!(submitted[0].items[0].product_id, "p1");

    let cart = CartRepository::new(&*store).load();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get("p1").unwrap().quantity, 1);
    assert_eq!(cart.get("p2").unwrap().quantity, 1);
    Ok(())
}

#[test]
fn parallel_adds_from_several_surfaces_are_all_kept() {
    let shared: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let buyer = ScopedStore::new(shared, "guest-ada");

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..250 {
                    cart_service::add_to_cart(&buyer, add_request(sneakers().snapshot(None), 1))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(CartRepository::new(&buyer).load().item_count(), 2000);
}

#[test]
fn parallel_wishlist_toggles_and_cart_edits_do_not_clobber_each_other() {
    let store = MemoryStore::new();
    cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 1)).unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..200 {
                let product = ProductSnapshot::new(format!("w{i}"), "Saved", 100);
                wishlist_service::toggle_wishlist(&store, AddWishlistRequest { product }).unwrap();
            }
        });
        scope.spawn(|| {
            for _ in 0..200 {
                cart_service::add_to_cart(&store, add_request(sneakers().snapshot(None), 1))
                    .unwrap();
            }
        });
    });

    let wishlist = wishlist_service::list_wishlist(&store).unwrap().data.unwrap();
    assert_eq!(wishlist.items.len(), 200);
    assert_eq!(CartRepository::new(&store).load().item_count(), 201);
}

#[tokio::test]
async fn wishlist_toggle_flips_saved_state() {
    let store = MemoryStore::new();
    let product = sneakers().snapshot(Some(&ada()));

    let resp =
        wishlist_service::toggle_wishlist(&store, AddWishlistRequest { product: product.clone() })
            .unwrap();
    assert_eq!(resp.message, "Added to wishlist");
    assert_eq!(resp.data.unwrap().items.len(), 1);

    let resp = wishlist_service::toggle_wishlist(&store, AddWishlistRequest { product }).unwrap();
    assert_eq!(resp.message, "Removed from wishlist");
    assert!(resp.data.unwrap().items.is_empty());
}

#[tokio::test]
async fn reset_helper_shows_it_again() {
    let store = MemoryStore::new();
    profile_service::mark_helper_seen(&store, "cart").unwrap();

    let state = profile_service::reset_helper(&store, "cart").unwrap().data.unwrap();
    assert!(!state.seen);
    let state = profile_service::helper_state(&store, "cart").unwrap().data.unwrap();
    assert!(!state.seen);
}
