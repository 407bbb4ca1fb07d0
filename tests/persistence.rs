use std::sync::Arc;

use whatsapp_storefront::{
    cart::Cart,
    models::{BuyerProfile, ProductSnapshot, VendorRef},
    repository::{CartRepository, HelperFlags, ProfileRepository, WishlistRepository, keys},
    store::{FileStore, KeyValueStore, MemoryStore, ScopedStore},
};

fn sample_cart() -> Cart {
    let mut cart = Cart::new();
    let vendor = VendorRef {
        id: "v1".into(),
        business_name: "Ada's Shoes".into(),
        phone_number: Some("+234 801 234 5678".into()),
    };
    let mut sneakers = ProductSnapshot::new("p1", "Sneakers", 3000);
    sneakers.image = Some("https://cdn.example.com/p1.jpg".into());
    sneakers.original_price = Some(4000);
    cart.add(sneakers, Some(vendor), 2).unwrap();
    cart.add(ProductSnapshot::new("p2", "Socks", 500), None, 1)
        .unwrap();
    cart
}

#[test]
fn cart_round_trips_through_repository() {
    let store = MemoryStore::new();
    let carts = CartRepository::new(&store);
    let cart = sample_cart();

    carts.save(&cart).unwrap();
    assert_eq!(carts.load(), cart);
}

#[test]
fn persisted_cart_uses_documented_field_names() {
    let store = MemoryStore::new();
    CartRepository::new(&store).save(&sample_cart()).unwrap();

    let raw = store.read(keys::CART).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], "p1");
    assert_eq!(first["name"], "Sneakers");
    assert_eq!(first["price"], 3000);
    assert_eq!(first["quantity"], 2);
    assert_eq!(first["originalPrice"], 4000);
    assert_eq!(first["vendor"]["businessName"], "Ada's Shoes");
    assert_eq!(first["vendor"]["phoneNumber"], "+234 801 234 5678");
    assert!(json[1].get("vendor").is_none());
}

#[test]
fn missing_cart_key_reads_as_empty() {
    let store = MemoryStore::new();
    assert!(CartRepository::new(&store).load().is_empty());
    assert!(WishlistRepository::new(&store).load().is_empty());
}

#[test]
fn malformed_cart_reads_as_empty_without_being_overwritten() {
    let store = MemoryStore::new();
    store.write(keys::CART, "{not json").unwrap();

    assert!(CartRepository::new(&store).load().is_empty());
    assert_eq!(store.read(keys::CART).as_deref(), Some("{not json"));
}

#[test]
fn hand_written_cart_is_normalized_on_read() {
    let store = MemoryStore::new();
    store
        .write(
            keys::CART,
            r#"[{"id":"p1","name":"A","price":100,"quantity":1},
                {"id":"p2","name":"B","price":200,"quantity":0},
                {"id":"p1","name":"A","price":100,"quantity":2}]"#,
        )
        .unwrap();

    let cart = CartRepository::new(&store).load();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("p1").unwrap().quantity, 3);
}

#[test]
fn failed_update_writes_nothing() {
    let store = MemoryStore::new();
    let carts = CartRepository::new(&store);
    carts.save(&sample_cart()).unwrap();
    let before = store.read(keys::CART);

    let result = carts.update(|cart| {
        cart.set_quantity("missing", 3)
            .map_err(whatsapp_storefront::error::AppError::from)
    });
    assert!(result.is_err());
    assert_eq!(store.read(keys::CART), before);
}

#[test]
fn wishlist_round_trips_without_quantity() {
    let store = MemoryStore::new();
    let wishlists = WishlistRepository::new(&store);
    let (wishlist, added) = wishlists
        .update(|w| {
            Ok::<_, whatsapp_storefront::store::StoreError>(
                w.add(ProductSnapshot::new("p9", "Hat", 1500)),
            )
        })
        .unwrap();
    assert!(added);

    let raw = store.read(keys::WISHLIST).unwrap();
    assert!(!raw.contains("quantity"));
    assert_eq!(wishlists.load(), wishlist);
}

#[test]
fn scoped_stores_do_not_share_keys() {
    let shared: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let ada = ScopedStore::new(shared.clone(), "guest-ada");
    let bola = ScopedStore::new(shared.clone(), "guest-bola");

    CartRepository::new(&ada).save(&sample_cart()).unwrap();

    assert_eq!(CartRepository::new(&ada).load().len(), 2);
    assert!(CartRepository::new(&bola).load().is_empty());
    assert!(shared.read("guest-ada:cart").is_some());
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storefront.json");

    {
        let store = FileStore::open(&path).unwrap();
        CartRepository::new(&store).save(&sample_cart()).unwrap();
        store.write("scratch", "1").unwrap();
        store.remove("scratch").unwrap();
    }

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(CartRepository::new(&reopened).load(), sample_cart());
    assert!(reopened.read("scratch").is_none());
}

#[test]
fn failed_file_write_leaves_previous_value_visible() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("state");
    let path = parent.join("storefront.json");
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.path(), path.as_path());
    store.write("cart", "[1]").unwrap();
    store.write("wishlist", "[]").unwrap();

    // The document's directory turns into a plain file, so every flush fails.
    std::fs::remove_dir_all(&parent).unwrap();
    std::fs::write(&parent, "not a directory").unwrap();

    assert!(store.write("cart", "[]").is_err());
    assert_eq!(store.read("cart").as_deref(), Some("[1]"));

    assert!(store.write("fresh", "1").is_err());
    assert!(store.read("fresh").is_none());

    assert!(store.remove("wishlist").is_err());
    assert_eq!(store.read("wishlist").as_deref(), Some("[]"));

    let failed = CartRepository::new(&store).update(|cart| {
        cart.add(ProductSnapshot::new("p9", "Hat", 100), None, 1)
            .map_err(|_| whatsapp_storefront::store::StoreError::Skipped)
    });
    assert!(failed.is_err());
    assert_eq!(store.read("cart").as_deref(), Some("[1]"));
}

#[test]
fn file_store_rejects_corrupt_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.json");
    std::fs::write(&path, "[1, 2").unwrap();

    assert!(FileStore::open(&path).is_err());
}

#[test]
fn profile_fields_are_stored_individually() {
    let store = MemoryStore::new();
    let profiles = ProfileRepository::new(&store);
    let profile = BuyerProfile {
        name: Some("Chidi".into()),
        email: None,
        phone: Some("08030000000".into()),
        address: Some("12 Marina".into()),
    };

    profiles.save(&profile).unwrap();
    assert_eq!(store.read(keys::BUYER_NAME).as_deref(), Some("Chidi"));
    assert!(store.read(keys::BUYER_EMAIL).is_none());
    assert_eq!(profiles.load(), profile);

    profiles.save(&BuyerProfile::default()).unwrap();
    assert!(profiles.load().is_empty());
}

#[test]
fn session_fields_can_be_forgotten() {
    let store = MemoryStore::new();
    let profiles = ProfileRepository::new(&store);

    profiles.remember_session("tok", Some("b-1")).unwrap();
    assert_eq!(profiles.token().as_deref(), Some("tok"));
    assert_eq!(profiles.buyer_id().as_deref(), Some("b-1"));

    profiles.forget_session().unwrap();
    assert!(profiles.token().is_none());
    assert!(profiles.buyer_id().is_none());
}

#[test]
fn helper_flags_track_seen_state() {
    let store = MemoryStore::new();
    let flags = HelperFlags::new(&store);

    assert_eq!(HelperFlags::key("cartHelper"), "hasSeenCartHelper");
    assert!(!flags.has_seen("cartHelper"));
    flags.mark_seen("cartHelper").unwrap();
    assert!(flags.has_seen("cartHelper"));
    flags.reset("cartHelper").unwrap();
    assert!(!flags.has_seen("cartHelper"));
}

#[test]
fn wishlist_toggle_saves_then_forgets() {
    let store = MemoryStore::new();
    let wishlists = WishlistRepository::new(&store);
    let product = ProductSnapshot::new("p1", "Sneakers", 3000);

    let (_, saved) = wishlists
        .update(|w| Ok::<_, whatsapp_storefront::store::StoreError>(w.toggle(product.clone())))
        .unwrap();
    assert!(saved);
    assert!(wishlists.load().contains("p1"));

    let (wishlist, saved) = wishlists
        .update(|w| Ok::<_, whatsapp_storefront::store::StoreError>(w.toggle(product)))
        .unwrap();
    assert!(!saved);
    assert!(wishlist.is_empty());
}
