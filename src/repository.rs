//! The only code that knows how cart, wishlist and profile state is laid out
//! in the key-value store.

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    cart::Cart,
    error::CartError,
    models::BuyerProfile,
    store::{KeyValueStore, StoreError},
    wishlist::Wishlist,
};

pub mod keys {
    pub const CART: &str = "cart";
    pub const WISHLIST: &str = "wishlist";
    pub const BUYER_TOKEN: &str = "buyerToken";
    pub const BUYER_ID: &str = "buyerId";
    pub const BUYER_NAME: &str = "buyerName";
    pub const BUYER_EMAIL: &str = "buyerEmail";
    pub const BUYER_PHONE: &str = "buyerPhone";
    pub const BUYER_ADDRESS: &str = "buyerAddress";
    pub const HELPER_PREFIX: &str = "hasSeen";
}

/// Absent keys and undecodable documents both read as `T::default()`.
fn decode<T: DeserializeOwned + Default>(raw: Option<&str>, what: &'static str) -> T {
    let Some(raw) = raw else {
        return T::default();
    };
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            let malformed = CartError::MalformedPersistedState(what);
            tracing::warn!(error = %err, "{malformed}, reading as empty");
            T::default()
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string(value)?)
}

/// Decodes, mutates and re-encodes one document while the store holds the
/// key, so concurrent updates for the same buyer apply one after another.
/// Nothing is written when `f` fails.
fn update_document<D, T, E>(
    store: &dyn KeyValueStore,
    key: &str,
    what: &'static str,
    f: impl FnOnce(&mut D) -> Result<T, E>,
) -> Result<(D, T), E>
where
    D: Serialize + DeserializeOwned + Default,
    E: From<StoreError>,
{
    let mut f = Some(f);
    let mut outcome: Option<Result<(D, T), E>> = None;
    store.modify(key, &mut |current: Option<&str>| {
        let f = f.take()?;
        let mut document: D = decode(current, what);
        let result = f(&mut document)
            .and_then(|value| encode(&document).map(|raw| (raw, value)).map_err(E::from));
        match result {
            Ok((raw, value)) => {
                outcome = Some(Ok((document, value)));
                Some(raw)
            }
            Err(err) => {
                outcome = Some(Err(err));
                None
            }
        }
    })?;
    outcome.unwrap_or(Err(E::from(StoreError::Skipped)))
}

pub struct CartRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CartRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Cart {
        decode(self.store.read(keys::CART).as_deref(), "cart")
    }

    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.store.write(keys::CART, &encode(cart)?)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::CART)
    }

    /// Read-modify-write against the latest persisted cart.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut Cart) -> Result<T, E>) -> Result<(Cart, T), E>
    where
        E: From<StoreError>,
    {
        update_document(self.store, keys::CART, "cart", f)
    }
}

pub struct WishlistRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> WishlistRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Wishlist {
        decode(self.store.read(keys::WISHLIST).as_deref(), "wishlist")
    }

    pub fn save(&self, wishlist: &Wishlist) -> Result<(), StoreError> {
        self.store.write(keys::WISHLIST, &encode(wishlist)?)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::WISHLIST)
    }

    pub fn update<T, E>(
        &self,
        f: impl FnOnce(&mut Wishlist) -> Result<T, E>,
    ) -> Result<(Wishlist, T), E>
    where
        E: From<StoreError>,
    {
        update_document(self.store, keys::WISHLIST, "wishlist", f)
    }
}

/// Cached buyer profile and session fields, one key per field.
pub struct ProfileRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> BuyerProfile {
        BuyerProfile {
            name: self.field(keys::BUYER_NAME),
            email: self.field(keys::BUYER_EMAIL),
            phone: self.field(keys::BUYER_PHONE),
            address: self.field(keys::BUYER_ADDRESS),
        }
    }

    /// Replaces every cached field; `None` clears the field.
    pub fn save(&self, profile: &BuyerProfile) -> Result<(), StoreError> {
        self.set_field(keys::BUYER_NAME, profile.name.as_deref())?;
        self.set_field(keys::BUYER_EMAIL, profile.email.as_deref())?;
        self.set_field(keys::BUYER_PHONE, profile.phone.as_deref())?;
        self.set_field(keys::BUYER_ADDRESS, profile.address.as_deref())?;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.field(keys::BUYER_TOKEN)
    }

    pub fn buyer_id(&self) -> Option<String> {
        self.field(keys::BUYER_ID)
    }

    pub fn remember_session(&self, token: &str, buyer_id: Option<&str>) -> Result<(), StoreError> {
        self.set_field(keys::BUYER_TOKEN, Some(token))?;
        self.set_field(keys::BUYER_ID, buyer_id)
    }

    pub fn forget_session(&self) -> Result<(), StoreError> {
        self.store.remove(keys::BUYER_TOKEN)?;
        self.store.remove(keys::BUYER_ID)
    }

    fn field(&self, key: &str) -> Option<String> {
        self.store.read(key).filter(|value| !value.is_empty())
    }

    fn set_field(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => self.store.write(key, value),
            None => self.store.remove(key),
        }
    }
}

/// One-time "has seen helper" markers.
pub struct HelperFlags<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> HelperFlags<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn key(helper: &str) -> String {
        let mut chars = helper.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
        format!("{}{capitalized}", keys::HELPER_PREFIX)
    }

    pub fn has_seen(&self, helper: &str) -> bool {
        self.store
            .read(&Self::key(helper))
            .is_some_and(|value| value == "true")
    }

    pub fn mark_seen(&self, helper: &str) -> Result<(), StoreError> {
        self.store.write(&Self::key(helper), "true")
    }

    pub fn reset(&self, helper: &str) -> Result<(), StoreError> {
        self.store.remove(&Self::key(helper))
    }
}
