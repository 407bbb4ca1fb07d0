use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::ProductSnapshot;

/// Saved products, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: Vec<ProductSnapshot>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = ProductSnapshot>) -> Self {
        let mut wishlist = Self::new();
        for item in items {
            wishlist.add(item);
        }
        wishlist
    }

    pub fn items(&self) -> &[ProductSnapshot] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&ProductSnapshot> {
        self.items.iter().find(|item| item.id == product_id)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.get(product_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns false when the product was already saved; the stored snapshot
    /// is kept as is.
    pub fn add(&mut self, product: ProductSnapshot) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    pub fn remove(&mut self, product_id: &str) -> Option<ProductSnapshot> {
        let index = self.items.iter().position(|item| item.id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Heart-button behaviour: saves the product or forgets it. Returns
    /// whether the product is saved afterwards.
    pub fn toggle(&mut self, product: ProductSnapshot) -> bool {
        if self.remove(&product.id).is_some() {
            return false;
        }
        self.items.push(product);
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Serialize for Wishlist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Wishlist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ProductSnapshot>::deserialize(deserializer).map(Wishlist::from_items)
    }
}
