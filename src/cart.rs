//! Cart model and its mutators.
//!
//! A cart holds at most one line per product id and every line has a
//! quantity of at least one. The total is always folded from the lines.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::{
    error::CartError,
    models::{ProductSnapshot, VendorRef},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Lines of a cart that belong to one vendor, in cart order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorGroup {
    pub vendor: Option<VendorRef>,
    pub cart: Cart,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw lines, dropping zero quantities and folding
    /// repeated product ids into their first occurrence.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(&line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `increment_by` units of a product.
    ///
    /// An existing line only has its quantity raised; name, price and image
    /// stay as they were at the first add. A new line gets `vendor` attached
    /// when one is given. Returns the resulting quantity of the line.
    pub fn add(
        &mut self,
        product: ProductSnapshot,
        vendor: Option<VendorRef>,
        increment_by: i64,
    ) -> Result<u32, CartError> {
        let increment = positive_quantity(increment_by)?;

        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line
                .quantity
                .checked_add(increment)
                .ok_or(CartError::InvalidQuantity)?;
            return Ok(line.quantity);
        }

        let mut product = product;
        if vendor.is_some() {
            product.vendor = vendor;
        }
        self.lines.push(CartLine {
            product,
            quantity: increment,
        });
        Ok(increment)
    }

    /// Replaces the quantity of a line. Zero or negative removes it.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity)?;

        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CartError::LineNotFound(product_id.to_string())),
        }
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        before != self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Takes `quantity` units off a line, dropping it once nothing is left.
    /// Units added after the order was built stay in the cart.
    pub fn deduct(&mut self, product_id: &str, quantity: u32) {
        let Some(index) = self.lines.iter().position(|line| line.product.id == product_id) else {
            return;
        };
        let line = &mut self.lines[index];
        line.quantity = line.quantity.saturating_sub(quantity);
        if line.quantity == 0 {
            self.lines.remove(index);
        }
    }

    /// Splits the cart by vendor in order of first appearance. Lines without
    /// a vendor end up together in a group with `vendor: None`.
    pub fn vendor_groups(&self) -> Vec<VendorGroup> {
        let mut groups: Vec<VendorGroup> = Vec::new();
        for line in &self.lines {
            let vendor_id = line.product.vendor.as_ref().map(|vendor| vendor.id.as_str());
            let existing = groups
                .iter_mut()
                .find(|group| group.vendor.as_ref().map(|vendor| vendor.id.as_str()) == vendor_id);
            match existing {
                Some(group) => group.cart.lines.push(line.clone()),
                None => groups.push(VendorGroup {
                    vendor: line.product.vendor.clone(),
                    cart: Cart {
                        lines: vec![line.clone()],
                    },
                }),
            }
        }
        groups
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.lines.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLine>::deserialize(deserializer).map(Cart::from_lines)
    }
}

/// One of the three ways a surface may change the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    Add {
        product: ProductSnapshot,
        vendor: Option<VendorRef>,
        increment_by: i64,
    },
    SetQuantity {
        product_id: String,
        quantity: i64,
    },
    Remove {
        product_id: String,
    },
}

/// Computes the next cart for an intent without touching the input.
pub fn apply(cart: &Cart, intent: CartIntent) -> Result<Cart, CartError> {
    let mut next = cart.clone();
    match intent {
        CartIntent::Add {
            product,
            vendor,
            increment_by,
        } => {
            next.add(product, vendor, increment_by)?;
        }
        CartIntent::SetQuantity {
            product_id,
            quantity,
        } => next.set_quantity(&product_id, quantity)?,
        CartIntent::Remove { product_id } => {
            next.remove(&product_id);
        }
    }
    Ok(next)
}

fn positive_quantity(value: i64) -> Result<u32, CartError> {
    if value <= 0 {
        return Err(CartError::InvalidQuantity);
    }
    u32::try_from(value).map_err(|_| CartError::InvalidQuantity)
}
