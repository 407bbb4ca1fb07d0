//! Vendor-facing order messages and WhatsApp hand-off links.
//!
//! Everything here is pure. Opening the link is left to the caller.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    cart::Cart,
    error::CartError,
    models::{BuyerProfile, ProductSnapshot, VendorRef},
};

pub const CURRENCY_GLYPH: &str = "₦";

const WHATSAPP_BASE: &str = "https://wa.me/";

/// The message shapes a buyer can send to a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageTemplate {
    /// Browsing: asks about a single product.
    ProductInquiry,
    /// Firm request built from the cart.
    CartCheckout,
    /// Sent after the order was accepted by the order service.
    OrderFollowUp,
}

impl MessageTemplate {
    pub fn header(&self) -> &'static str {
        match self {
            MessageTemplate::ProductInquiry => "*PRODUCT INQUIRY*",
            MessageTemplate::CartCheckout => "*ORDER REQUEST*",
            MessageTemplate::OrderFollowUp => "*ORDER PLACED*",
        }
    }
}

/// Whole currency units with comma thousands separators, e.g. `₦6,000`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{CURRENCY_GLYPH}{grouped}")
}

pub fn compose_cart_message(cart: &Cart, vendor: &VendorRef) -> String {
    let mut message = String::new();
    message.push_str(MessageTemplate::CartCheckout.header());
    message.push_str("\n\n");
    message.push_str(&format!(
        "Hello {}, I would like to order the following:\n\n",
        vendor.business_name
    ));
    push_lines(&mut message, cart);
    message.push_str("\nPlease confirm availability and delivery details.");
    message
}

pub fn compose_product_inquiry(product: &ProductSnapshot) -> String {
    let greeting = product
        .vendor
        .as_ref()
        .map_or_else(|| "Hello".to_string(), |vendor| format!("Hello {}", vendor.business_name));

    let mut message = String::new();
    message.push_str(MessageTemplate::ProductInquiry.header());
    message.push_str("\n\n");
    message.push_str(&format!(
        "{greeting}, I'm interested in {}.\n",
        product.name
    ));
    match product.original_price {
        Some(original) if product.is_discounted() => message.push_str(&format!(
            "Price: {} (was ~{}~)\n",
            format_price(product.price),
            format_price(original)
        )),
        _ => message.push_str(&format!("Price: {}\n", format_price(product.price))),
    }
    message.push_str("\nIs it still available?");
    message
}

pub fn compose_order_follow_up(
    order_id: &str,
    cart: &Cart,
    vendor: &VendorRef,
    buyer: &BuyerProfile,
) -> String {
    let mut message = String::new();
    message.push_str(MessageTemplate::OrderFollowUp.header());
    message.push_str("\n\n");
    message.push_str(&format!(
        "Hello {}, I just placed order #{order_id}:\n\n",
        vendor.business_name
    ));
    push_lines(&mut message, cart);

    let details = [
        ("Name", buyer.name.as_deref()),
        ("Phone", buyer.phone.as_deref()),
        ("Delivery address", buyer.address.as_deref()),
    ];
    let mut wrote_heading = false;
    for (label, value) in details {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        if !wrote_heading {
            message.push('\n');
            wrote_heading = true;
        }
        message.push_str(&format!("{label}: {value}\n"));
    }
    message.push_str("\nThank you!");
    message
}

fn push_lines(message: &mut String, cart: &Cart) {
    for line in cart.lines() {
        message.push_str(&format!(
            "{} × {} — {}\n",
            line.product.name,
            line.quantity,
            format_price(line.subtotal())
        ));
    }
    message.push_str(&format!("\n*Total: {}*\n", format_price(cart.total())));
}

pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/<digits>?text=<message>` for the vendor's phone.
pub fn build_contact_link(vendor: &VendorRef, message: &str) -> Result<String, CartError> {
    let digits = vendor
        .phone_number
        .as_deref()
        .map(phone_digits)
        .unwrap_or_default();
    if digits.is_empty() {
        return Err(CartError::MissingVendorContact);
    }
    Ok(format!(
        "{WHATSAPP_BASE}{digits}?text={}",
        urlencoding::encode(message)
    ))
}
