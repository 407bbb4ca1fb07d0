pub mod cart;
pub mod catalog;
pub mod contact;
pub mod orders;
pub mod profile;
pub mod wishlist;
