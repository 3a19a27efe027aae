//! Catalog domain module.
//!
//! This crate contains the business rules for listings, implemented purely as
//! deterministic domain logic (no IO, no storage, no clock reads).

pub mod contact;
pub mod listing;
pub mod product;
pub mod query;
pub mod seed;

pub use contact::{contact_link, contact_message, format_price};
pub use listing::{DEFAULT_IMAGE_URL, ListingForm};
pub use product::{Category, ContactHandle, Price, Product, ProductDetails};
pub use query::{CategoryFilter, query};
pub use seed::sample_products;
