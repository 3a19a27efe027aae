//! Seller listing form: required-field checks, normalization, candidate building.

use chrono::{DateTime, Utc};

use technexus_core::{DomainError, DomainResult, ProductId};

use crate::product::{Category, ContactHandle, Price, Product, ProductDetails};

/// Image used when the seller does not attach one.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/600/400";

/// Raw seller input, as typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: Category,
    pub seller_contact: String,
    /// Locally generated preview reference; never uploaded anywhere.
    pub image_url: Option<String>,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            description: String::new(),
            category: Category::Phones,
            seller_contact: String::new(),
            image_url: None,
        }
    }
}

impl ListingForm {
    /// Names of required fields left blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("price", &self.price),
            ("seller contact", &self.seller_contact),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Check the form without building anything.
    pub fn validate(&self) -> DomainResult<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "please fill in the required fields: {}",
                missing.join(", ")
            )));
        }
        self.price.parse::<Price>()?;
        ContactHandle::normalize(&self.seller_contact)?;
        Ok(())
    }

    /// Build the candidate listing for the store.
    pub fn into_candidate(self, id: ProductId, created_at: DateTime<Utc>) -> DomainResult<Product> {
        self.validate()?;

        let price = self.price.parse::<Price>()?;
        let seller_contact_handle = ContactHandle::normalize(&self.seller_contact)?;
        let image_url = self
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

        Product::new(
            id,
            ProductDetails {
                title: self.title.trim().to_string(),
                price,
                description: self.description,
                category: self.category,
                image_url,
                seller_contact_handle,
            },
            created_at,
        )
    }
}
