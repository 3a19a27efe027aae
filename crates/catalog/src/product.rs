use core::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use technexus_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Listing category. `All` is a query wildcard only (see [`crate::CategoryFilter`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Phones,
    Laptops,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Phones, Category::Laptops, Category::Accessories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Phones => "Phones",
            Category::Laptops => "Laptops",
            Category::Accessories => "Accessories",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s:?}")))
    }
}

impl ValueObject for Category {}

/// Non-negative amount in the storefront's single currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        // `-0.0` passes the sign check; store it as `0.0`.
        Ok(Self(amount.abs()))
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("price is not a number: {s:?}")))?;
        Self::new(amount)
    }
}

impl ValueObject for Price {}

/// Seller contact handle: digits only, country code included, no leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactHandle(String);

impl ContactHandle {
    /// Strip every `+` and whitespace character, then validate.
    ///
    /// `"+234 800 000 0000"` becomes `"2348000000000"`.
    pub fn normalize(raw: &str) -> DomainResult<Self> {
        let digits: String = raw
            .chars()
            .filter(|c| *c != '+' && !c.is_whitespace())
            .collect();
        Self::parse(&digits)
    }

    /// Accept an already-normalized handle only.
    pub fn parse(s: &str) -> DomainResult<Self> {
        if s.is_empty() {
            return Err(DomainError::validation("contact handle cannot be empty"));
        }
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "contact handle must contain digits only: {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ContactHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContactHandle {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ContactHandle> for String {
    fn from(value: ContactHandle) -> Self {
        value.0
    }
}

impl ValueObject for ContactHandle {}

/// Everything about a listing except its identity and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: Category,
    pub image_url: String,
    pub seller_contact_handle: ContactHandle,
}

/// A product listing.
///
/// The serialized shape is the persisted slot format: camelCase fields, the
/// contact handle under `sellerWhatsApp`, `createdAt` as epoch milliseconds.
/// Deserialization re-checks the record invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    title: String,
    price: Price,
    description: String,
    category: Category,
    image_url: String,
    #[serde(rename = "sellerWhatsApp")]
    seller_contact_handle: ContactHandle,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl Product {
    /// Build a listing, enforcing the record invariants.
    ///
    /// `created_at` is truncated to millisecond precision so the record
    /// survives a trip through the persisted format unchanged.
    pub fn new(
        id: ProductId,
        details: ProductDetails,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let ProductDetails {
            title,
            price,
            description,
            category,
            image_url,
            seller_contact_handle,
        } = details;

        if title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if image_url.trim().is_empty() {
            return Err(DomainError::validation("image url cannot be empty"));
        }

        Ok(Self {
            id,
            title,
            price,
            description,
            category,
            image_url,
            seller_contact_handle,
            created_at: created_at.trunc_subsecs(3),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn seller_contact_handle(&self) -> &ContactHandle {
        &self.seller_contact_handle
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Wire shape used only to route deserialization through [`Product::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: ProductId,
    title: String,
    price: Price,
    description: String,
    category: Category,
    image_url: String,
    #[serde(rename = "sellerWhatsApp")]
    seller_contact_handle: ContactHandle,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        Product::new(
            r.id,
            ProductDetails {
                title: r.title,
                price: r.price,
                description: r.description,
                category: r.category,
                image_url: r.image_url,
                seller_contact_handle: r.seller_contact_handle,
            },
            r.created_at,
        )
    }
}
