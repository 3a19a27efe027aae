//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a product listing.
///
/// Opaque on the wire: seed records use short literals (`"1"`, `"2"`), new
/// listings get a generated value. Any non-blank token without whitespace is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Generate a fresh identifier.
    ///
    /// Uses UUIDv7 (time-ordered) in its compact form. Prefer passing IDs
    /// explicitly in tests for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_id(format!(
                "ProductId: contains whitespace: {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().contains('-'));
    }

    #[test]
    fn parse_rejects_blank_and_whitespace() {
        assert!(matches!("".parse::<ProductId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("a b".parse::<ProductId>(), Err(DomainError::InvalidId(_))));
        assert_eq!("1".parse::<ProductId>().unwrap().as_str(), "1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: ProductId = "k3j9x0abc".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"k3j9x0abc\"");

        let back: ProductId = serde_json::from_str("\"k3j9x0abc\"").unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }
}
