//! Category filter + free-text search over a catalog.

use core::str::FromStr;

use technexus_core::DomainError;

use crate::product::{Category, Product};

/// Query dimension restricting results to one category, or to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Category tabs in display order.
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Phones),
        CategoryFilter::Only(Category::Laptops),
        CategoryFilter::Only(Category::Accessories),
    ];

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// Project the records matching `category` and `search_text`, keeping their
/// relative order.
///
/// A record matches when the filter accepts its category and the search text
/// is empty or appears in its title or description, ignoring case.
pub fn query<'a>(
    collection: &'a [Product],
    category: CategoryFilter,
    search_text: &str,
) -> Vec<&'a Product> {
    let needle = search_text.to_lowercase();
    collection
        .iter()
        .filter(|p| category.matches(p.category()) && matches_text(p, &needle))
        .collect()
}

fn matches_text(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.title().to_lowercase().contains(needle)
        || product.description().to_lowercase().contains(needle)
}
