//! Sample listings installed when no usable catalog is persisted.

use chrono::{DateTime, Duration, Utc};

use technexus_core::DomainResult;

use crate::product::{Category, ContactHandle, Price, Product, ProductDetails};

const SAMPLE_CONTACT: &str = "2348000000000";

struct Sample {
    id: &'static str,
    title: &'static str,
    price: f64,
    description: &'static str,
    category: Category,
    image_url: &'static str,
    age_hours: i64,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: "1",
        title: "iPhone 15 Pro Max - 256GB",
        price: 1199.0,
        description: "Barely used iPhone 15 Pro Max. Natural Titanium color. \
                      Includes all original accessories and box.",
        category: Category::Phones,
        image_url: "https://picsum.photos/id/160/600/400",
        age_hours: 24,
    },
    Sample {
        id: "2",
        title: "MacBook Pro M3 Max 14\"",
        price: 2499.0,
        description: "14-inch MacBook Pro with M3 Max chip, 36GB RAM, 1TB SSD. \
                      Space Black. Like new condition.",
        category: Category::Laptops,
        image_url: "https://picsum.photos/id/1/600/400",
        age_hours: 48,
    },
    Sample {
        id: "3",
        title: "Sony WH-1000XM5 Headphones",
        price: 350.0,
        description: "Industry leading noise canceling headphones. \
                      Silver color. Used for 2 months.",
        category: Category::Accessories,
        image_url: "https://picsum.photos/id/21/600/400",
        age_hours: 12,
    },
];

/// The fixed seed set, with `createdAt` stamped relative to `now`.
pub fn sample_products(now: DateTime<Utc>) -> DomainResult<Vec<Product>> {
    SAMPLES
        .iter()
        .map(|s| {
            Product::new(
                s.id.parse()?,
                ProductDetails {
                    title: s.title.to_string(),
                    price: Price::new(s.price)?,
                    description: s.description.to_string(),
                    category: s.category,
                    image_url: s.image_url.to_string(),
                    seller_contact_handle: ContactHandle::parse(SAMPLE_CONTACT)?,
                },
                now - Duration::hours(s.age_hours),
            )
        })
        .collect()
}
