//! # Product Factory
//!
//! Generates realistic, unpersisted products for the seed binary and tests.
//!
//! ## Generated Products
//! - Name from a small pool, so name collisions are common
//! - Short description
//! - Price: 0.50 - 2000.00
//! - Random availability
//! - Any category except `UNKNOWN`
//!
//! Output is a pure function of `(seed, sequence)`: the same seed always
//! yields the same products, which keeps test failures reproducible.

use catalog_core::{Category, Price, Product};

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const DESCRIPTIONS: &[&str] = &[
    "Everyday essential",
    "Limited edition",
    "Best seller this season",
    "Imported, ships in two days",
    "Customer favourite",
    "Clearance item",
    "Eco-friendly materials",
];

const CATEGORIES: &[Category] = &[
    Category::Cloths,
    Category::Food,
    Category::Housewares,
    Category::Automotive,
    Category::Tools,
];

const MIN_PRICE_CENTS: u64 = 50;
const MAX_PRICE_CENTS: u64 = 200_000;

/// Deterministic source of fake products.
///
/// ## Usage
/// ```rust
/// use catalog_db::ProductFactory;
///
/// let mut factory = ProductFactory::new(7);
/// let product = factory.build();
/// assert!(product.id.is_none());
///
/// let five: Vec<_> = ProductFactory::new(7).take(5).collect();
/// assert_eq!(five[0], product);
/// ```
#[derive(Debug, Clone)]
pub struct ProductFactory {
    seed: u64,
    sequence: u64,
}

impl ProductFactory {
    pub fn new(seed: u64) -> Self {
        ProductFactory { seed, sequence: 0 }
    }

    /// Builds the next product in the sequence.
    pub fn build(&mut self) -> Product {
        let base = self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ self.sequence;
        self.sequence += 1;

        let name = NAMES[pick(base, 1, NAMES.len())];
        let description = DESCRIPTIONS[pick(base, 2, DESCRIPTIONS.len())];
        let span = MAX_PRICE_CENTS - MIN_PRICE_CENTS + 1;
        let price_cents = MIN_PRICE_CENTS + mix(base, 3) % span;
        let available = mix(base, 4) & 1 == 1;
        let category = CATEGORIES[pick(base, 5, CATEGORIES.len())];

        Product::new(
            name,
            Some(description.to_string()),
            Price::from_cents(price_cents as i64),
            available,
            category,
        )
    }
}

impl Iterator for ProductFactory {
    type Item = Product;

    fn next(&mut self) -> Option<Product> {
        Some(self.build())
    }
}

/// splitmix64 finalizer over `base` and a per-field salt.
fn mix(base: u64, salt: u64) -> u64 {
    let mut z = base.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn pick(base: u64, salt: u64, len: usize) -> usize {
    (mix(base, salt) % len as u64) as usize
}
