//! # catalog-core: Product Domain Model
//!
//! Domain types for the product catalog. Everything here is pure: no
//! database, no network, no file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   price   │  │ validation │  │  error   │  │   │
//! │  │   │  Product  │  │   Price   │  │ JSON field │  │ DataVal- │  │   │
//! │  │   │  Category │  │  ToPrice  │  │  readers   │  │ idation  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │          SQLite pool, migrations, ProductRepository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product` and `Category`
//! - [`price`] - Fixed-precision `Price` and the canonical `ToPrice` coercion
//! - [`validation`] - Typed field readers for structured (JSON) input
//! - [`error`] - `DataValidationError`
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{Category, Price, Product};
//!
//! let hat = Product::new(
//!     "Fedora",
//!     Some("A red hat".to_string()),
//!     Price::from_cents(1250),
//!     true,
//!     Category::Cloths,
//! );
//!
//! assert_eq!(hat.to_string(), "<Product Fedora id=[None]>");
//! assert_eq!(hat.price.to_string(), "12.50");
//! ```

pub mod error;
pub mod price;
pub mod types;
pub mod validation;

pub use error::{DataValidationError, ValidationResult};
pub use price::{Price, ToPrice};
pub use types::*;
