//! # catalog-db: Database Layer for the Product Catalog
//!
//! Persists [`catalog_core::Product`] values in SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  Caller (service, seed binary, tests)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_products │  │   │
//! │  │   │ DbConfig      │    │ ProductQuery  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (file or :memory:)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven configuration
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `ProductRepository` and lazy `ProductQuery`
//! - [`factory`] - Deterministic fake products for seeding and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::{Category, Price, Product};
//! use catalog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sqlite://catalog.db?mode=rwc")).await?;
//! let products = db.products();
//!
//! let mut hat = Product::new("Fedora", None, Price::from_cents(1250), true, Category::Cloths);
//! products.create(&mut hat).await?;
//!
//! let cloths = products.find_by_category(Category::Cloths);
//! assert_eq!(cloths.count().await?, 1);
//!
//! db.close().await;
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use config::{CatalogConfig, ConfigError};
pub use error::{DbError, DbResult};
pub use factory::ProductFactory;
pub use pool::{Database, DbConfig};
pub use repository::product::{ProductFilter, ProductQuery, ProductRepository};
