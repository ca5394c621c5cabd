//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.products().find_by_category(Category::Tools)               │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── create(&mut product)      INSERT, writes id back                  │
//! │  ├── update(&product)          UPDATE by id                            │
//! │  ├── delete(&product)          DELETE by id                            │
//! │  ├── all() / find(id)          SELECT                                  │
//! │  └── find_by_*(value)          ProductQuery (lazy)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and lookups

pub mod product;
