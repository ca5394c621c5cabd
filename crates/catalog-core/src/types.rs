//! # Domain Types
//!
//! The catalog's persisted entity and its classification enum.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────┐                  │
//! │  │      Product        │          │    Category     │                  │
//! │  │  ─────────────────  │          │  ─────────────  │                  │
//! │  │  id: Option<i64>    │          │  UNKNOWN        │                  │
//! │  │  name               │   uses   │  CLOTHS         │                  │
//! │  │  description?       │ ───────► │  FOOD           │                  │
//! │  │  price: Price       │          │  HOUSEWARES     │                  │
//! │  │  available: bool    │          │  AUTOMOTIVE     │                  │
//! │  │  category           │          │  TOOLS          │                  │
//! │  └─────────────────────┘          └─────────────────┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` until the repository inserts the product; the database
//! assigns it. The repository never reads an id from structured input.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{DataValidationError, ValidationResult};
use crate::price::{Price, ToPrice};
use crate::validation::{read_bool, read_optional_str, read_str, read_value};

// =============================================================================
// Category
// =============================================================================

/// Product classification.
///
/// Stored by variant name (`"CLOTHS"`), which is also the JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// The stored name of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks a category up by its exact stored name.
impl FromStr for Category {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DataValidationError::InvalidCategory(s.to_string()))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Database-assigned identifier; `None` before create.
    #[serde(skip_deserializing)]
    pub id: Option<i64>,

    pub name: String,

    pub description: Option<String>,

    /// Two-decimal price, stored as integer cents.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    #[ts(type = "string")]
    pub price: Price,

    pub available: bool,

    pub category: Category,
}

impl Product {
    /// Creates an unpersisted product.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Price,
        available: bool,
        category: Category,
    ) -> Self {
        Product {
            id: None,
            name: name.into(),
            description,
            price,
            available,
            category,
        }
    }

    /// Converts the product into its structured-data form.
    ///
    /// ## Shape
    /// ```text
    /// {
    ///   "id": 7 | null,
    ///   "name": "Fedora",
    ///   "description": "A red hat" | null,
    ///   "price": "12.50",
    ///   "available": true,
    ///   "category": "CLOTHS"
    /// }
    /// ```
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.as_str(),
        })
    }

    /// Builds an unpersisted product from structured data.
    ///
    /// Any `id` in the input is ignored.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Category, Product};
    /// use serde_json::json;
    ///
    /// let product = Product::from_json(&json!({
    ///     "name": "Hammer",
    ///     "description": "Claw hammer",
    ///     "price": "29",
    ///     "available": true,
    ///     "category": "TOOLS",
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(product.id, None);
    /// assert_eq!(product.category, Category::Tools);
    /// assert_eq!(product.price.cents(), 2900);
    /// ```
    pub fn from_json(data: &Value) -> ValidationResult<Self> {
        let mut product = Product::new(String::new(), None, Price::zero(), false, Category::Unknown);
        product.apply_json(data)?;
        Ok(product)
    }

    /// Overwrites this product's fields from structured data.
    ///
    /// The id is left untouched, so a persisted product can be edited in
    /// place and then passed to the repository's `update`. On error the
    /// product is unchanged.
    ///
    /// ## Errors
    /// - [`DataValidationError::InvalidBody`] - `data` is not an object
    /// - [`DataValidationError::MissingField`] - name, price, available or
    ///   category absent
    /// - [`DataValidationError::InvalidType`] - wrong JSON type
    /// - [`DataValidationError::InvalidCategory`] - unknown category name
    /// - [`DataValidationError::InvalidPrice`] - price not coercible
    pub fn apply_json(&mut self, data: &Value) -> ValidationResult<()> {
        let object = data.as_object().ok_or(DataValidationError::InvalidBody)?;

        let name = read_str(object, "name")?;
        let description = read_optional_str(object, "description")?;
        let price = match read_value(object, "price")? {
            Value::String(text) => text.to_price()?,
            Value::Number(number) => number.to_string().to_price()?,
            _ => return Err(DataValidationError::invalid_type("price", "decimal")),
        };
        let available = read_bool(object, "available")?;
        let category = read_str(object, "category")?.parse::<Category>()?;

        self.name = name.to_string();
        self.description = description.map(str::to_string);
        self.price = price;
        self.available = available;
        self.category = category;
        Ok(())
    }
}

/// `<Product {name} id=[{id}]>`, with `None` for an unpersisted product.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fedora() -> Product {
        Product::new(
            "Fedora",
            Some("A red hat".to_string()),
            12.50_f64.to_price().unwrap(),
            true,
            Category::Cloths,
        )
    }

    #[test]
    fn test_create_a_product_in_memory() {
        let product = fedora();
        assert_eq!(product.to_string(), "<Product Fedora id=[None]>");
        assert_eq!(product.id, None);
        assert_eq!(product.name, "Fedora");
        assert_eq!(product.description.as_deref(), Some("A red hat"));
        assert!(product.available);
        assert_eq!(product.price, "12.50".to_price().unwrap());
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn test_display_with_id() {
        let mut product = fedora();
        product.id = Some(42);
        assert_eq!(product.to_string(), "<Product Fedora id=[42]>");
    }

    #[test]
    fn test_category_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.as_str());
        }
        assert_eq!(
            "SHOES".parse::<Category>(),
            Err(DataValidationError::InvalidCategory("SHOES".to_string()))
        );
        assert!("cloths".parse::<Category>().is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let mut product = fedora();
        product.id = Some(3);
        assert_eq!(
            product.to_json(),
            json!({
                "id": 3,
                "name": "Fedora",
                "description": "A red hat",
                "price": "12.50",
                "available": true,
                "category": "CLOTHS",
            })
        );
        assert_eq!(serde_json::to_value(&product).unwrap(), product.to_json());
    }

    #[test]
    fn test_from_json_ignores_id_and_reads_fields() {
        let product = Product::from_json(&json!({
            "id": 99,
            "name": "Fedora",
            "description": "A red hat",
            "price": 12.5,
            "available": true,
            "category": "CLOTHS",
        }))
        .unwrap();

        assert_eq!(product, fedora());
    }

    #[test]
    fn test_from_json_optional_description() {
        let product = Product::from_json(&json!({
            "name": "Wrench",
            "price": "7",
            "available": false,
            "category": "TOOLS",
        }))
        .unwrap();
        assert_eq!(product.description, None);

        let product = Product::from_json(&json!({
            "name": "Wrench",
            "description": null,
            "price": "7",
            "available": false,
            "category": "TOOLS",
        }))
        .unwrap();
        assert_eq!(product.description, None);
        assert_eq!(product.price.cents(), 700);
    }

    #[test]
    fn test_from_json_errors() {
        let base = json!({
            "name": "Pots",
            "description": "Copper",
            "price": "10.00",
            "available": true,
            "category": "HOUSEWARES",
        });

        let mut missing = base.clone();
        missing.as_object_mut().unwrap().remove("name");
        assert_eq!(
            Product::from_json(&missing),
            Err(DataValidationError::missing("name"))
        );

        let mut bad_bool = base.clone();
        bad_bool["available"] = json!("yes");
        assert_eq!(
            Product::from_json(&bad_bool),
            Err(DataValidationError::invalid_type("available", "boolean"))
        );

        let mut bad_category = base.clone();
        bad_category["category"] = json!("GARDEN");
        assert_eq!(
            Product::from_json(&bad_category),
            Err(DataValidationError::InvalidCategory("GARDEN".to_string()))
        );

        let mut bad_price = base.clone();
        bad_price["price"] = json!("ten");
        assert!(matches!(
            Product::from_json(&bad_price),
            Err(DataValidationError::InvalidPrice { .. })
        ));

        assert_eq!(
            Product::from_json(&json!([1, 2, 3])),
            Err(DataValidationError::InvalidBody)
        );
    }

    #[test]
    fn test_apply_json_keeps_id_and_is_atomic() {
        let mut product = fedora();
        product.id = Some(5);

        let err = product.apply_json(&json!({
            "name": "Changed",
            "price": "1.00",
            "available": "nope",
            "category": "FOOD",
        }));
        assert!(err.is_err());
        assert_eq!(product.name, "Fedora");

        product
            .apply_json(&json!({
                "name": "Banana",
                "description": "Yellow",
                "price": "0.25",
                "available": false,
                "category": "FOOD",
            }))
            .unwrap();
        assert_eq!(product.id, Some(5));
        assert_eq!(product.name, "Banana");
        assert_eq!(product.price.cents(), 25);
        assert_eq!(product.category, Category::Food);
    }

    #[test]
    fn test_json_round_trip() {
        let mut product = fedora();
        product.id = Some(11);
        let mut restored = Product::from_json(&product.to_json()).unwrap();
        restored.id = product.id;
        assert_eq!(restored, product);
    }

    #[test]
    fn test_deserialize_never_takes_id() {
        let product: Product = serde_json::from_value(json!({
            "id": 99,
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": true,
            "category": "CLOTHS",
        }))
        .unwrap();

        assert_eq!(product.id, None);
        assert_eq!(product, fedora());
    }
}
