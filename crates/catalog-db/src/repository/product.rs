//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD: create, update, delete, find, all
//! - Field lookups returning a lazy [`ProductQuery`]
//!
//! ## Lookup Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Lookup Executes                                │
//! │                                                                         │
//! │  repo.find_by_price("29")?                                             │
//! │       │   ToPrice coercion ──► Price(2900)                              │
//! │       ▼                                                                 │
//! │  ProductQuery { filter: Price(2900) }   ← nothing executed yet         │
//! │       │                                                                 │
//! │       ├── .count().await      SELECT COUNT(*) ... WHERE price_cents = ?│
//! │       └── .fetch_all().await  SELECT ...       WHERE price_cents = ?   │
//! │                                                                         │
//! │  Every call re-runs against the current table contents.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use catalog_core::{Category, DataValidationError, Price, Product, ToPrice};

const SELECT_PRODUCTS: &str =
    "SELECT id, name, description, price_cents, available, category FROM products";

// =============================================================================
// Lookup Filter
// =============================================================================

/// Single-column equality predicate for a [`ProductQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Name(String),
    Available(bool),
    Category(Category),
    Price(Price),
}

impl ProductFilter {
    fn column(&self) -> &'static str {
        match self {
            ProductFilter::Name(_) => "name",
            ProductFilter::Available(_) => "available",
            ProductFilter::Category(_) => "category",
            ProductFilter::Price(_) => "price_cents",
        }
    }

    /// Whether `product` satisfies this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Name(name) => &product.name == name,
            ProductFilter::Available(flag) => product.available == *flag,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Price(price) => product.price == *price,
        }
    }
}

/// Binds the filter's value as `?1` on any sqlx query builder.
macro_rules! bind_filter {
    ($query:expr, $filter:expr) => {
        match $filter {
            ProductFilter::Name(name) => $query.bind(name.as_str()),
            ProductFilter::Available(flag) => $query.bind(*flag),
            ProductFilter::Category(category) => $query.bind(*category),
            ProductFilter::Price(price) => $query.bind(*price),
        }
    };
}

// =============================================================================
// Lazy Query
// =============================================================================

/// A lookup that runs when asked.
///
/// Finite and re-iterable: `count` and `fetch_all` may be called any number
/// of times and always reflect the table as it is at that moment.
///
/// ## Usage
/// ```rust,ignore
/// let hats = repo.find_by_name("Hat");
/// let n = hats.count().await?;
/// for hat in hats.fetch_all().await? {
///     assert_eq!(hat.name, "Hat");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pool: SqlitePool,
    filter: ProductFilter,
}

impl ProductQuery {
    fn new(pool: SqlitePool, filter: ProductFilter) -> Self {
        ProductQuery { pool, filter }
    }

    /// The predicate this query applies.
    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Number of matching rows.
    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM products WHERE {} = ?1",
            self.filter.column()
        );
        let query = sqlx::query_scalar::<_, i64>(&sql);

        let count = bind_filter!(query, &self.filter)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// All matching products, ordered by id.
    pub async fn fetch_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "{} WHERE {} = ?1 ORDER BY id",
            SELECT_PRODUCTS,
            self.filter.column()
        );
        let query = sqlx::query_as::<_, Product>(&sql);

        let products = bind_filter!(query, &self.filter)
            .fetch_all(&self.pool)
            .await?;

        debug!(filter = ?self.filter, count = products.len(), "Lookup returned products");
        Ok(products)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let mut product = Product::new("Hammer", None, Price::from_cents(1999), true, Category::Tools);
/// repo.create(&mut product).await?;
///
/// product.available = false;
/// repo.update(&product).await?;
///
/// let found = repo.find(product.id.unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts the product as a new row and stores the generated id on it.
    ///
    /// Any id already on the product is ignored: calling `create` again
    /// (or after clearing the id) always adds another row. Identical field
    /// values are accepted.
    pub async fn create(&self, product: &mut Product) -> DbResult<()> {
        info!(name = %product.name, "Creating product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price_cents, available, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        product.id = Some(id);

        debug!(id, "Product created");
        Ok(())
    }

    /// Writes the product's current fields to its row.
    ///
    /// ## Returns
    /// * `Ok(())` - Row updated
    /// * `Err(DbError::Validation(MissingId))` - Product has no id; nothing written
    /// * `Err(DbError::NotFound)` - No row with that id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        info!(name = %product.name, "Saving product");
        let id = product.id.ok_or(DataValidationError::MissingId)?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                available = ?5,
                category = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Removes the product's row.
    ///
    /// ## Returns
    /// * `Ok(())` - Row deleted
    /// * `Err(DbError::Validation(MissingId))` - Product has no id
    /// * `Err(DbError::NotFound)` - Already deleted, or never existed
    pub async fn delete(&self, product: &Product) -> DbResult<()> {
        info!(name = %product.name, "Deleting product");
        let id = product.id.ok_or(DataValidationError::MissingId)?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Returns every product, ordered by id.
    pub async fn all(&self) -> DbResult<Vec<Product>> {
        info!("Processing all products");

        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCTS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Finds a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find(&self, id: i64) -> DbResult<Option<Product>> {
        info!(id, "Processing lookup for id");

        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCTS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Products whose name equals `name` exactly.
    pub fn find_by_name(&self, name: impl Into<String>) -> ProductQuery {
        let name = name.into();
        info!(name = %name, "Processing name query");
        self.query(ProductFilter::Name(name))
    }

    /// Products whose availability equals `available`.
    pub fn find_by_availability(&self, available: bool) -> ProductQuery {
        info!(available, "Processing available query");
        self.query(ProductFilter::Available(available))
    }

    /// Products in `category`.
    pub fn find_by_category(&self, category: Category) -> ProductQuery {
        info!(category = %category, "Processing category query");
        self.query(ProductFilter::Category(category))
    }

    /// Products whose price equals `price`.
    ///
    /// Accepts anything [`ToPrice`] accepts, coerced exactly as stored
    /// prices are, so `29`, `29.0` and `"29"` find the same rows.
    ///
    /// ## Errors
    /// `DbError::Validation(InvalidPrice)` when `price` is not a decimal.
    pub fn find_by_price<P: ToPrice + ?Sized>(&self, price: &P) -> DbResult<ProductQuery> {
        let price = price.to_price()?;
        info!(price = %price, "Processing price query");
        Ok(self.query(ProductFilter::Price(price)))
    }

    /// Runs an arbitrary single-column lookup.
    pub fn query(&self, filter: ProductFilter) -> ProductQuery {
        ProductQuery::new(self.pool.clone(), filter)
    }

    /// Deletes every product and returns how many rows went.
    pub async fn delete_all(&self) -> DbResult<u64> {
        info!("Deleting all products");

        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ProductFactory;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    async fn create_many(repo: &ProductRepository, seed: u64, n: usize) -> Vec<Product> {
        let mut created = Vec::with_capacity(n);
        for mut product in ProductFactory::new(seed).take(n) {
            repo.create(&mut product).await.unwrap();
            created.push(product);
        }
        created
    }

    /// Checks a lookup against a manual filter over `all()`.
    async fn assert_lookup(repo: &ProductRepository, query: ProductQuery) {
        let expected: Vec<Product> = repo
            .all()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| query.filter().matches(p))
            .collect();

        assert!(!expected.is_empty());
        assert_eq!(query.count().await.unwrap() as usize, expected.len());
        assert_eq!(query.fetch_all().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_fedora_round_trip() {
        let repo = repo().await;
        let mut product = Product::new(
            "Fedora",
            Some("A red hat".to_string()),
            12.50_f64.to_price().unwrap(),
            true,
            Category::Cloths,
        );
        assert_eq!(product.to_string(), "<Product Fedora id=[None]>");

        repo.create(&mut product).await.unwrap();
        let id = product.id.expect("id assigned on create");

        let found = repo.find(id).await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Fedora");
        assert_eq!(found.description.as_deref(), Some("A red hat"));
        assert_eq!(found.price, Price::parse("12.50").unwrap());
        assert!(found.available);
        assert_eq!(found.category, Category::Cloths);
        assert_eq!(found.to_string(), format!("<Product Fedora id=[{id}]>"));
    }

    #[tokio::test]
    async fn test_add_a_product() {
        let repo = repo().await;
        assert!(repo.all().await.unwrap().is_empty());

        let mut product = ProductFactory::new(1).build();
        product.id = None;
        repo.create(&mut product).await.unwrap();
        assert!(product.id.is_some());

        let products = repo.all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0], product);
    }

    #[tokio::test]
    async fn test_read_a_product() {
        let repo = repo().await;
        let mut product = ProductFactory::new(2).build();
        repo.create(&mut product).await.unwrap();

        let found = repo.find(product.id.unwrap()).await.unwrap();
        assert_eq!(found, Some(product));
    }

    #[tokio::test]
    async fn test_find_missing_id() {
        let repo = repo().await;
        create_many(&repo, 3, 2).await;
        assert_eq!(repo.find(9_999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_a_product() {
        let repo = repo().await;
        let mut product = ProductFactory::new(4).build();
        repo.create(&mut product).await.unwrap();
        let original_id = product.id;

        product.description = Some("modified".to_string());
        repo.update(&product).await.unwrap();
        assert_eq!(product.id, original_id);

        let products = repo.all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, original_id);
        assert_eq!(products[0].description.as_deref(), Some("modified"));
        assert_eq!(products[0], product);
    }

    #[tokio::test]
    async fn test_update_on_invalid_id() {
        let repo = repo().await;
        let mut product = ProductFactory::new(5).build();
        product.id = None;

        let err = repo.update(&product).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(DataValidationError::MissingId)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = repo().await;
        let mut product = ProductFactory::new(6).build();
        product.id = Some(404);

        let err = repo.update(&product).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_a_product() {
        let repo = repo().await;
        let mut product = ProductFactory::new(7).build();
        repo.create(&mut product).await.unwrap();
        assert_eq!(repo.all().await.unwrap().len(), 1);

        repo.delete(&product).await.unwrap();
        assert_eq!(repo.all().await.unwrap().len(), 0);
        assert_eq!(repo.find(product.id.unwrap()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let repo = repo().await;
        let created = create_many(&repo, 8, 4).await;

        repo.delete(&created[2]).await.unwrap();

        let remaining: Vec<_> = repo.all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![created[0].id, created[1].id, created[3].id]);
    }

    #[tokio::test]
    async fn test_delete_twice_and_without_id() {
        let repo = repo().await;
        let mut product = ProductFactory::new(9).build();
        repo.create(&mut product).await.unwrap();
        repo.delete(&product).await.unwrap();

        let err = repo.delete(&product).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        product.id = None;
        let err = repo.delete(&product).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(DataValidationError::MissingId)));
    }

    #[tokio::test]
    async fn test_create_again_makes_new_row() {
        let repo = repo().await;
        let mut product = ProductFactory::new(10).build();
        repo.create(&mut product).await.unwrap();
        let first_id = product.id;

        product.id = None;
        repo.create(&mut product).await.unwrap();
        assert_ne!(product.id, first_id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = repo().await;
        let created = create_many(&repo, 11, 3).await;
        repo.delete(&created[2]).await.unwrap();

        let mut next = ProductFactory::new(12).build();
        repo.create(&mut next).await.unwrap();
        assert!(next.id > created[2].id);
    }

    #[tokio::test]
    async fn test_list_all_products() {
        let repo = repo().await;
        assert_eq!(repo.all().await.unwrap().len(), 0);

        create_many(&repo, 13, 5).await;
        assert_eq!(repo.all().await.unwrap().len(), 5);
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_find_product_by_name() {
        let repo = repo().await;
        create_many(&repo, 14, 5).await;

        let products = repo.all().await.unwrap();
        assert_eq!(products.len(), 5);
        let first_name = products[0].name.clone();

        let query = repo.find_by_name(first_name.as_str());
        for product in query.fetch_all().await.unwrap() {
            assert_eq!(product.name, first_name);
        }
        assert_lookup(&repo, query).await;
    }

    #[tokio::test]
    async fn test_find_by_name_with_duplicates() {
        let repo = repo().await;
        for available in [true, false, true] {
            let mut product =
                Product::new("Towels", None, Price::from_cents(899), available, Category::Housewares);
            repo.create(&mut product).await.unwrap();
        }
        let mut other = Product::new("Pots", None, Price::from_cents(899), true, Category::Housewares);
        repo.create(&mut other).await.unwrap();

        assert_eq!(repo.find_by_name("Towels").count().await.unwrap(), 3);
        assert_eq!(repo.find_by_name("towels").count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_product_by_availability() {
        let repo = repo().await;
        create_many(&repo, 15, 10).await;

        let products = repo.all().await.unwrap();
        assert_eq!(products.len(), 10);

        let query = repo.find_by_availability(products[0].available);
        for product in query.fetch_all().await.unwrap() {
            assert_eq!(product.available, products[0].available);
        }
        assert_lookup(&repo, query).await;
    }

    #[tokio::test]
    async fn test_find_product_by_category() {
        let repo = repo().await;
        create_many(&repo, 16, 10).await;

        let products = repo.all().await.unwrap();
        assert_eq!(products.len(), 10);

        let query = repo.find_by_category(products[0].category);
        for product in query.fetch_all().await.unwrap() {
            assert_eq!(product.category, products[0].category);
        }
        assert_lookup(&repo, query).await;
    }

    #[tokio::test]
    async fn test_find_product_by_price() {
        let repo = repo().await;
        create_many(&repo, 17, 10).await;

        let products = repo.all().await.unwrap();
        assert_eq!(products.len(), 10);

        let query = repo.find_by_price(&products[0].price).unwrap();
        for product in query.fetch_all().await.unwrap() {
            assert_eq!(product.price, products[0].price);
        }
        assert_lookup(&repo, query).await;
    }

    #[tokio::test]
    async fn test_find_by_price_accepts_text_and_numbers() {
        let repo = repo().await;
        create_many(&repo, 18, 3).await;

        let mut product = ProductFactory::new(19).build();
        repo.create(&mut product).await.unwrap();
        product.price = 29_i64.to_price().unwrap();
        repo.update(&product).await.unwrap();
        assert_eq!(product.price, Price::from_cents(2900));

        let by_text = repo.find_by_price("29").unwrap().fetch_all().await.unwrap();
        let by_int = repo.find_by_price(&29).unwrap().fetch_all().await.unwrap();
        let by_float = repo.find_by_price(&29.0).unwrap().fetch_all().await.unwrap();

        assert!(by_text.iter().any(|p| p.id == product.id));
        assert!(by_text.iter().all(|p| p.price == Price::from_cents(2900)));
        assert_eq!(by_text, by_int);
        assert_eq!(by_text, by_float);
    }

    #[tokio::test]
    async fn test_find_by_price_rejects_bad_text() {
        let repo = repo().await;
        let err = repo.find_by_price("twenty-nine").unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(DataValidationError::InvalidPrice { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_price_rejects_out_of_range() {
        let repo = repo().await;
        for text in ["92233720368547758.995", "-92233720368547758.995"] {
            let err = repo.find_by_price(text).unwrap_err();
            assert!(matches!(
                err,
                DbError::Validation(DataValidationError::InvalidPrice { .. })
            ));
        }
        assert!(repo.find_by_price(&u64::MAX).is_err());
    }

    #[tokio::test]
    async fn test_query_reflects_current_state() {
        let repo = repo().await;
        let tools = repo.find_by_category(Category::Tools);
        assert_eq!(tools.count().await.unwrap(), 0);

        let mut hammer = Product::new("Hammer", None, Price::from_cents(1500), true, Category::Tools);
        repo.create(&mut hammer).await.unwrap();
        assert_eq!(tools.count().await.unwrap(), 1);
        assert_eq!(tools.fetch_all().await.unwrap(), vec![hammer.clone()]);

        hammer.category = Category::Automotive;
        repo.update(&hammer).await.unwrap();
        assert_eq!(tools.count().await.unwrap(), 0);
        assert!(tools.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = repo().await;
        create_many(&repo, 20, 6).await;

        assert_eq!(repo.delete_all().await.unwrap(), 6);
        assert!(repo.all().await.unwrap().is_empty());
        assert_eq!(repo.delete_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_input_persists() {
        let repo = repo().await;
        let mut product = Product::from_json(&json!({
            "name": "Chevy",
            "description": null,
            "price": "18999.99",
            "available": false,
            "category": "AUTOMOTIVE",
        }))
        .unwrap();
        repo.create(&mut product).await.unwrap();

        let found = repo.find(product.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.description, None);
        assert_eq!(found.to_json()["price"], json!("18999.99"));
        assert_eq!(found, product);
    }
}
