//! # Seed Data Generator
//!
//! Populates the catalog with fake products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default) into $DATABASE_URI
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 1000
//!
//! # Specify database and factory seed
//! cargo run -p catalog-db --bin seed -- --db sqlite://./dev.db?mode=rwc --seed 7
//! ```

use std::env;

use catalog_core::Category;
use catalog_db::{CatalogConfig, Database, ProductFactory};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = CatalogConfig::load()?;
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = SeedOptions::parse(&args)? else {
        print_help();
        return Ok(());
    };
    if let Some(uri) = options.database_uri {
        config.database_uri = uri;
    }
    let (count, seed) = (options.count, options.seed);

    info!(database = %config.database_uri, count, seed, "Seeding catalog");

    let db = Database::new(config.db_config()).await?;
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already has products, skipping seed");
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for mut product in ProductFactory::new(seed).take(count) {
        if let Err(e) = products.create(&mut product).await {
            warn!(error = %e, name = %product.name, "Failed to insert product");
            continue;
        }
        generated += 1;
    }

    info!(generated, elapsed = ?start.elapsed(), "Products generated");

    for category in Category::ALL {
        let in_category = products.find_by_category(category).count().await?;
        info!(category = %category, count = in_category, "Category breakdown");
    }

    db.close().await;
    Ok(())
}

/// Command-line options for the seeder.
#[derive(Debug, PartialEq, Eq)]
struct SeedOptions {
    count: usize,
    seed: u64,
    database_uri: Option<String>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            count: 100,
            seed: 1,
            database_uri: None,
        }
    }
}

impl SeedOptions {
    /// Parses arguments (program name excluded). `Ok(None)` means help was asked for.
    fn parse(args: &[String]) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        let mut options = SeedOptions::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--count" | "-c" => match args.get(i + 1) {
                    Some(value) => {
                        options.count = value.parse()?;
                        i += 1;
                    }
                    None => warn!(argument = %args[i], "Missing value, keeping default count"),
                },
                "--db" | "-d" => match args.get(i + 1) {
                    Some(value) => {
                        options.database_uri = Some(value.clone());
                        i += 1;
                    }
                    None => warn!(argument = %args[i], "Missing value, keeping configured database"),
                },
                "--seed" | "-s" => match args.get(i + 1) {
                    Some(value) => {
                        options.seed = value.parse()?;
                        i += 1;
                    }
                    None => warn!(argument = %args[i], "Missing value, keeping default seed"),
                },
                "--help" | "-h" => return Ok(None),
                other => warn!(argument = other, "Ignoring unknown argument"),
            }
            i += 1;
        }

        Ok(Some(options))
    }
}

fn print_help() {
    println!("Catalog Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --count <N>    Number of products to generate (default: 100)");
    println!("  -d, --db <URI>     Database URI (default: $DATABASE_URI)");
    println!("  -s, --seed <N>     Factory seed (default: 1)");
    println!("  -h, --help         Show this help message");
}

/// Installs the tracing subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
