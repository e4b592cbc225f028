//! # Catalog Seeder
//!
//! Fills a development database with a catalog of products.
//!
//! ## Usage
//! ```bash
//! # 200 products (default) into ./storefront.db
//! cargo run -p storefront-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p storefront-db --bin seed -- --count 1000 --db ./data/dev.db
//! ```
//!
//! Names are `{item} {size}`; prices run from $0.99 upward with a size
//! surcharge. Products go through insert-or-get, so re-running against a
//! partial catalog never creates duplicates.

use std::env;
use storefront_core::{Money, ProductInput};
use storefront_db::migrations::migration_status;
use storefront_db::{Database, DbConfig};

const DEFAULT_COUNT: usize = 200;
const DEFAULT_DB_PATH: &str = "./storefront.db";

/// Rows sent per insert-or-get transaction.
const BATCH_SIZE: usize = 100;

const ITEMS: &[&str] = &[
    "Green Tea",
    "Black Tea",
    "Espresso Beans",
    "Filter Coffee",
    "Hot Chocolate",
    "Oat Milk",
    "Almond Milk",
    "Butter Croissant",
    "Blueberry Muffin",
    "Banana Bread",
    "Dark Chocolate",
    "Sea Salt Crackers",
    "Honey Jar",
    "Strawberry Jam",
    "Peanut Butter",
    "Granola",
    "Ceramic Mug",
    "Travel Tumbler",
    "Tea Infuser",
    "French Press",
];

/// Size label and surcharge in cents.
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Regular", 150),
    ("Large", 300),
    ("Family", 650),
    ("Bulk", 1200),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront catalog seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {})", DEFAULT_COUNT);
                println!("  -d, --db <PATH>    Database file path (default: {})", DEFAULT_DB_PATH);
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront catalog seeder");
    println!("=========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Connected, {}/{} migrations applied", applied, total);

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let catalog = generate_catalog(count);

    let mut generated = 0;
    for batch in catalog.chunks(BATCH_SIZE) {
        let stored = db.products().insert_or_get(batch).await?;
        generated += stored.len();
        println!("  Stored {} products...", generated);
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Stored {} products in {:?}", generated, elapsed);

    let hits = db.products().search("Tea").await?;
    println!("  Search 'Tea': {} results", hits.len());

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds up to `count` distinct product inputs.
///
/// Once every item/size pair is used, a numbered edition suffix keeps
/// names unique.
fn generate_catalog(count: usize) -> Vec<ProductInput> {
    let pairs = ITEMS.len() * SIZES.len();

    (0..count)
        .map(|seed| {
            let item = ITEMS[seed % ITEMS.len()];
            let (size, surcharge) = SIZES[(seed / ITEMS.len()) % SIZES.len()];
            let edition = seed / pairs;

            let name = if edition == 0 {
                format!("{} {}", item, size)
            } else {
                format!("{} {} #{}", item, size, edition + 1)
            };

            // $0.99 - $8.98 base, plus size surcharge
            let base = 99 + ((seed * 37) % 800) as i64;

            ProductInput::new(name, Money::from_cents(base + surcharge))
        })
        .collect()
}
