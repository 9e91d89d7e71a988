//! # Sample Data Loader
//!
//! Loads the sample quotes into a SQLite database for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./quotes.db (default)
//! cargo run -p quotes-db --bin seed
//!
//! # Specify database path
//! cargo run -p quotes-db --bin seed -- --db ./data/quotes.db
//! ```
//!
//! The database is created and migrated if needed. A database that already
//! holds quotes is left untouched.

use std::env;

use quotes_db::{seed, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./quotes.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Quotebook Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./quotes.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Quotebook Seed Data Loader");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let quotes = db.quotes();
    let inserted = seed::seed_if_empty(&quotes).await?;

    if inserted == 0 {
        println!("⚠ Database already has quotes");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!("✓ Inserted {} quotes", inserted);
    }

    db.close().await;
    Ok(())
}
