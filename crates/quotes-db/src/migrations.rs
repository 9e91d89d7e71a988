//! # Database Migrations
//!
//! Embedded SQL migrations for Quotebook.
//!
//! ## Schema History
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  001_initial_schema.sql                                                │
//! │  ├── authors (id, name UNIQUE NOT NULL)                                │
//! │  └── quotes  (id, author_id → authors ON DELETE CASCADE, text)         │
//! │                                                                         │
//! │  002_add_quote_rating.sql                                              │
//! │  └── quotes.rating INTEGER NOT NULL DEFAULT 1                          │
//! │                     CHECK (rating >= 1 AND rating <= 5)                │
//! │                                                                         │
//! │  Applied migrations are recorded in _sqlx_migrations                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Each migration runs in its own transaction, in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
