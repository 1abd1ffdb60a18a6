//! SQLite pool construction and schema bootstrap.
//!
//! The schema is two tables. Referential integrity is enforced at the
//! database (`foreign_keys` pragma) *and* checked explicitly in the store so
//! a dangling category id comes back as a field-level validation error, not
//! a constraint violation. The category → item cascade is deliberately not
//! delegated to `ON DELETE CASCADE`: it is an explicit, tested step in
//! [`crate::store::categories::delete`].

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS categories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS menu_items (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    name             TEXT NOT NULL,
    description      TEXT NOT NULL,
    category_id      INTEGER NOT NULL REFERENCES categories(id),
    price            TEXT NOT NULL,
    image            TEXT,
    is_available     INTEGER NOT NULL DEFAULT 1,
    spice_level      TEXT,
    is_vegetarian    INTEGER NOT NULL DEFAULT 0,
    preparation_time INTEGER,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_menu_items_category ON menu_items(category_id);
";

/// Open (creating if missing) the database at `url` and apply the schema.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Apply the schema to an existing pool. Idempotent.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
