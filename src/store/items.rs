//! Menu item repository.
//!
//! Items are the leaf entity: every item references exactly one category,
//! checked before commit. Listings join the category table so ordering is
//! by `(category.name, item.name)` — what the customer menu and the admin
//! list both want — not by the raw foreign key.

use super::{Result, StoreError, column_decode};
use crate::model::{FieldError, FieldErrors, ItemFilter, MenuItem, MenuItemInput, SpiceLevel};
use crate::store::categories;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use std::str::FromStr;
use tracing::info;

fn from_row(row: &SqliteRow) -> std::result::Result<MenuItem, sqlx::Error> {
    let price: String = row.try_get("price")?;
    let price = Decimal::from_str(&price).map_err(|e| column_decode("price", e))?;

    let spice_level = row
        .try_get::<Option<String>, _>("spice_level")?
        .map(|raw| {
            SpiceLevel::parse(&raw).ok_or_else(|| {
                column_decode(
                    "spice_level",
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("unknown spice level: {raw}"),
                    ),
                )
            })
        })
        .transpose()?;

    Ok(MenuItem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        category_id: row.try_get("category_id")?,
        price,
        image: row.try_get("image")?,
        is_available: row.try_get("is_available")?,
        spice_level,
        is_vegetarian: row.try_get("is_vegetarian")?,
        preparation_time: row.try_get("preparation_time")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Items matching `filter`, ordered by `(category.name, item.name)`.
///
/// The two filter options are independent: either, both, or neither may be
/// set, and an absent option imposes no restriction.
pub async fn list(pool: &SqlitePool, filter: &ItemFilter) -> Result<Vec<MenuItem>> {
    let mut sql = String::from(
        "SELECT i.* FROM menu_items i \
         JOIN categories c ON c.id = i.category_id",
    );
    let mut clauses: Vec<&str> = Vec::new();
    if filter.category_id.is_some() {
        clauses.push("i.category_id = ?");
    }
    if filter.availability.is_some() {
        clauses.push("i.is_available = ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY c.name, i.name");

    let mut query = sqlx::query(&sql);
    if let Some(category_id) = filter.category_id {
        query = query.bind(category_id);
    }
    if let Some(available) = filter.availability {
        query = query.bind(available);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(|r| from_row(r).map_err(Into::into)).collect()
}

/// Fetch one item by id.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<MenuItem> {
    let row = sqlx::query("SELECT * FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::item_not_found(id))?;
    from_row(&row).map_err(Into::into)
}

/// Check everything the typed input can still violate, collecting all of it.
///
/// String coercion already happened in [`crate::model::MenuItemForm::parse`];
/// this is the store-side gate: required text present, price non-negative,
/// and the referenced category actually exists.
async fn validate(pool: &SqlitePool, input: &MenuItemInput) -> Result<()> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(FieldError::new("name", "this field is required"));
    }
    if input.description.trim().is_empty() {
        errors.push(FieldError::new("description", "this field is required"));
    }
    if input.price.is_sign_negative() {
        errors.push(FieldError::new("price", "must not be negative"));
    }
    if !categories::exists(pool, input.category_id).await? {
        errors.push(FieldError::new("category", "no such category"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(FieldErrors(errors)))
    }
}

/// Persist a new item. Both timestamps are set to the operation time.
pub async fn create(pool: &SqlitePool, input: &MenuItemInput) -> Result<MenuItem> {
    validate(pool, input).await?;

    let now = Utc::now();
    let done = sqlx::query(
        "INSERT INTO menu_items \
         (name, description, category_id, price, is_available, spice_level, \
          is_vegetarian, preparation_time, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.category_id)
    .bind(input.price.to_string())
    .bind(input.is_available)
    .bind(input.spice_level.map(|l| l.as_str()))
    .bind(input.is_vegetarian)
    .bind(input.preparation_time)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = done.last_insert_rowid();
    info!(id, name = %input.name, "menu item created");
    get(pool, id).await
}

/// Re-validate and overwrite every mutable field. Refreshes `updated_at`;
/// `created_at` is never touched.
pub async fn update(pool: &SqlitePool, id: i64, input: &MenuItemInput) -> Result<MenuItem> {
    validate(pool, input).await?;

    let done = sqlx::query(
        "UPDATE menu_items SET \
         name = ?, description = ?, category_id = ?, price = ?, is_available = ?, \
         spice_level = ?, is_vegetarian = ?, preparation_time = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.category_id)
    .bind(input.price.to_string())
    .bind(input.is_available)
    .bind(input.spice_level.map(|l| l.as_str()))
    .bind(input.is_vegetarian)
    .bind(input.preparation_time)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;
    if done.rows_affected() == 0 {
        return Err(StoreError::item_not_found(id));
    }

    info!(id, name = %input.name, "menu item updated");
    get(pool, id).await
}

/// Remove one item. No cascade — this is the leaf.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let done = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(StoreError::item_not_found(id));
    }
    info!(id, "menu item deleted");
    Ok(())
}

/// Flip `is_available` and return the new state.
///
/// The read-modify-write is a single UPDATE, so two concurrent toggles on
/// the same row serialize at the database and the final state always
/// reflects the exact number of flips — no lost update window.
pub async fn toggle_availability(pool: &SqlitePool, id: i64) -> Result<bool> {
    let row = sqlx::query(
        "UPDATE menu_items \
         SET is_available = NOT is_available, updated_at = ? \
         WHERE id = ? \
         RETURNING is_available",
    )
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::item_not_found(id))?;
    let available: bool = row.try_get("is_available")?;
    info!(id, available, "availability toggled");
    Ok(available)
}

/// Record the stored asset path for an item's image. Refreshes `updated_at`
/// because attaching an image is part of the same logical save.
pub async fn set_image(pool: &SqlitePool, id: i64, path: &str) -> Result<()> {
    let done = sqlx::query("UPDATE menu_items SET image = ?, updated_at = ? WHERE id = ?")
        .bind(path)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(StoreError::item_not_found(id));
    }
    Ok(())
}

/// Total number of items.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

/// Number of items with the given availability.
pub async fn count_by_availability(pool: &SqlitePool, available: bool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE is_available = ?")
        .bind(available)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

/// Most recently updated items first, for the admin dashboard.
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<MenuItem>> {
    let rows = sqlx::query("SELECT * FROM menu_items ORDER BY updated_at DESC, id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.iter().map(|r| from_row(r).map_err(Into::into)).collect()
}
