//! Category repository.
//!
//! Categories are the parent entity: names are unique, listings are always
//! ordered by name, and deletion cascades to the items referencing the
//! category — explicitly, inside one transaction, so concurrent readers see
//! either the whole subtree or none of it.

use super::{Result, StoreError};
use crate::model::{Category, CategoryInput, CategoryWithCount, FieldError, FieldErrors};
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use tracing::info;

fn from_row(row: &SqliteRow) -> std::result::Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// All categories, ordered by name ascending.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>> {
    let rows = sqlx::query("SELECT * FROM categories ORDER BY name")
        .fetch_all(pool)
        .await?;
    rows.iter().map(|r| from_row(r).map_err(Into::into)).collect()
}

/// All categories ordered by name, each with its computed item count.
pub async fn list_with_counts(pool: &SqlitePool) -> Result<Vec<CategoryWithCount>> {
    let rows = sqlx::query(
        "SELECT c.*, COUNT(i.id) AS item_count \
         FROM categories c \
         LEFT JOIN menu_items i ON i.category_id = c.id \
         GROUP BY c.id \
         ORDER BY c.name",
    )
    .fetch_all(pool)
    .await?;
    rows.iter()
        .map(|row| {
            Ok(CategoryWithCount {
                category: from_row(row)?,
                item_count: row.try_get("item_count")?,
            })
        })
        .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
        .map_err(Into::into)
}

/// Fetch one category by id.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Category> {
    let row = sqlx::query("SELECT * FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::category_not_found(id))?;
    from_row(&row).map_err(Into::into)
}

/// True if the category exists. Used by the item store's validation.
pub(crate) async fn exists(pool: &SqlitePool, id: i64) -> std::result::Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await
}

async fn name_taken(
    pool: &SqlitePool,
    name: &str,
    exclude_id: Option<i64>,
) -> std::result::Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ? AND id != IFNULL(?, -1))",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_one(pool)
    .await
}

fn duplicate_name() -> StoreError {
    StoreError::Validation(FieldErrors(vec![FieldError::new(
        "name",
        "a category with this name already exists",
    )]))
}

fn validate(input: &CategoryInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(StoreError::Validation(FieldErrors(vec![FieldError::new(
            "name",
            "this field is required",
        )])));
    }
    Ok(())
}

/// Persist a new category. `created_at` is set to the operation time.
pub async fn create(pool: &SqlitePool, input: &CategoryInput) -> Result<Category> {
    validate(input)?;
    if name_taken(pool, &input.name, None).await? {
        return Err(duplicate_name());
    }

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO categories (name, description, created_at) VALUES (?, ?, ?)",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(now)
    .execute(pool)
    .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        // The pre-check races with concurrent inserts; the UNIQUE constraint
        // is the authority and its violation is still a duplicate name.
        Err(e) if is_unique_violation(&e) => return Err(duplicate_name()),
        Err(e) => return Err(e.into()),
    };

    info!(id, name = %input.name, "category created");
    get(pool, id).await
}

/// Update name/description. `created_at` is never touched.
pub async fn update(pool: &SqlitePool, id: i64, input: &CategoryInput) -> Result<Category> {
    validate(input)?;
    // Existence first so an unknown id reports NotFound, not a name clash.
    get(pool, id).await?;
    if name_taken(pool, &input.name, Some(id)).await? {
        return Err(duplicate_name());
    }

    let result = sqlx::query("UPDATE categories SET name = ?, description = ? WHERE id = ?")
        .bind(&input.name)
        .bind(&input.description)
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => return Err(duplicate_name()),
        Err(e) => return Err(e.into()),
    }

    info!(id, name = %input.name, "category updated");
    get(pool, id).await
}

/// Delete a category and every menu item referencing it.
///
/// Destructive and irreversible — callers confirm before invoking. The
/// cascade runs in one transaction: either the category and all of its
/// items are removed, or nothing is.
///
/// Returns the number of items removed by the cascade.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let items_removed = sqlx::query("DELETE FROM menu_items WHERE category_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed == 0 {
        // Implicit rollback on drop; nothing was committed.
        return Err(StoreError::category_not_found(id));
    }

    tx.commit().await?;
    info!(id, items_removed, "category deleted");
    Ok(items_removed)
}

/// Total number of categories.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|d| d.is_unique_violation())
}
