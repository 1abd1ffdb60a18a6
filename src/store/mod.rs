//! Repositories for the two tables. All SQL lives here.
//!
//! The stores take and return plain [`crate::model`] records — callers never
//! see rows, connections, or half-loaded associations. Every mutation is
//! all-or-nothing: single statements for single-record changes, an explicit
//! transaction for the category cascade.
//!
//! Error taxonomy:
//! - [`StoreError::Validation`] — bad, missing, or duplicate field values;
//!   nothing was written. Carries one message per violated field.
//! - [`StoreError::NotFound`] — the target id does not exist.
//! - [`StoreError::Database`] — anything sqlx reports that isn't one of the
//!   above.

pub mod categories;
pub mod items;

use crate::model::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub(crate) fn category_not_found(id: i64) -> Self {
        StoreError::NotFound {
            entity: "category",
            id,
        }
    }

    pub(crate) fn item_not_found(id: i64) -> Self {
        StoreError::NotFound {
            entity: "menu item",
            id,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Wrap a column value that failed to parse back into a typed record.
///
/// Only reachable when a row was written outside this crate — the input
/// types make it impossible to persist an unparsable price or spice level.
pub(crate) fn column_decode(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
