//! Customer view aggregation.
//!
//! Read-only: every category ordered by name, each with its items eagerly
//! loaded, plus the QR image for the public menu URL. Two queries total —
//! one per table — grouped in memory; no per-category round trips.

use crate::model::{Category, ItemFilter, MenuItem};
use crate::qr::{self, QrError};
use crate::store::{StoreError, categories, items};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Qr(#[from] QrError),
}

/// One category and its dishes, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// Everything the customer page needs.
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub sections: Vec<MenuSection>,
    /// Inline QR image for `menu_url`, embeddable without a separate fetch.
    pub qr_data_uri: String,
}

/// Build the full customer menu.
pub async fn menu(pool: &SqlitePool, menu_url: &str) -> Result<MenuView, ViewError> {
    let all_categories = categories::list(pool).await?;
    let all_items = items::list(pool, &ItemFilter::default()).await?;

    let mut sections: Vec<MenuSection> = all_categories
        .into_iter()
        .map(|category| MenuSection {
            category,
            items: Vec::new(),
        })
        .collect();
    let index: HashMap<i64, usize> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| (section.category.id, i))
        .collect();
    // Items arrive ordered by (category.name, item.name); appending in that
    // order preserves the name order within each section.
    for item in all_items {
        if let Some(&i) = index.get(&item.category_id) {
            sections[i].items.push(item);
        }
    }

    Ok(MenuView {
        sections,
        qr_data_uri: qr::data_uri(menu_url)?,
    })
}
