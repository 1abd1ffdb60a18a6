//! Shared test utilities for the carta test suite.
//!
//! Provides an isolated in-memory database per test, seed helpers for both
//! tables, and a synthetic JPEG generator for imaging tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let pool = memory_pool().await;
//! let category = seed_category(&pool, "Appetizers").await;
//! let item = seed_item(&pool, category.id, "Spring Roll", "4.50").await;
//! assert!(item.is_available);
//! ```

use std::path::Path;
use std::str::FromStr;

use image::ImageEncoder;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::db;
use crate::model::{Category, CategoryInput, MenuItem, MenuItemForm, MenuItemInput};
use crate::store::{categories, items};

// =========================================================================
// Database fixtures
// =========================================================================

/// Fresh in-memory database with the schema applied.
///
/// Capped at one connection: every `sqlite::memory:` connection is its own
/// database, so a larger pool would hand queries an empty schema.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

// =========================================================================
// Seed helpers
// =========================================================================

pub fn category_input(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        description: None,
    }
}

pub async fn seed_category(pool: &SqlitePool, name: &str) -> Category {
    categories::create(pool, &category_input(name))
        .await
        .unwrap()
}

/// A valid item input with the given essentials and defaults elsewhere.
pub fn item_input(category_id: i64, name: &str, price: &str) -> MenuItemInput {
    MenuItemInput {
        name: name.to_string(),
        description: format!("{name} description"),
        category_id,
        price: Decimal::from_str(price).unwrap(),
        is_available: true,
        spice_level: None,
        is_vegetarian: false,
        preparation_time: None,
    }
}

/// The same essentials as raw form fields, for workflow-level tests.
pub fn item_form(category_id: i64, name: &str, price: &str) -> MenuItemForm {
    MenuItemForm {
        name: name.to_string(),
        description: format!("{name} description"),
        category_id,
        price: price.to_string(),
        ..MenuItemForm::default()
    }
}

pub async fn seed_item(pool: &SqlitePool, category_id: i64, name: &str, price: &str) -> MenuItem {
    items::create(pool, &item_input(category_id, name, price))
        .await
        .unwrap()
}

// =========================================================================
// Image fixtures
// =========================================================================

/// Create a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
}
