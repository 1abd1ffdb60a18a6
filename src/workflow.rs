//! Admin workflow layer.
//!
//! Orchestrates the operations behind the admin screens: list/filter,
//! create, edit, delete, and the availability toggle. Validation runs
//! before any mutation; every successful mutation carries the
//! human-readable confirmation message the admin UI surfaces.
//!
//! The workflow owns the image pipeline: when a save carries an image
//! payload, the asset is written through to the media directory under a
//! path derived from the record id, the record is updated to point at it,
//! and the post-processor runs synchronously before the call returns.
//!
//! Access control is not handled here — an auth guard in front of the
//! admin surface decides who may call these operations; the operations
//! themselves carry no auth logic.

use crate::imaging::{DownsampleConfig, ImageBackend, ImagingError, Outcome, shrink_to_fit};
use crate::imaging::rust_backend::{SUPPORTED_EXTENSIONS, is_supported};
use crate::model::{
    Category, CategoryForm, CategoryWithCount, FieldError, FieldErrors, ItemFilter, MenuItem,
    MenuItemForm,
};
use crate::store::{StoreError, categories, items};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The record write already committed; only the asset step failed.
    #[error("Image processing failed: {0}")]
    ImageProcessing(#[from] ImagingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

/// A successful mutation: the resulting record plus the confirmation
/// message to surface.
#[derive(Debug, Clone)]
pub struct Saved<T> {
    pub record: T,
    pub message: &'static str,
}

/// Structured result of the availability toggle, mirrored to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub success: bool,
    pub is_available: bool,
    pub message: String,
}

/// Admin dashboard overview.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_items: i64,
    pub available_items: i64,
    pub unavailable_items: i64,
    pub total_categories: i64,
    /// The five most recently updated items.
    pub recent_items: Vec<MenuItem>,
}

/// The admin workflow: a pool, an image backend, and the media root.
pub struct Workflow<B: ImageBackend> {
    pool: SqlitePool,
    backend: B,
    media_dir: PathBuf,
    limits: DownsampleConfig,
}

impl<B: ImageBackend> Workflow<B> {
    pub fn new(pool: SqlitePool, backend: B, media_dir: PathBuf, limits: DownsampleConfig) -> Self {
        Self {
            pool,
            backend,
            media_dir,
            limits,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ---------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<CategoryWithCount>> {
        Ok(categories::list_with_counts(&self.pool).await?)
    }

    pub async fn add_category(&self, form: &CategoryForm) -> Result<Saved<Category>> {
        let input = form.parse().map_err(StoreError::Validation)?;
        let record = categories::create(&self.pool, &input).await?;
        Ok(Saved {
            record,
            message: "Category added successfully!",
        })
    }

    pub async fn edit_category(&self, id: i64, form: &CategoryForm) -> Result<Saved<Category>> {
        let input = form.parse().map_err(StoreError::Validation)?;
        let record = categories::update(&self.pool, id, &input).await?;
        Ok(Saved {
            record,
            message: "Category updated successfully!",
        })
    }

    /// Delete a category and, by cascade, all of its items.
    ///
    /// Destructive and irreversible — the caller must have confirmed.
    /// Returns the number of items the cascade removed.
    pub async fn remove_category(&self, id: i64) -> Result<Saved<u64>> {
        let record = categories::delete(&self.pool, id).await?;
        Ok(Saved {
            record,
            message: "Category deleted successfully!",
        })
    }

    // ---------------------------------------------------------------------
    // Menu items
    // ---------------------------------------------------------------------

    pub async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<MenuItem>> {
        Ok(items::list(&self.pool, filter).await?)
    }

    /// Create a menu item, optionally attaching an image payload.
    ///
    /// The record write is transactional; the image step is best-effort and
    /// runs after commit. If it fails the error is returned, but the record
    /// (including its asset path) stays persisted — callers that care must
    /// handle [`WorkflowError::ImageProcessing`] explicitly.
    pub async fn add_item(
        &self,
        form: &MenuItemForm,
        image: Option<&Path>,
    ) -> Result<Saved<MenuItem>> {
        let input = form.parse().map_err(StoreError::Validation)?;
        if let Some(source) = image {
            check_image_source(source)?;
        }
        let mut record = items::create(&self.pool, &input).await?;
        if let Some(source) = image {
            record = self.attach_image(record, source).await?;
        }
        Ok(Saved {
            record,
            message: "Menu item added successfully!",
        })
    }

    /// Edit a menu item; a new image payload replaces the stored asset.
    ///
    /// Same best-effort image semantics as [`Workflow::add_item`].
    pub async fn edit_item(
        &self,
        id: i64,
        form: &MenuItemForm,
        image: Option<&Path>,
    ) -> Result<Saved<MenuItem>> {
        let input = form.parse().map_err(StoreError::Validation)?;
        if let Some(source) = image {
            check_image_source(source)?;
        }
        let mut record = items::update(&self.pool, id, &input).await?;
        if let Some(source) = image {
            record = self.attach_image(record, source).await?;
        }
        Ok(Saved {
            record,
            message: "Menu item updated successfully!",
        })
    }

    pub async fn remove_item(&self, id: i64) -> Result<Saved<()>> {
        items::delete(&self.pool, id).await?;
        Ok(Saved {
            record: (),
            message: "Menu item deleted successfully!",
        })
    }

    /// Flip an item's availability and report the new state.
    pub async fn toggle_item(&self, id: i64) -> Result<ToggleOutcome> {
        let is_available = items::toggle_availability(&self.pool, id).await?;
        let state = if is_available { "available" } else { "unavailable" };
        Ok(ToggleOutcome {
            success: true,
            is_available,
            message: format!("Item is now {state}"),
        })
    }

    // ---------------------------------------------------------------------
    // Dashboard
    // ---------------------------------------------------------------------

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        Ok(DashboardStats {
            total_items: items::count(&self.pool).await?,
            available_items: items::count_by_availability(&self.pool, true).await?,
            unavailable_items: items::count_by_availability(&self.pool, false).await?,
            total_categories: categories::count(&self.pool).await?,
            recent_items: items::recent(&self.pool, 5).await?,
        })
    }

    // ---------------------------------------------------------------------
    // Image pipeline
    // ---------------------------------------------------------------------

    /// Write the payload through to media storage, point the record at it,
    /// then downsample in place.
    ///
    /// Runs only after the record is durably persisted — the asset path is
    /// derived from the record id.
    async fn attach_image(&self, record: MenuItem, source: &Path) -> Result<MenuItem> {
        // check_image_source verified the extension exists.
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_lowercase();
        let relative = format!("menu_items/{}.{}", record.id, ext);
        let dest = self.media_dir.join(&relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, &dest)?;
        items::set_image(&self.pool, record.id, &relative).await?;

        match shrink_to_fit(&self.backend, &dest, &self.limits) {
            Ok(Outcome::Resized { width, height }) => {
                info!(id = record.id, width, height, asset = %relative, "image downsampled");
            }
            Ok(Outcome::Unchanged) => {}
            Err(e) => {
                // The record and asset path are already committed; the
                // oversized asset stays on disk until a later save fixes it.
                warn!(id = record.id, asset = %relative, error = %e, "image post-processing failed");
                return Err(e.into());
            }
        }

        items::get(&self.pool, record.id).await.map_err(Into::into)
    }
}

fn check_image_source(source: &Path) -> Result<()> {
    if !is_supported(source) {
        return Err(StoreError::Validation(FieldErrors(vec![FieldError::new(
            "image",
            format!("unsupported image type (expected one of: {})", SUPPORTED_EXTENSIONS.join(", ")),
        )]))
        .into());
    }
    Ok(())
}
