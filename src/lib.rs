//! # Carta
//!
//! Menu management for a small restaurant. Staff maintain categories and
//! dishes through an admin workflow; customers get a read-only menu grouped
//! by category, reachable through a QR code on the table.
//!
//! # Architecture: Three Layers
//!
//! ```text
//! 1. Store      SQLite  ↔  typed records     (validation + persistence)
//! 2. Workflow   forms   →  store + media/    (admin operations, image pipeline)
//! 3. View       store   →  grouped menu + QR (customer aggregation, read-only)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Validation in one place**: every write path goes through the store,
//!   which re-checks semantics no matter which surface produced the input.
//! - **Best-effort media**: image post-processing happens after the record
//!   commits, so a failed resize never loses menu data.
//! - **Testability**: stores are exercised against in-memory SQLite, the
//!   image pipeline against a recording mock backend.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `carta.toml` loading and validation |
//! | [`db`] | Connection pool setup and schema initialization |
//! | [`model`] | Domain records, form coercion, field-level validation errors |
//! | [`store`] | CRUD for categories and menu items over SQLite |
//! | [`imaging`] | Image backend trait, fit calculations, in-place downsampling |
//! | [`qr`] | QR code generation for the public menu URL |
//! | [`workflow`] | Admin operations: form → validate → persist → media |
//! | [`view`] | Customer menu aggregation: sections, items, QR data URI |
//! | [`output`] | CLI output formatting for listings and the dashboard |
//!
//! # Design Decisions
//!
//! ## Prices as Decimals, Stored as Text
//!
//! Prices are [`rust_decimal::Decimal`] end to end and stored in SQLite as
//! their canonical string form. SQLite has no decimal type, and floats would
//! accumulate rounding errors in money; text round-trips exactly.
//!
//! ## Forms Collect Every Violation
//!
//! Form parsing ([`model::MenuItemForm::parse`]) reports all invalid fields
//! at once rather than stopping at the first. Staff fixing a submission see
//! the complete list in one pass.
//!
//! ## Destructive Writes Are Explicit
//!
//! Deleting a category removes its items in the same transaction and the
//! workflow reports the cascade count, so callers can warn before and
//! confirm after. There is no silent `ON DELETE CASCADE` doing it behind
//! the store's back.
//!
//! ## Pure-Rust Imaging (No ImageMagick)
//!
//! The [`imaging`] module uses the `image` crate with Lanczos3 resampling.
//! No system dependencies: the binary is self-contained and the same code
//! path runs in tests against temp files.

pub mod config;
pub mod db;
pub mod imaging;
pub mod model;
pub mod output;
pub mod qr;
pub mod store;
pub mod view;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_helpers;
