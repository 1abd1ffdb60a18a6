//! Plain data records and input types shared across all layers.
//!
//! Records come out of the store fully materialized — no lazy loading, no
//! active-record behavior. Form types mirror the admin's form-encoded input:
//! loosely typed strings that are coerced and validated in one pass, so a
//! submission with three bad fields reports all three at once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named grouping of menu items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// A category annotated with its current item count.
///
/// The count is computed at query time, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub item_count: i64,
}

/// A single dish record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub price: Decimal,
    /// Relative path of the stored image asset, if one was uploaded.
    pub image: Option<String>,
    pub is_available: bool,
    pub spice_level: Option<SpiceLevel>,
    pub is_vegetarian: bool,
    /// Preparation time in minutes.
    pub preparation_time: Option<i64>,
    pub created_at: DateTime<Utc>,
    /// Touched on every mutation, including availability toggles.
    pub updated_at: DateTime<Utc>,
}

/// Spice level of a dish. Optional on the record — not every dish has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Spicy,
    ExtraSpicy,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 4] = [
        SpiceLevel::Mild,
        SpiceLevel::Medium,
        SpiceLevel::Spicy,
        SpiceLevel::ExtraSpicy,
    ];

    /// Storage/wire form: `mild`, `medium`, `spicy`, `extra_spicy`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Spicy => "spicy",
            SpiceLevel::ExtraSpicy => "extra_spicy",
        }
    }

    pub fn parse(s: &str) -> Option<SpiceLevel> {
        SpiceLevel::ALL.iter().copied().find(|l| l.as_str() == s)
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field, reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violated fields from one submission, joined for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any error names the given field.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Validated category input, ready for the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Raw category form fields as submitted.
///
/// An empty description collapses to `None` — the column is nullable and
/// blank text boxes should not persist empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn parse(&self) -> Result<CategoryInput, FieldErrors> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "this field is required"));
        }
        if !errors.is_empty() {
            return Err(FieldErrors(errors));
        }
        let description = self.description.trim();
        Ok(CategoryInput {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Validated menu item input, ready for the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub price: Decimal,
    pub is_available: bool,
    pub spice_level: Option<SpiceLevel>,
    pub is_vegetarian: bool,
    pub preparation_time: Option<i64>,
}

/// Raw menu item form fields as submitted.
///
/// `price`, `spice_level`, and `preparation_time` stay stringly typed here
/// so coercion failures become per-field errors instead of a parse abort.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub price: String,
    pub is_available: bool,
    /// Empty string means "not specified".
    pub spice_level: String,
    pub is_vegetarian: bool,
    /// Empty string means "not specified"; otherwise whole minutes.
    pub preparation_time: String,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category_id: 0,
            price: String::new(),
            is_available: true,
            spice_level: String::new(),
            is_vegetarian: false,
            preparation_time: String::new(),
        }
    }
}

impl MenuItemForm {
    /// Coerce and validate every field, collecting all violations.
    ///
    /// Category existence is a store-side check (it needs the database);
    /// everything checkable from the submission alone is checked here.
    pub fn parse(&self) -> Result<MenuItemInput, FieldErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "this field is required"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FieldError::new("description", "this field is required"));
        }

        let price = match Decimal::from_str(self.price.trim()) {
            Ok(p) if p.is_sign_negative() => {
                errors.push(FieldError::new("price", "must not be negative"));
                None
            }
            Ok(p) => Some(p),
            Err(_) => {
                errors.push(FieldError::new("price", "must be a decimal number"));
                None
            }
        };

        let spice_level = match self.spice_level.trim() {
            "" => None,
            raw => match SpiceLevel::parse(raw) {
                Some(level) => Some(level),
                None => {
                    errors.push(FieldError::new(
                        "spice_level",
                        "must be one of: mild, medium, spicy, extra_spicy",
                    ));
                    None
                }
            },
        };

        let preparation_time = match self.preparation_time.trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(minutes) => Some(minutes),
                Err(_) => {
                    errors.push(FieldError::new(
                        "preparation_time",
                        "must be a whole number of minutes",
                    ));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(FieldErrors(errors));
        }

        Ok(MenuItemInput {
            name: name.to_string(),
            description: description.to_string(),
            category_id: self.category_id,
            // Unwrap is safe: price parse failure pushed an error above.
            price: price.unwrap(),
            is_available: self.is_available,
            spice_level,
            is_vegetarian: self.is_vegetarian,
            preparation_time,
        })
    }
}

/// Listing filter for menu items. Both options are independent and combinable;
/// an absent option imposes no restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Restrict to items of one category.
    pub category_id: Option<i64>,
    /// `Some(true)` = only available, `Some(false)` = only unavailable.
    pub availability: Option<bool>,
}

impl ItemFilter {
    pub fn by_category(category_id: i64) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn by_availability(available: bool) -> Self {
        Self {
            availability: Some(available),
            ..Self::default()
        }
    }
}
