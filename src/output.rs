//! CLI output formatting.
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Appetizers (2 items)
//!     Spring Roll  $4.50  [available]
//!         Crispy rolls
//!     Dumplings  $6.00  [unavailable] [vegetarian]
//! ```

use crate::model::{CategoryWithCount, MenuItem};
use crate::view::MenuView;
use crate::workflow::DashboardStats;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One line per item: name, price, availability, dietary/spice tags.
fn item_line(item: &MenuItem) -> String {
    let mut line = format!("{} {}  ${}", item.id, item.name, item.price);
    line.push_str(if item.is_available {
        "  [available]"
    } else {
        "  [unavailable]"
    });
    if item.is_vegetarian {
        line.push_str(" [vegetarian]");
    }
    if let Some(level) = item.spice_level {
        line.push_str(&format!(" [{level}]"));
    }
    if let Some(minutes) = item.preparation_time {
        line.push_str(&format!(" [{minutes} min]"));
    }
    line
}

/// Format the admin category listing with item counts.
pub fn format_categories(categories: &[CategoryWithCount]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in categories {
        let plural = if entry.item_count == 1 { "item" } else { "items" };
        lines.push(format!(
            "{} {} ({} {})",
            entry.category.id, entry.category.name, entry.item_count, plural
        ));
        if let Some(description) = &entry.category.description {
            lines.push(format!("{}{}", indent(1), description));
        }
    }
    if lines.is_empty() {
        lines.push("No categories yet".to_string());
    }
    lines
}

/// Format a flat admin item listing (already filtered and ordered).
pub fn format_items(items: &[MenuItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        lines.push(item_line(item));
        lines.push(format!("{}{}", indent(1), item.description));
        if let Some(image) = &item.image {
            lines.push(format!("{}Image: {}", indent(1), image));
        }
    }
    if lines.is_empty() {
        lines.push("No menu items match".to_string());
    }
    lines
}

/// Format the customer menu: sections with their dishes, then the QR URI.
pub fn format_menu(view: &MenuView) -> Vec<String> {
    let mut lines = Vec::new();
    for section in &view.sections {
        let plural = if section.items.len() == 1 { "item" } else { "items" };
        lines.push(format!(
            "{} ({} {})",
            section.category.name,
            section.items.len(),
            plural
        ));
        if let Some(description) = &section.category.description {
            lines.push(format!("{}{}", indent(1), description));
        }
        for item in &section.items {
            lines.push(format!("{}{}", indent(1), item_line(item)));
            lines.push(format!("{}{}", indent(2), item.description));
        }
    }
    lines.push(String::new());
    lines.push(format!("QR: {}", view.qr_data_uri));
    lines
}

/// Format the admin dashboard overview.
pub fn format_dashboard(stats: &DashboardStats) -> Vec<String> {
    let mut lines = vec![
        format!("Categories: {}", stats.total_categories),
        format!(
            "Items: {} ({} available, {} unavailable)",
            stats.total_items, stats.available_items, stats.unavailable_items
        ),
    ];
    if !stats.recent_items.is_empty() {
        lines.push("Recently updated".to_string());
        for item in &stats.recent_items {
            lines.push(format!("{}{}", indent(1), item_line(item)));
        }
    }
    lines
}

pub fn print_categories(categories: &[CategoryWithCount]) {
    for line in format_categories(categories) {
        println!("{line}");
    }
}

pub fn print_items(items: &[MenuItem]) {
    for line in format_items(items) {
        println!("{line}");
    }
}

pub fn print_menu(view: &MenuView) {
    for line in format_menu(view) {
        println!("{line}");
    }
}

pub fn print_dashboard(stats: &DashboardStats) {
    for line in format_dashboard(stats) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, SpiceLevel};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample_item(name: &str, price: &str) -> MenuItem {
        MenuItem {
            id: 1,
            name: name.to_string(),
            description: "Crispy rolls".to_string(),
            category_id: 1,
            price: Decimal::from_str(price).unwrap(),
            image: None,
            is_available: true,
            spice_level: None,
            is_vegetarian: false,
            preparation_time: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn item_line_includes_tags() {
        let mut item = sample_item("Spring Roll", "4.50");
        item.is_vegetarian = true;
        item.spice_level = Some(SpiceLevel::Spicy);
        item.preparation_time = Some(15);

        let line = item_line(&item);
        assert!(line.contains("Spring Roll"));
        assert!(line.contains("$4.50"));
        assert!(line.contains("[available]"));
        assert!(line.contains("[vegetarian]"));
        assert!(line.contains("[spicy]"));
        assert!(line.contains("[15 min]"));
    }

    #[test]
    fn unavailable_item_is_marked() {
        let mut item = sample_item("Laksa", "10.00");
        item.is_available = false;
        assert!(item_line(&item).contains("[unavailable]"));
    }

    #[test]
    fn empty_listings_say_so() {
        assert_eq!(format_categories(&[]), ["No categories yet"]);
        assert_eq!(format_items(&[]), ["No menu items match"]);
    }

    #[test]
    fn categories_pluralize_counts() {
        let one = CategoryWithCount {
            category: Category {
                id: 1,
                name: "Appetizers".into(),
                description: None,
                created_at: Utc::now(),
            },
            item_count: 1,
        };
        let lines = format_categories(&[one]);
        assert_eq!(lines, ["1 Appetizers (1 item)"]);
    }
}
