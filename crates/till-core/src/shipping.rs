//! # Shipping Module
//!
//! Shippable projections and the shipment notice.
//!
//! ## From Side Effect To Value
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Shipment Notice Flow                           │
//! │                                                                     │
//! │  checkout() ──► product.shippable() per line ──► Vec<ShippableItem> │
//! │                             │                                       │
//! │                             ▼                                       │
//! │                  ShipmentNotice::new(items)                         │
//! │                             │                                       │
//! │                             ▼                                       │
//! │        app layer: println!("{notice}")  (Display does formatting)   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The notice is a plain value; nothing in this module performs I/O. The
//! caller guarantees a non-empty item list (checkout only builds a notice
//! when at least one line shipped).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only shipping view of a product: what the carrier needs to know.
///
/// Constructed on demand by [`crate::Product::shippable`]; never stored in
/// the catalog or the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippableItem {
    /// Product name as it appears on the manifest.
    pub name: String,

    /// Item weight in grams.
    pub weight_grams: i64,
}

/// The shipment manifest for one checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentNotice {
    items: Vec<ShippableItem>,
}

impl ShipmentNotice {
    /// Creates a notice over the given items.
    pub fn new(items: Vec<ShippableItem>) -> Self {
        ShipmentNotice { items }
    }

    /// The manifest items, in cart order.
    pub fn items(&self) -> &[ShippableItem] {
        &self.items
    }

    /// Aggregate package weight in grams.
    pub fn total_weight_grams(&self) -> i64 {
        self.items.iter().map(|item| item.weight_grams).sum()
    }
}

/// Renders the notice in manifest format:
///
/// ```text
/// ** Shipment notice **
/// Cheese 200 g
/// TV 10000 g
/// Total package weight 10.2 kg
/// ```
///
/// The total is in kilograms to one decimal, computed with integer math
/// (round half up on the tenths of a kilogram).
impl fmt::Display for ShipmentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Shipment notice **")?;
        for item in &self.items {
            writeln!(f, "{} {} g", item.name, item.weight_grams)?;
        }
        let tenths_of_kg = (self.total_weight_grams() + 50) / 100;
        write!(
            f,
            "Total package weight {}.{} kg",
            tenths_of_kg / 10,
            tenths_of_kg % 10
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, weight_grams: i64) -> ShippableItem {
        ShippableItem {
            name: name.to_string(),
            weight_grams,
        }
    }

    #[test]
    fn test_total_weight() {
        let notice = ShipmentNotice::new(vec![
            item("Cheese", 200),
            item("Biscuits", 700),
            item("TV", 10_000),
        ]);
        assert_eq!(notice.total_weight_grams(), 10_900);
        assert_eq!(notice.items().len(), 3);
    }

    #[test]
    fn test_display_format() {
        let notice = ShipmentNotice::new(vec![
            item("Cheese", 200),
            item("Biscuits", 700),
            item("TV", 10_000),
        ]);
        assert_eq!(
            notice.to_string(),
            "** Shipment notice **\n\
             Cheese 200 g\n\
             Biscuits 700 g\n\
             TV 10000 g\n\
             Total package weight 10.9 kg"
        );
    }

    #[test]
    fn test_display_rounds_tenths_of_kg() {
        // 249 g rounds down to 0.2 kg, 250 g rounds up to 0.3 kg
        let low = ShipmentNotice::new(vec![item("Envelope", 249)]);
        assert!(low.to_string().ends_with("Total package weight 0.2 kg"));

        let high = ShipmentNotice::new(vec![item("Envelope", 250)]);
        assert!(high.to_string().ends_with("Total package weight 0.3 kg"));
    }
}
