//! # Catalog Module
//!
//! Products, product variants and the inventory they live in.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            Catalog                                  │
//! │                                                                     │
//! │  ┌─────────────────┐        ┌──────────────────────────────────┐   │
//! │  │    Product      │        │          ProductKind             │   │
//! │  │  ─────────────  │        │  ──────────────────────────────  │   │
//! │  │  id (UUID)      │        │  Perishable { expires_at }       │   │
//! │  │  name           │ ─────► │  NonPerishable{requires_shipping}│   │
//! │  │  unit_price     │        │                                  │   │
//! │  │  weight_grams   │        │  (tagged union, no inheritance)  │   │
//! │  │  stock          │        └──────────────────────────────────┘   │
//! │  └─────────────────┘                                               │
//! │                                                                     │
//! │  Inventory: ProductId ──► Product (the single owner of stock)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shippability Rule
//! - Perishable products always ship (they are physical and have a weight).
//! - Non-perishable products ship iff `requires_shipping` is set.
//! - A product that ships exposes a [`ShippableItem`] projection on demand;
//!   the projection is never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::shipping::ShippableItem;
use crate::validation::{
    validate_price, validate_product_name, validate_stock, validate_weight_grams,
};

// =============================================================================
// Product Id
// =============================================================================

/// Unique identifier of a product in an [`Inventory`].
///
/// ## Why An Id Instead Of A Reference?
/// Cart lines refer to products by this stable id, never by a live mutable
/// reference. The inventory map stays the single owner of product state, so
/// stock mutation during checkout is explicit and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Creates a fresh identifier (UUID v4).
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        ProductId::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Variant-specific product behavior.
///
/// A tagged union instead of an abstract base class: the variant carries the
/// fields only it needs, and expiry/shippability are pure matches over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Expires at a point in time; always physically shippable.
    Perishable { expires_at: DateTime<Utc> },
    /// Never expires; ships only when flagged.
    NonPerishable { requires_shipping: bool },
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// ## Lifecycle
/// Created once at catalog setup, mutated only by stock deduction during
/// checkout, never deleted by this core.
///
/// ## Invariant
/// `stock` never goes negative: every deduction is preceded by an
/// availability check (enforced by the cart and the checkout pass, not by
/// [`Product::reduce_stock`] itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: ProductId,

    /// Display name shown on the receipt and shipment notice.
    pub name: String,

    /// Unit price in cents.
    pub unit_price: Money,

    /// Item weight in grams. Zero for weightless items (e.g. a scratch card).
    pub weight_grams: i64,

    /// Current stock level (quantity on hand).
    pub stock: i64,

    /// Variant-specific behavior (expiry / shippability).
    pub kind: ProductKind,
}

impl Product {
    /// Creates a perishable product (always shippable, expires).
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, Utc};
    /// use till_core::{Money, Product};
    ///
    /// let cheese = Product::perishable(
    ///     "Cheese",
    ///     Money::from_cents(10_000),
    ///     5,
    ///     200,
    ///     Utc::now() + Duration::days(1),
    /// )
    /// .unwrap();
    /// assert!(cheese.shippable().is_some());
    /// ```
    pub fn perishable(
        name: impl Into<String>,
        unit_price: Money,
        stock: i64,
        weight_grams: i64,
        expires_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        Self::new(
            name,
            unit_price,
            stock,
            weight_grams,
            ProductKind::Perishable { expires_at },
        )
    }

    /// Creates a non-perishable product (never expires, ships when flagged).
    pub fn non_perishable(
        name: impl Into<String>,
        unit_price: Money,
        stock: i64,
        weight_grams: i64,
        requires_shipping: bool,
    ) -> CoreResult<Self> {
        Self::new(
            name,
            unit_price,
            stock,
            weight_grams,
            ProductKind::NonPerishable { requires_shipping },
        )
    }

    fn new(
        name: impl Into<String>,
        unit_price: Money,
        stock: i64,
        weight_grams: i64,
        kind: ProductKind,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(unit_price)?;
        validate_stock(stock)?;
        validate_weight_grams(weight_grams)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            unit_price,
            weight_grams,
            stock,
            kind,
        })
    }

    /// Checks whether the product is expired as of `now`.
    ///
    /// Non-perishable products never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.kind {
            ProductKind::Perishable { expires_at } => now > expires_at,
            ProductKind::NonPerishable { .. } => false,
        }
    }

    /// Checks whether `requested` units can be sold as of `now`.
    ///
    /// True iff `requested <= stock` and the product is not expired.
    /// Pure, no side effect.
    pub fn is_available(&self, requested: i64, now: DateTime<Utc>) -> bool {
        requested <= self.stock && !self.is_expired(now)
    }

    /// Deducts `qty` units from stock.
    ///
    /// ## Precondition
    /// `qty <= stock`. The caller validates availability first (the checkout
    /// pass does this for every line before any deduction); this operation
    /// performs no underflow check of its own.
    pub fn reduce_stock(&mut self, qty: i64) {
        self.stock -= qty;
    }

    /// Returns the shippable projection of this product, if it ships.
    ///
    /// Perishables always ship; non-perishables ship iff `requires_shipping`.
    /// The projection is built on demand and never stored.
    pub fn shippable(&self) -> Option<ShippableItem> {
        match self.kind {
            ProductKind::Perishable { .. } => Some(ShippableItem {
                name: self.name.clone(),
                weight_grams: self.weight_grams,
            }),
            ProductKind::NonPerishable { requires_shipping } => {
                requires_shipping.then(|| ShippableItem {
                    name: self.name.clone(),
                    weight_grams: self.weight_grams,
                })
            }
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// The catalog's product store: a map from [`ProductId`] to [`Product`].
///
/// ## Ownership
/// The inventory is the single owner of all product state. Carts hold ids;
/// checkout resolves ids against the inventory and is the only place that
/// mutates stock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    products: HashMap<ProductId, Product>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory {
            products: HashMap::new(),
        }
    }

    /// Inserts a product and returns its id.
    pub fn insert(&mut self, product: Product) -> ProductId {
        let id = product.id;
        self.products.insert(id, product);
        id
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Looks up a product by id, mutably.
    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.get_mut(id)
    }

    /// Number of products in the inventory.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the inventory holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fresh_cheese(now: DateTime<Utc>) -> Product {
        Product::perishable(
            "Cheese",
            Money::from_cents(10_000),
            5,
            200,
            now + Duration::days(1),
        )
        .unwrap()
    }

    #[test]
    fn test_perishable_expiry() {
        let now = Utc::now();
        let cheese = fresh_cheese(now);
        assert!(!cheese.is_expired(now));
        assert!(cheese.is_expired(now + Duration::days(2)));
    }

    #[test]
    fn test_non_perishable_never_expires() {
        let now = Utc::now();
        let tv = Product::non_perishable("TV", Money::from_cents(20_000), 3, 10_000, true).unwrap();
        assert!(!tv.is_expired(now));
        assert!(!tv.is_expired(now + Duration::days(10_000)));
    }

    #[test]
    fn test_availability_checks_stock_and_expiry() {
        let now = Utc::now();
        let cheese = fresh_cheese(now);

        assert!(cheese.is_available(1, now));
        assert!(cheese.is_available(5, now));
        assert!(!cheese.is_available(6, now));

        // Expired products are unavailable at any quantity
        let later = now + Duration::days(2);
        assert!(!cheese.is_available(1, later));
    }

    #[test]
    fn test_reduce_stock() {
        let now = Utc::now();
        let mut cheese = fresh_cheese(now);
        cheese.reduce_stock(2);
        assert_eq!(cheese.stock, 3);
        assert!(!cheese.is_available(4, now));
    }

    #[test]
    fn test_shippability_rule() {
        let now = Utc::now();

        // Perishables always ship
        let cheese = fresh_cheese(now);
        let item = cheese.shippable().unwrap();
        assert_eq!(item.name, "Cheese");
        assert_eq!(item.weight_grams, 200);

        // Non-perishable ships only when flagged
        let tv = Product::non_perishable("TV", Money::from_cents(20_000), 3, 10_000, true).unwrap();
        assert!(tv.shippable().is_some());

        let card =
            Product::non_perishable("ScratchCard", Money::from_cents(5_000), 10, 0, false).unwrap();
        assert!(card.shippable().is_none());
    }

    #[test]
    fn test_constructor_validation() {
        let now = Utc::now();
        assert!(Product::perishable("", Money::from_cents(100), 1, 1, now).is_err());
        assert!(Product::non_perishable("TV", Money::from_cents(-1), 1, 1, true).is_err());
        assert!(Product::non_perishable("TV", Money::from_cents(100), -1, 1, true).is_err());
        assert!(Product::non_perishable("TV", Money::from_cents(100), 1, -1, true).is_err());
        // Zero price and zero weight are both allowed
        assert!(Product::non_perishable("Flyer", Money::zero(), 1, 0, false).is_ok());
    }

    #[test]
    fn test_inventory_insert_and_lookup() {
        let now = Utc::now();
        let mut inventory = Inventory::new();
        assert!(inventory.is_empty());

        let id = inventory.insert(fresh_cheese(now));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get(&id).unwrap().name, "Cheese");

        inventory.get_mut(&id).unwrap().reduce_stock(5);
        assert_eq!(inventory.get(&id).unwrap().stock, 0);

        let missing = ProductId::new();
        assert!(inventory.get(&missing).is_none());
    }
}
