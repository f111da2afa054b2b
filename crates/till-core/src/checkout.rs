//! # Checkout Module
//!
//! The checkout orchestrator: the one non-trivial procedure in the system.
//!
//! ## Two-Phase Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       checkout() Flow                               │
//! │                                                                     │
//! │  Phase 1: VALIDATE & PRICE (no mutation)                            │
//! │  ──────────────────────────────────────                             │
//! │  empty cart? ───────────────────────────────► EmptyCart            │
//! │  per line, in cart order:                                           │
//! │    resolve id in inventory ─────────────────► ProductNotFound      │
//! │    requested > stock - reserved? expired? ──► ProductUnavailable   │
//! │    reserve quantity, add to subtotal, collect shippable view        │
//! │  shipping = flat fee if anything ships, else 0                      │
//! │  balance < subtotal + shipping? ────────────► InsufficientFunds    │
//! │                                                                     │
//! │  Phase 2: COMMIT (cannot fail)                                      │
//! │  ─────────────────────────────                                      │
//! │  deduct every reserved quantity from stock                          │
//! │  debit the customer                                                 │
//! │  return Receipt { lines, totals, balance, shipment notice }         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error leaves the inventory and the customer balance exactly as they
//! were: validation reserves quantities in a local map, never in the
//! inventory itself. The reservation map also makes duplicate-product lines
//! honest - each line validates against stock minus what earlier lines in
//! the same cart already claimed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::cart::Cart;
use crate::catalog::{Inventory, ProductId};
use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::shipping::ShipmentNotice;
use crate::FLAT_SHIPPING_FEE;

// =============================================================================
// Receipt
// =============================================================================

/// One priced line on the receipt, in cart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Quantity purchased.
    pub quantity: i64,

    /// Product name at checkout time.
    pub name: String,

    /// `unit_price × quantity`.
    pub line_total: Money,
}

/// The result of a successful checkout.
///
/// A plain value: presentation is the caller's job ([`fmt::Display`] renders
/// the standard receipt text, the shipment notice renders separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Priced lines, one per cart line, in cart order.
    pub lines: Vec<ReceiptLine>,

    /// Sum of all line totals.
    pub subtotal: Money,

    /// Flat shipping fee, or zero if nothing shipped.
    pub shipping: Money,

    /// `subtotal + shipping`; the amount debited.
    pub total: Money,

    /// Customer balance after payment.
    pub balance_after: Money,

    /// Manifest of shipped items; `None` when no line was shippable.
    pub shipment: Option<ShipmentNotice>,
}

/// Renders the receipt text:
///
/// ```text
/// ** Checkout receipt **
/// 2x Cheese 200.00
/// 1x Biscuits 150.00
/// Subtotal 350.00
/// Shipping 30.00
/// Amount 380.00
/// Customer balance after payment: 1620.00
/// ```
impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(f, "{}x {} {}", line.quantity, line.name, line.line_total)?;
        }
        writeln!(f, "Subtotal {}", self.subtotal)?;
        writeln!(f, "Shipping {}", self.shipping)?;
        writeln!(f, "Amount {}", self.total)?;
        write!(
            f,
            "Customer balance after payment: {}",
            self.balance_after
        )
    }
}

// =============================================================================
// Checkout Orchestrator
// =============================================================================

/// Runs a single checkout of `cart` against `inventory` and `customer`.
///
/// ## Behavior
/// Single pass, no retries, no resumption. Validates and prices every line
/// first, checks funds, and only then deducts stock and debits the customer;
/// on any error both inventory and balance are unchanged.
///
/// ## Errors
/// - [`CoreError::EmptyCart`] - the cart has no lines
/// - [`CoreError::ProductNotFound`] - a line's id is not in the inventory
/// - [`CoreError::ProductUnavailable`] - a line exceeds remaining stock or
///   its product expired since it was added
/// - [`CoreError::InsufficientFunds`] - balance cannot cover the total
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use till_core::{checkout, Cart, Customer, Inventory, Money, Product};
///
/// let now = Utc::now();
/// let mut inventory = Inventory::new();
/// let tv = inventory.insert(
///     Product::non_perishable("TV", Money::from_cents(20_000), 3, 10_000, true).unwrap(),
/// );
///
/// let mut cart = Cart::new();
/// cart.add(inventory.get(&tv).unwrap(), 3, now).unwrap();
///
/// let mut customer = Customer::new(Money::from_cents(100_000));
/// let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();
///
/// assert_eq!(receipt.subtotal, Money::from_cents(60_000));
/// assert_eq!(receipt.shipping, Money::from_cents(3_000));
/// assert_eq!(receipt.total, Money::from_cents(63_000));
/// assert_eq!(inventory.get(&tv).unwrap().stock, 0);
/// ```
pub fn checkout(
    inventory: &mut Inventory,
    cart: &Cart,
    customer: &mut Customer,
    now: DateTime<Utc>,
) -> CoreResult<Receipt> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    // Phase 1: validate and price every line without touching any state.
    // Quantities claimed by earlier lines are tracked here so duplicate
    // lines for one product cannot oversell its stock.
    let mut reserved: HashMap<ProductId, i64> = HashMap::new();
    let mut receipt_lines = Vec::with_capacity(cart.len());
    let mut subtotal = Money::zero();
    let mut to_ship = Vec::new();

    for line in cart.lines() {
        let product = inventory
            .get(&line.product_id)
            .ok_or(CoreError::ProductNotFound(line.product_id))?;

        let already_reserved = reserved.get(&line.product_id).copied().unwrap_or(0);
        let available = product.stock - already_reserved;
        if line.quantity > available || product.is_expired(now) {
            return Err(CoreError::ProductUnavailable {
                name: product.name.clone(),
                available,
                requested: line.quantity,
            });
        }
        *reserved.entry(line.product_id).or_insert(0) += line.quantity;

        let line_total = product.unit_price.multiply_quantity(line.quantity);
        subtotal += line_total;
        receipt_lines.push(ReceiptLine {
            quantity: line.quantity,
            name: product.name.clone(),
            line_total,
        });

        // One manifest entry per cart line, as shipped notices list lines,
        // not units.
        if let Some(item) = product.shippable() {
            to_ship.push(item);
        }
    }

    let shipping = if to_ship.is_empty() {
        Money::zero()
    } else {
        FLAT_SHIPPING_FEE
    };
    let total = subtotal + shipping;

    if customer.balance() < total {
        return Err(CoreError::InsufficientFunds {
            required: total,
            available: customer.balance(),
        });
    }

    // Phase 2: commit. Every id was resolved and every quantity reserved
    // above; the debit re-validates inside pay() but cannot fail here.
    for (product_id, quantity) in &reserved {
        let product = inventory
            .get_mut(product_id)
            .ok_or(CoreError::ProductNotFound(*product_id))?;
        product.reduce_stock(*quantity);
    }
    customer.pay(total)?;

    let shipment = if to_ship.is_empty() {
        None
    } else {
        Some(ShipmentNotice::new(to_ship))
    };

    Ok(Receipt {
        lines: receipt_lines,
        subtotal,
        shipping,
        total,
        balance_after: customer.balance(),
        shipment,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use chrono::Duration;

    /// The demo catalog: Cheese 100.00×5 (200 g, perishable), Biscuits
    /// 150.00×3 (700 g, perishable), TV 200.00×3 (10 kg, ships),
    /// ScratchCard 50.00×10 (no shipping).
    fn demo_inventory(now: DateTime<Utc>) -> (Inventory, [ProductId; 4]) {
        let mut inventory = Inventory::new();
        let tomorrow = now + Duration::days(1);

        let cheese = inventory.insert(
            Product::perishable("Cheese", Money::from_cents(10_000), 5, 200, tomorrow).unwrap(),
        );
        let biscuits = inventory.insert(
            Product::perishable("Biscuits", Money::from_cents(15_000), 3, 700, tomorrow).unwrap(),
        );
        let tv = inventory.insert(
            Product::non_perishable("TV", Money::from_cents(20_000), 3, 10_000, true).unwrap(),
        );
        let card = inventory.insert(
            Product::non_perishable("ScratchCard", Money::from_cents(5_000), 10, 0, false)
                .unwrap(),
        );

        (inventory, [cheese, biscuits, tv, card])
    }

    fn demo_cart(
        inventory: &Inventory,
        [cheese, biscuits, tv, card]: [ProductId; 4],
        now: DateTime<Utc>,
    ) -> Cart {
        let mut cart = Cart::new();
        cart.add(inventory.get(&cheese).unwrap(), 2, now).unwrap();
        cart.add(inventory.get(&biscuits).unwrap(), 1, now).unwrap();
        cart.add(inventory.get(&tv).unwrap(), 3, now).unwrap();
        cart.add(inventory.get(&card).unwrap(), 1, now).unwrap();
        cart
    }

    #[test]
    fn test_empty_cart_fails_without_mutation() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let mut customer = Customer::new(Money::from_cents(200_000));

        let err = checkout(&mut inventory, &Cart::new(), &mut customer, now).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(customer.balance(), Money::from_cents(200_000));
        assert_eq!(inventory.get(&ids[0]).unwrap().stock, 5);
    }

    #[test]
    fn test_successful_checkout_totals_and_mutations() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let cart = demo_cart(&inventory, ids, now);
        let mut customer = Customer::new(Money::from_cents(200_000));

        let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();

        // Subtotal 200 + 150 + 600 + 50 = 1000; shipping flat 30; total 1030
        assert_eq!(receipt.subtotal, Money::from_cents(100_000));
        assert_eq!(receipt.shipping, FLAT_SHIPPING_FEE);
        assert_eq!(receipt.total, Money::from_cents(103_000));
        assert_eq!(receipt.balance_after, Money::from_cents(97_000));
        assert_eq!(customer.balance(), Money::from_cents(97_000));

        // Stock drops by exactly the purchased quantities
        assert_eq!(inventory.get(&ids[0]).unwrap().stock, 3);
        assert_eq!(inventory.get(&ids[1]).unwrap().stock, 2);
        assert_eq!(inventory.get(&ids[2]).unwrap().stock, 0);
        assert_eq!(inventory.get(&ids[3]).unwrap().stock, 9);

        // Shipment lists Cheese, Biscuits, TV - not the ScratchCard
        let shipment = receipt.shipment.unwrap();
        let names: Vec<&str> = shipment.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Cheese", "Biscuits", "TV"]);
        assert_eq!(shipment.total_weight_grams(), 10_900);
    }

    #[test]
    fn test_insufficient_funds_leaves_everything_unchanged() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let cart = demo_cart(&inventory, ids, now);
        // Balance 1000.00 < total 1030.00
        let mut customer = Customer::new(Money::from_cents(100_000));

        let err = checkout(&mut inventory, &cart, &mut customer, now).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientFunds { required, available }
                if required == Money::from_cents(103_000)
                    && available == Money::from_cents(100_000)
        ));

        // No partial debit and no stock deduction
        assert_eq!(customer.balance(), Money::from_cents(100_000));
        assert_eq!(inventory.get(&ids[0]).unwrap().stock, 5);
        assert_eq!(inventory.get(&ids[1]).unwrap().stock, 3);
        assert_eq!(inventory.get(&ids[2]).unwrap().stock, 3);
        assert_eq!(inventory.get(&ids[3]).unwrap().stock, 10);
    }

    #[test]
    fn test_no_shippable_items_means_no_fee_and_no_notice() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let mut cart = Cart::new();
        cart.add(inventory.get(&ids[3]).unwrap(), 2, now).unwrap();
        let mut customer = Customer::new(Money::from_cents(20_000));

        let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();
        assert_eq!(receipt.subtotal, Money::from_cents(10_000));
        assert!(receipt.shipping.is_zero());
        assert_eq!(receipt.total, Money::from_cents(10_000));
        assert!(receipt.shipment.is_none());
    }

    #[test]
    fn test_duplicate_lines_cannot_oversell_stock() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let tv = ids[2];

        // Both adds pass independently (stock 3), combined they ask for 4
        let mut cart = Cart::new();
        cart.add(inventory.get(&tv).unwrap(), 3, now).unwrap();
        cart.add(inventory.get(&tv).unwrap(), 1, now).unwrap();
        let mut customer = Customer::new(Money::from_cents(1_000_000));

        let err = checkout(&mut inventory, &cart, &mut customer, now).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProductUnavailable { name, available, requested }
                if name == "TV" && available == 0 && requested == 1
        ));

        // The first line's reservation never reached the inventory
        assert_eq!(inventory.get(&tv).unwrap().stock, 3);
        assert_eq!(customer.balance(), Money::from_cents(1_000_000));
    }

    #[test]
    fn test_duplicate_lines_within_stock_succeed() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let cheese = ids[0];

        let mut cart = Cart::new();
        cart.add(inventory.get(&cheese).unwrap(), 2, now).unwrap();
        cart.add(inventory.get(&cheese).unwrap(), 3, now).unwrap();
        let mut customer = Customer::new(Money::from_cents(100_000));

        let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.subtotal, Money::from_cents(50_000));
        assert_eq!(inventory.get(&cheese).unwrap().stock, 0);
    }

    #[test]
    fn test_expired_between_add_and_checkout() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let mut cart = Cart::new();
        cart.add(inventory.get(&ids[0]).unwrap(), 2, now).unwrap();
        let mut customer = Customer::new(Money::from_cents(100_000));

        // The cheese expires tomorrow; checking out in two days fails
        let later = now + Duration::days(2);
        let err = checkout(&mut inventory, &cart, &mut customer, later).unwrap_err();
        assert!(matches!(err, CoreError::ProductUnavailable { name, .. } if name == "Cheese"));
        assert_eq!(inventory.get(&ids[0]).unwrap().stock, 5);
    }

    #[test]
    fn test_unknown_product_id_fails() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);

        // Build the cart against a separate inventory, then check out
        // against one that has never heard of the product
        let stray =
            Product::non_perishable("Stray", Money::from_cents(100), 1, 0, false).unwrap();
        let mut cart = Cart::new();
        cart.add(&stray, 1, now).unwrap();
        let mut customer = Customer::new(Money::from_cents(100_000));

        let err = checkout(&mut inventory, &cart, &mut customer, now).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == stray.id));
        assert_eq!(inventory.get(&ids[0]).unwrap().stock, 5);
    }

    #[test]
    fn test_receipt_display_format() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let cart = demo_cart(&inventory, ids, now);
        let mut customer = Customer::new(Money::from_cents(200_000));

        let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();
        assert_eq!(
            receipt.to_string(),
            "** Checkout receipt **\n\
             2x Cheese 200.00\n\
             1x Biscuits 150.00\n\
             3x TV 600.00\n\
             1x ScratchCard 50.00\n\
             Subtotal 1000.00\n\
             Shipping 30.00\n\
             Amount 1030.00\n\
             Customer balance after payment: 970.00"
        );
    }

    #[test]
    fn test_receipt_serializes_to_json() {
        let now = Utc::now();
        let (mut inventory, ids) = demo_inventory(now);
        let cart = demo_cart(&inventory, ids, now);
        let mut customer = Customer::new(Money::from_cents(200_000));

        let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["subtotal"], 100_000);
        assert_eq!(json["lines"][0]["name"], "Cheese");
        assert_eq!(json["shipment"]["items"].as_array().unwrap().len(), 3);
    }
}
