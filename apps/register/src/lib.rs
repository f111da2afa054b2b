//! # Till Register Library
//!
//! Core library for the demo cash register binary. Wires a fixed catalog,
//! cart and customer, runs a single checkout against till-core, and prints
//! the results.
//!
//! ## Application Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Register Flow                                │
//! │                                                                     │
//! │  init_tracing() ──► RUST_LOG aware, default info                    │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  demo_catalog() ──► Cheese, Biscuits, TV, ScratchCard               │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  Cart: 2x Cheese, 1x Biscuits, 3x TV, 1x ScratchCard                │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  checkout(inventory, cart, customer, now)                           │
//! │        │                                                            │
//! │        ├── Ok(receipt) ──► print shipment notice + receipt          │
//! │        └── Err(e) ──────► bubbles up to main, exit non-zero         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use till_core::{
    checkout, Cart, CoreError, CoreResult, Customer, Inventory, Money, Product, ProductId,
};

/// Initializes the tracing subscriber.
///
/// Default level is `info`; override with `RUST_LOG` (e.g. `RUST_LOG=debug`).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Builds the demo catalog.
///
/// Cheese and Biscuits are perishable (and therefore ship); the TV is
/// non-perishable but flagged for shipping; the ScratchCard neither expires
/// nor ships.
fn demo_catalog(now: DateTime<Utc>) -> CoreResult<(Inventory, [ProductId; 4])> {
    let mut inventory = Inventory::new();
    let tomorrow = now + Duration::days(1);

    let cheese = inventory.insert(Product::perishable(
        "Cheese",
        Money::from_major_minor(100, 0),
        5,
        200,
        tomorrow,
    )?);
    let biscuits = inventory.insert(Product::perishable(
        "Biscuits",
        Money::from_major_minor(150, 0),
        3,
        700,
        tomorrow,
    )?);
    let tv = inventory.insert(Product::non_perishable(
        "TV",
        Money::from_major_minor(200, 0),
        3,
        10_000,
        true,
    )?);
    let scratch_card = inventory.insert(Product::non_perishable(
        "ScratchCard",
        Money::from_major_minor(50, 0),
        10,
        0,
        false,
    )?);

    Ok((inventory, [cheese, biscuits, tv, scratch_card]))
}

/// Looks a product up by id, mapping a miss to the domain error.
fn product<'a>(inventory: &'a Inventory, id: &ProductId) -> CoreResult<&'a Product> {
    inventory.get(id).ok_or(CoreError::ProductNotFound(*id))
}

/// Runs the demo: one checkout against the fixed catalog.
pub fn run() -> CoreResult<()> {
    init_tracing();
    info!("starting till register demo");

    let now = Utc::now();
    let (mut inventory, [cheese, biscuits, tv, scratch_card]) = demo_catalog(now)?;
    info!(products = inventory.len(), "demo catalog ready");

    // Balance 2000.00 covers the 1030.00 total; a 1000.00 wallet would fail
    // the funds check against the same cart.
    let mut customer = Customer::new(Money::from_major_minor(2000, 0));

    let mut cart = Cart::new();
    cart.add(product(&inventory, &cheese)?, 2, now)?;
    cart.add(product(&inventory, &biscuits)?, 1, now)?;
    cart.add(product(&inventory, &tv)?, 3, now)?;
    cart.add(product(&inventory, &scratch_card)?, 1, now)?;
    info!(lines = cart.len(), "cart filled");

    let receipt = checkout(&mut inventory, &cart, &mut customer, now)?;
    info!(
        total = %receipt.total,
        balance_after = %receipt.balance_after,
        "checkout complete"
    );

    if let Some(notice) = &receipt.shipment {
        println!("{notice}");
        println!();
    }
    println!("{receipt}");

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
