//! # Register Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Build the demo catalog, cart and customer
//! 3. Run one checkout
//! 4. Print the shipment notice and receipt

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match till_register::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("checkout failed: {err}");
            ExitCode::FAILURE
        }
    }
}
