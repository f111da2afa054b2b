//! # Customer Module
//!
//! The paying customer: a balance and one operation against it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// A customer with a spendable balance.
///
/// ## Invariant
/// The balance only decreases through a successful [`Customer::pay`]; a
/// failed payment leaves it untouched (no partial debit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    balance: Money,
}

impl Customer {
    /// Creates a customer with an initial balance.
    pub fn new(balance: Money) -> Self {
        Customer { balance }
    }

    /// Current balance.
    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Debits `amount` from the balance.
    ///
    /// ## Behavior
    /// Fails with [`CoreError::InsufficientFunds`] if `amount` exceeds the
    /// balance; the debit is atomic and nothing changes on failure.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Customer, Money};
    ///
    /// let mut customer = Customer::new(Money::from_cents(200_000));
    /// customer.pay(Money::from_cents(103_000)).unwrap();
    /// assert_eq!(customer.balance(), Money::from_cents(97_000));
    /// ```
    pub fn pay(&mut self, amount: Money) -> CoreResult<()> {
        if amount > self.balance {
            return Err(CoreError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_debits_balance() {
        let mut customer = Customer::new(Money::from_cents(200_000));
        customer.pay(Money::from_cents(103_000)).unwrap();
        assert_eq!(customer.balance(), Money::from_cents(97_000));
    }

    #[test]
    fn test_pay_fails_without_touching_balance() {
        let mut customer = Customer::new(Money::from_cents(100_000));
        let err = customer.pay(Money::from_cents(103_000)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientFunds { required, available }
                if required == Money::from_cents(103_000)
                    && available == Money::from_cents(100_000)
        ));
        assert_eq!(customer.balance(), Money::from_cents(100_000));
    }

    #[test]
    fn test_pay_exact_balance_empties_it() {
        let mut customer = Customer::new(Money::from_cents(5_000));
        customer.pay(Money::from_cents(5_000)).unwrap();
        assert!(customer.balance().is_zero());
    }
}
