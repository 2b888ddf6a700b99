//! Budget value type.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{LifecycleError, Result};

/// Currency assumed when none is given.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A project budget: an optional amount in a currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Budget {
    /// Budgeted amount, unset until someone proposes one
    pub amount: Option<f64>,

    /// ISO-4217 style currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            amount: None,
            currency: default_currency(),
        }
    }
}

impl Budget {
    /// Create a budget for `amount`, defaulting the currency to USD.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keystone_core::models::Budget;
    ///
    /// let budget = Budget::new(Some(1200.0), None);
    /// assert_eq!(budget.currency, "USD");
    ///
    /// let budget = Budget::new(Some(90.0), Some("eur".to_string()));
    /// assert_eq!(budget.currency, "EUR");
    /// ```
    pub fn new(amount: Option<f64>, currency: Option<String>) -> Self {
        Self {
            amount,
            currency: currency
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(default_currency),
        }
    }

    /// Keeps this budget's amount, or takes `amount` when none was given.
    ///
    /// A decision that only names a currency re-denominates the existing
    /// amount instead of erasing it.
    pub fn or_amount(mut self, amount: Option<f64>) -> Self {
        if self.amount.is_none() {
            self.amount = amount;
        }
        self
    }

    /// Rejects negative or non-finite amounts and blank currencies.
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(LifecycleError::invalid_input("budget.amount")
                    .with_reason(format!("must be a non-negative number, got {amount}")));
            }
        }
        if self.currency.trim().is_empty() {
            return Err(
                LifecycleError::invalid_input("budget.currency").with_reason("must not be empty")
            );
        }
        Ok(())
    }
}
