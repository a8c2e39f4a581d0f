//! Tax and total derivation.

use common::Money;

/// Sales tax applied to every order, in percent of the subtotal.
pub const TAX_RATE_PERCENT: u32 = 10;

/// Server-derived amounts of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderTotals {
    /// Derives tax and total from the subtotal.
    ///
    /// Tax is rounded to the cent; total is always exactly `subtotal + tax`.
    pub fn from_subtotal(subtotal: Money) -> Self {
        let tax = subtotal.percentage(TAX_RATE_PERCENT);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
