//! # Totals Calculator
//!
//! The single place where document totals come from.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_totals(items)                              │
//! │                                                                         │
//! │  items ──► per line: qty × unit_price (invalid fields contribute 0)     │
//! │                │                                                        │
//! │                ├──► subtotal      = Σ all lines                         │
//! │                │                                                        │
//! │                ├──► taxable base  = Σ non-exempt lines                  │
//! │                │         │                                              │
//! │                │         ▼                                              │
//! │                │    × 16% (TAX_RATE), ONE half-up rounding              │
//! │                │         │                                              │
//! │                ├──► tax_amount ◄──┘                                     │
//! │                │                                                        │
//! │                └──► total = subtotal + tax_amount                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Contract
//! Tax is rounded once, on the aggregate taxable base, never per line. The
//! legacy panel summed raw line subtotals and rounded only the final figure;
//! rounding per line would drift from its totals by a cent on mixed carts.

use crate::money::Money;
use crate::types::{DocumentTotals, LineItem};
use crate::TAX_RATE;

/// Computes subtotal, tax and total over the full item list.
///
/// Pure and total: no side effects, never errors, and calling it twice on
/// the same input yields identical output. An empty list returns all zeros.
///
/// Lines whose stored fields are outside the at-rest range (possible only in
/// hydrated legacy records: negative price, non-positive quantity)
/// contribute 0 for the offending field instead of failing.
///
/// The stored `line_subtotal` is deliberately ignored: derived data is
/// never trusted, it is recomputed from quantity × unit price.
pub fn calculate_totals(items: &[LineItem]) -> DocumentTotals {
    let mut subtotal = Money::zero();
    let mut taxable = Money::zero();

    for item in items {
        let quantity = item.quantity.max(0);
        let unit_price = if item.unit_price.is_negative() {
            Money::zero()
        } else {
            item.unit_price
        };

        let line = unit_price.times(quantity);
        subtotal += line;
        if !item.tax_exempt {
            taxable += line;
        }
    }

    let tax_amount = taxable.tax_at(TAX_RATE);

    DocumentTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
