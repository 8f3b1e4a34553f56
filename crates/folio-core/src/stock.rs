//! # Stock Validator
//!
//! Advisory stock check for quantity edits.
//!
//! ## Advisory, Not Blocking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types quantity 10, catalog says 3 on hand                        │
//! │                                                                         │
//! │  check_stock ──► { ok: false, available: 3 } ──► UI shows a warning     │
//! │                                                                         │
//! │  The quantity edit STILL APPLIES. Hard stock enforcement happens at     │
//! │  the fulfillment stage on the backend, not while the clerk is typing.   │
//! │  Tightening this would change observable behavior.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The constraint only exists for products with known stock; services and
//! untracked entries always pass.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CatalogEntry, CatalogKind};

/// Outcome of an advisory stock check.
///
/// `available` is populated only when a constraint actually applied, so the
/// UI can phrase the warning ("only 3 on hand").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockCheck {
    pub ok: bool,
    pub available: Option<i64>,
}

impl StockCheck {
    /// An unconstrained pass (service, or stock not tracked).
    pub const fn unconstrained() -> Self {
        StockCheck {
            ok: true,
            available: None,
        }
    }
}

/// Cross-checks a requested quantity against a catalog entry's stock.
///
/// Applies only when the entry is a product with a known stock figure;
/// otherwise the check passes unconditionally.
pub fn check_stock(entry: &CatalogEntry, requested: i64) -> StockCheck {
    match (entry.kind, entry.available_stock) {
        (CatalogKind::Product, Some(available)) => StockCheck {
            ok: requested <= available,
            available: Some(available),
        },
        _ => StockCheck::unconstrained(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
