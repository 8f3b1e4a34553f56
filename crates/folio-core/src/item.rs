//! # Line-Item Mutator
//!
//! Applies a single field edit to one line item and recomputes that line's
//! subtotal. The orchestrator then runs the totals calculator over the full
//! resulting list.
//!
//! ## The "Never Block Typing" Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The user is mid-edit. Whatever arrives from the input field,           │
//! │  the mutator MUST NOT fail:                                             │
//! │                                                                         │
//! │  quantity  "-5", "abc", null, 0  ──────►  1   (floor at 1)              │
//! │  quantity  "2.7", 2.7            ──────►  2   (integer truncation)      │
//! │  price     "abc", null, -3       ──────►  0.00                          │
//! │  price     "12.34", 12.34        ──────►  12.34                         │
//! │  taxExempt true/false            ──────►  passthrough                   │
//! │  taxExempt anything else         ──────►  false                         │
//! │                                                                         │
//! │  Out-of-range index ───────────────────►  list returned unchanged       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits are applied copy-on-write: the input slice is never mutated, a new
//! `Vec` comes back with exactly one item replaced.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::money::Money;
use crate::types::LineItem;

// =============================================================================
// Editable Fields
// =============================================================================

/// The line-item fields a UI edit event can target.
///
/// The wire name `price` is the legacy synonym for `unitPrice`; both
/// deserialize to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Quantity,
    #[serde(alias = "price")]
    UnitPrice,
    TaxExempt,
}

// =============================================================================
// Coercion
// =============================================================================

/// Coerces a raw UI value into a valid quantity.
///
/// Integer truncation (the legacy panel used `parseInt`), then floored at 1:
/// non-numeric, null, zero and negative input all become 1.
pub fn coerce_quantity(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => {
            let q = v.trunc() as i64;
            q.max(1)
        }
        _ => 1,
    }
}

/// Coerces a raw UI value into a valid unit price.
///
/// Accepts JSON numbers and decimal strings; anything unparseable or
/// negative becomes zero.
pub fn coerce_unit_price(value: &Value) -> Money {
    let parsed = match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(|v| Money::from_cents((v * 100.0).round() as i64)),
        Value::String(s) => Money::from_decimal_str(s),
        _ => None,
    };

    match parsed {
        Some(price) if !price.is_negative() => price,
        _ => Money::zero(),
    }
}

/// Coerces a raw UI value into the exemption flag. Boolean passthrough;
/// anything else is treated as not exempt.
pub fn coerce_tax_exempt(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

// =============================================================================
// Mutator
// =============================================================================

/// Applies one field edit to the item at `index`.
///
/// Returns a new list with the one item replaced and its `line_subtotal`
/// recomputed; all other items are unchanged. An out-of-range index returns
/// the input list as-is (edits never error; see module docs).
///
/// The caller is responsible for running
/// [`crate::totals::calculate_totals`] over the result; this function only
/// touches one line.
pub fn apply_item_change(
    items: &[LineItem],
    index: usize,
    field: ItemField,
    value: &Value,
) -> Vec<LineItem> {
    let mut next: Vec<LineItem> = items.to_vec();

    let Some(item) = next.get_mut(index) else {
        return next;
    };

    match field {
        ItemField::Quantity => item.quantity = coerce_quantity(value),
        ItemField::UnitPrice => item.unit_price = coerce_unit_price(value),
        ItemField::TaxExempt => item.tax_exempt = coerce_tax_exempt(value),
    }
    item.recompute_subtotal();

    next
}

// =============================================================================
// Unit Tests
// =============================================================================
