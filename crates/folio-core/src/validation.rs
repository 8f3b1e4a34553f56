//! # Pre-Save Validation
//!
//! The validation gate that runs when the user submits the form. Unlike the
//! coercion layer (which silently normalizes while the user types), this
//! gate blocks submission, but it still never throws: failures come back as
//! a field→message map the UI renders inline.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  client       a client must be selected                                 │
//! │  items        at least one line item                                    │
//! │  items[i].*   quantity ≥ 1, unit price ≥ 0                              │
//! │  creditDays   ≥ 1, but ONLY when payment terms are credit               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The per-item rules cannot fail for items that went through the coercion
//! layer; they exist for hydrated legacy records whose stored values predate
//! the coercion rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::types::{Document, PaymentTerms};

// =============================================================================
// Field Errors
// =============================================================================

/// Ordered field→message map returned by the validation gate.
///
/// Keys are the wire-facing (camelCase) field names the frontend binds
/// inline messages to; `items[2].quantity` style for per-line errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Records a message for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Drops the message for one field (used when a rule stops applying,
    /// e.g. leaving credit terms clears the creditDays error).
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// True when nothing blocks submission.
    pub fn is_clean(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// Validation Gate
// =============================================================================

/// Validates a document for submission.
///
/// Returns an empty map when the document can be saved. Never panics, never
/// returns a Result: validation failure is ordinary data, not an error.
pub fn validate_for_save(doc: &Document) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if doc.client_ref.is_none() {
        errors.insert("client", "a client must be selected");
    }

    if doc.items.is_empty() {
        errors.insert("items", "at least one line item is required");
    }

    for (i, item) in doc.items.iter().enumerate() {
        if item.quantity < 1 {
            errors.insert(
                format!("items[{i}].quantity"),
                "quantity must be at least 1",
            );
        }
        if item.unit_price.is_negative() {
            errors.insert(
                format!("items[{i}].unitPrice"),
                "unit price cannot be negative",
            );
        }
    }

    if doc.payment_terms == PaymentTerms::Credit && doc.credit_days < 1 {
        errors.insert("creditDays", "credit days must be a positive number");
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================
