//! # folio-core: Pure Business Logic for the Folio Document Engine
//!
//! This crate is the **heart** of the invoicing panel's document editor. It
//! contains the totals/tax engine and its supporting rules as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Admin Panel Frontend (TypeScript)              │   │
//! │  │    Client picker ──► Product picker ──► Items table ──► Save    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ edit events                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  folio-form (orchestrator)                      │   │
//! │  │    DocumentForm state machine, ports, DTO normalization         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │   item    │  │   │
//! │  │   │ Document  │  │   Money   │  │ subtotal  │  │ coercion  │  │   │
//! │  │   │ LineItem  │  │  TaxRate  │  │ tax/total │  │  mutator  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │   stock   │  │validation │  │  format   │                 │   │
//! │  │   │ advisory  │  │ save gate │  │ currency  │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Document, LineItem, CatalogEntry, ...)
//! - [`money`] - Money type with integer-cent arithmetic
//! - [`totals`] - The totals/tax calculator (single rounding, on the aggregate)
//! - [`item`] - Line-item mutator and input coercion
//! - [`stock`] - Advisory stock check (never blocks the edit)
//! - [`validation`] - Pre-save validation gate (field→message map)
//! - [`format`] - Currency display formatting (USD / VES locales)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, calculator included
//! 2. **No I/O**: network, storage, clock and session access are FORBIDDEN here
//! 3. **Integer Money**: all amounts are cents (i64); one rounding, on the
//!    aggregate tax base
//! 4. **Never Block Typing**: interactive edits coerce instead of erroring
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::totals::calculate_totals;
//! use folio_core::types::LineItem;
//! use folio_core::money::Money;
//!
//! let mut line = LineItem::blank();
//! line.unit_price = Money::from_cents(10_000); // 100.00
//! line.recompute_subtotal();
//!
//! let totals = calculate_totals(&[line]);
//! assert_eq!(totals.tax_amount.cents(), 1600); // 16%
//! assert_eq!(totals.total.cents(), 11_600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod item;
pub mod money;
pub mod stock;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use item::{apply_item_change, ItemField};
pub use money::Money;
pub use stock::{check_stock, StockCheck};
pub use totals::calculate_totals;
pub use types::*;
pub use validation::{validate_for_save, FieldErrors};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The document tax rate: 16%, in basis points.
///
/// ## Why a constant?
/// The rate is uniform across all non-exempt lines and is not configurable
/// per call; exemption is the only per-line lever. A future multi-rate
/// regime would thread the rate through the document, not through the
/// calculator's signature.
pub const TAX_RATE: types::TaxRate = types::TaxRate::from_bps(1600);
