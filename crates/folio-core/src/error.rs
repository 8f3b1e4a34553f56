//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Where Errors Can and Cannot Occur
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NEVER error (by design, "never block typing"):                         │
//! │  ├── totals::calculate_totals   - total function, empty input is fine   │
//! │  ├── item::apply_item_change    - invalid input coerces to 1 / 0        │
//! │  └── stock::check_stock         - shortfall is advisory, not an error   │
//! │                                                                         │
//! │  Return a field→message map (not an error type):                        │
//! │  └── validation::validate_for_save                                      │
//! │                                                                         │
//! │  Return CoreError (this file):                                          │
//! │  └── FromStr on the closed enums - unknown wire tokens at the DTO       │
//! │      normalization boundary in folio-form                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors raised when loose wire data cannot be normalized into the closed
/// domain enums.
///
/// These surface as hydration failures in the form layer; they never occur
/// on the interactive editing path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Currency code outside the supported set (USD, VES).
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Payment terms token not recognized (expected cash/contado or
    /// credit/credito).
    #[error("unknown payment terms: {0}")]
    UnknownPaymentTerms(String),

    /// Catalog kind token not recognized (expected product or service).
    #[error("unknown catalog kind: {0}")]
    UnknownCatalogKind(String),

    /// Document kind token not recognized (expected invoice or quote).
    #[error("unknown document kind: {0}")]
    UnknownDocumentKind(String),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
