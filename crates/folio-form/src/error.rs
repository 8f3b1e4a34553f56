//! # Form Error Types
//!
//! Error taxonomy for the form layer, mirroring what the UI needs to do
//! with each failure:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input coercion        never an error (handled in folio-core)           │
//! │  Stock shortfall       never an error (advisory StockCheck)             │
//! │  Validation failure    ValidationFailed → inline per-field messages     │
//! │  Save rejected         SaveFailed → global banner with server message   │
//! │  Double submit         SubmitInProgress / AlreadySaved → ignore click   │
//! │  Legacy hydration      Hydration → cannot open the record               │
//! │  Collaborator fetch    Port → cannot load catalog/clients               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use folio_core::{CoreError, FieldErrors};

use crate::ports::PortError;

/// Shown when a save fails without a usable server message.
pub const GENERIC_SAVE_MESSAGE: &str = "The document could not be saved. Please try again.";

/// Errors surfaced by [`crate::form::DocumentForm`] operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// A submit is already in flight; the duplicate click is dropped.
    #[error("a submit is already in progress")]
    SubmitInProgress,

    /// The document was already saved; reset the form to start a new one.
    #[error("document already saved")]
    AlreadySaved,

    /// The validation gate blocked submission. Carries the field→message
    /// map for inline display; the form returns to editing.
    #[error("validation failed for {} field(s)", .0.len())]
    ValidationFailed(FieldErrors),

    /// The backend rejected or failed the save. `message` is the server's
    /// reason when available, else [`GENERIC_SAVE_MESSAGE`]. The form
    /// returns to editing; there is no automatic retry.
    #[error("save failed: {message}")]
    SaveFailed { message: String },

    /// A persisted record could not be normalized into the core model.
    #[error("could not load document: {0}")]
    Hydration(#[from] CoreError),

    /// A collaborator fetch (catalog, clients) failed.
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Convenience type alias for Results with FormError.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_message_counts_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("client", "a client must be selected");
        errors.insert("items", "at least one line item is required");
        let err = FormError::ValidationFailed(errors);
        assert_eq!(err.to_string(), "validation failed for 2 field(s)");
    }

    #[test]
    fn test_hydration_wraps_core_error() {
        let err: FormError = CoreError::UnknownCurrency("EUR".into()).into();
        assert!(matches!(err, FormError::Hydration(_)));
        assert_eq!(err.to_string(), "could not load document: unknown currency code: EUR");
    }
}
