//! # folio-form: Document Form Aggregate for the Folio Engine
//!
//! The orchestration layer between the admin panel UI and the pure
//! calculators in `folio-core`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI edit event                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DocumentForm::change_item ──► apply_item_change (coerce, one line)     │
//! │       │                              │                                  │
//! │       │                              ▼                                  │
//! │       │                        calculate_totals (full list)             │
//! │       │                              │                                  │
//! │       ├──────────────────────────────┴──► totals stored on Document     │
//! │       │                                                                 │
//! │       └──► check_stock against the catalog snapshot ──► advisory        │
//! │            warning map (never blocks the edit)                          │
//! │                                                                         │
//! │  Submit ──► validate_for_save ──► DocumentStore::save_document          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`form`] - The [`form::DocumentForm`] aggregate and its state machine
//! - [`ports`] - Collaborator traits (catalog, clients, store, session)
//! - [`dto`] - Wire DTOs and the one-time normalization boundary
//! - [`error`] - Form error taxonomy

pub mod dto;
pub mod error;
pub mod form;
pub mod ports;

pub use dto::{CatalogEntryDto, ClientDto, DocumentDto, LineItemDto, SavedDocument};
pub use error::{FormError, FormResult, GENERIC_SAVE_MESSAGE};
pub use form::{DocumentForm, FormPhase};
pub use ports::{
    CatalogSource, ClientDirectory, DocumentStore, PortError, PortResult, Session, StaticSession,
    UserRef,
};
