//! # Collaborator Ports
//!
//! The form layer never talks to the network, storage or the session
//! directly. Every collaborator is an injected trait object:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DocumentForm                                       │
//! │                                                                         │
//! │   fetch once per session        on submit           at construction     │
//! │   ┌──────────────────┐     ┌────────────────┐     ┌────────────────┐   │
//! │   │  CatalogSource   │     │ DocumentStore  │     │    Session     │   │
//! │   │  ClientDirectory │     │ save_document  │     │  current_user  │   │
//! │   └────────┬─────────┘     └───────┬────────┘     └────────┬───────┘   │
//! │            │                       │                       │            │
//! │            ▼                       ▼                       ▼            │
//! │      REST backend            REST backend           auth context        │
//! │      (out of scope)          (out of scope)         (out of scope)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The server is the source of truth for billing: it recomputes and
//! validates totals on save. The totals this engine sends are advisory
//! display values.
//!
//! `Session` replaces the legacy panel's global auth context with a
//! read-only accessor passed in at construction; nothing in this workspace
//! reads or writes global state.

use async_trait::async_trait;
use thiserror::Error;

use crate::dto::{CatalogEntryDto, ClientDto, DocumentDto, SavedDocument};

// =============================================================================
// Port Error
// =============================================================================

/// Failure of a collaborator call.
#[derive(Debug, Clone, Error)]
pub enum PortError {
    /// The backend answered with a rejection; `message` is its reason and
    /// is shown to the user verbatim.
    #[error("{message}")]
    Rejected { message: String },

    /// Transport-level failure with no server response (timeout, network
    /// down). The UI falls back to a generic message.
    #[error("transport failure: {detail}")]
    Transport { detail: String },
}

/// Convenience type alias for Results with PortError.
pub type PortResult<T> = Result<T, PortError>;

// =============================================================================
// Read-Side Ports
// =============================================================================

/// Read-only product/service catalog. Fetched once per form session.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> PortResult<Vec<CatalogEntryDto>>;
}

/// Read-only client directory.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn fetch_clients(&self) -> PortResult<Vec<ClientDto>>;
}

// =============================================================================
// Persistence Port
// =============================================================================

/// Saves a document. Accepts a document with totals populated; the server
/// recomputes them server-side and its figures win.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn save_document(&self, doc: &DocumentDto) -> PortResult<SavedDocument>;
}

// =============================================================================
// Session Accessor
// =============================================================================

/// The authenticated user attached to saved documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

/// Injected read-only view of the current session.
///
/// Synchronous on purpose: the session is already resolved by the time a
/// form is constructed, and the core must never suspend.
pub trait Session: Send + Sync {
    fn current_user(&self) -> UserRef;
}

/// Fixed-user session, useful for tests and for backends that resolve the
/// user ahead of form construction.
#[derive(Debug, Clone)]
pub struct StaticSession {
    user: UserRef,
}

impl StaticSession {
    pub fn new(user: UserRef) -> Self {
        StaticSession { user }
    }
}

impl Session for StaticSession {
    fn current_user(&self) -> UserRef {
        self.user.clone()
    }
}
