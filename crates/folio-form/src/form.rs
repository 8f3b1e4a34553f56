//! # Document Form Aggregate
//!
//! Owns the canonical document state and coordinates the pure core on every
//! mutation.
//!
//! ## Form Phase State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────┐  first edit  ┌─────────┐  submit()  ┌────────────┐        │
//! │  │  Empty  │─────────────►│ Editing │───────────►│ Validating │        │
//! │  └─────────┘              └─────────┘            └─────┬──────┘        │
//! │       ▲                     ▲    ▲                     │               │
//! │       │ reset (new)         │    │ validation failed   │ clean         │
//! │       │                     │    └─────────────────────┤               │
//! │       │                     │ save rejected            ▼               │
//! │       │                     │                   ┌────────────┐        │
//! │       │                     └───────────────────│ Submitting │        │
//! │       │                                         └─────┬──────┘        │
//! │       │                  reset (existing record       │ saved         │
//! │       │                  re-hydrates to Editing)      ▼               │
//! │       │                                         ┌────────────┐        │
//! │       └─────────────────────────────────────────│   Saved    │        │
//! │                                                 └────────────┘        │
//! │                                                                         │
//! │  No other states. Cancel/reset never touches the backend. Saved is     │
//! │  terminal: edits arriving in Saved are dropped until reset.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Pipeline
//! Every item mutation runs the same three steps: apply the edit (coercion
//! included), recompute totals over the FULL list, refresh the advisory
//! stock warnings. There is no incremental path; documents carry tens of
//! lines at most.
//!
//! ## Concurrency Model
//! One form instance, one writer: all mutation is `&mut self`, so the
//! borrow checker enforces the "UI events run to completion" model of the
//! original panel. The double-submit guard exists on top of that because a
//! UI can still *queue* a second submit after the first completes a phase:
//! the original panel had nothing against two rapid save clicks; this
//! implementation closes that gap deliberately.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use uuid::Uuid;

use folio_core::{
    apply_item_change, calculate_totals, check_stock, validate_for_save, CatalogEntry, Client,
    Currency, Document, DocumentKind, DocumentTotals, FieldErrors, ItemField, LineItem,
    PaymentTerms, StockCheck,
};

use crate::dto::{CatalogEntryDto, ClientDto, DocumentDto, SavedDocument};
use crate::error::{FormError, FormResult, GENERIC_SAVE_MESSAGE};
use crate::ports::{CatalogSource, ClientDirectory, DocumentStore, PortError, Session, UserRef};

// =============================================================================
// Form Phase
// =============================================================================

/// Lifecycle phase of the form. See the module docs for the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// New form, nothing entered yet.
    Empty,
    /// Items being added/changed; also the landing phase after a failed
    /// validation or a rejected save.
    Editing,
    /// Running the pre-save validation gate (transient, within `submit`).
    Validating,
    /// Save request in flight.
    Submitting,
    /// Saved successfully; terminal until `reset`. Mutations arriving in
    /// this phase are dropped so the form never diverges from the stored
    /// record.
    Saved,
}

// =============================================================================
// Document Form
// =============================================================================

/// The form aggregate: canonical document state plus the session snapshots
/// (catalog, clients) and advisory warnings that hang off it.
pub struct DocumentForm {
    /// Correlation id for tracing; one per form instance.
    form_id: Uuid,
    phase: FormPhase,
    document: Document,
    /// Catalog snapshot, fetched once per form session.
    catalog: Vec<CatalogEntry>,
    clients: Vec<Client>,
    /// Advisory stock warnings by item index. Never blocks anything.
    stock_warnings: BTreeMap<usize, StockCheck>,
    /// Inline messages from the last failed validation.
    field_errors: FieldErrors,
    user: UserRef,
    /// Hydration snapshot for reset of existing records.
    baseline: Option<Document>,
}

impl DocumentForm {
    /// Creates an empty form for a new document.
    pub fn new(kind: DocumentKind, session: &dyn Session) -> Self {
        let user = session.current_user();
        let form_id = Uuid::new_v4();
        debug!(form_id = %form_id, user = %user.id, ?kind, "new document form");

        DocumentForm {
            form_id,
            phase: FormPhase::Empty,
            document: Document::empty(kind),
            catalog: Vec::new(),
            clients: Vec::new(),
            stock_warnings: BTreeMap::new(),
            field_errors: FieldErrors::new(),
            user,
            baseline: None,
        }
    }

    /// Opens an existing record in the form.
    ///
    /// Normalizes the wire record once (synonyms, refs, stored strings) and
    /// keeps the normalized snapshot for `reset`. Starts in `Editing`.
    pub fn hydrate(dto: DocumentDto, session: &dyn Session) -> FormResult<Self> {
        let document = dto.into_document()?;
        let user = session.current_user();
        let form_id = Uuid::new_v4();
        debug!(form_id = %form_id, id = ?document.id, "hydrated document form");

        Ok(DocumentForm {
            form_id,
            phase: FormPhase::Editing,
            baseline: Some(document.clone()),
            document,
            catalog: Vec::new(),
            clients: Vec::new(),
            stock_warnings: BTreeMap::new(),
            field_errors: FieldErrors::new(),
            user,
        })
    }

    // =========================================================================
    // Session Fetches (once per form session)
    // =========================================================================

    /// Loads the catalog snapshot used for product selection and the
    /// advisory stock checks.
    pub async fn load_catalog(&mut self, source: &dyn CatalogSource) -> FormResult<()> {
        let entries = source.fetch_catalog().await?;
        self.catalog = entries
            .into_iter()
            .map(CatalogEntryDto::into_entry)
            .collect::<Result<_, _>>()?;
        debug!(form_id = %self.form_id, count = self.catalog.len(), "catalog loaded");
        Ok(())
    }

    /// Loads the client directory snapshot.
    pub async fn load_clients(&mut self, directory: &dyn ClientDirectory) -> FormResult<()> {
        let clients = directory.fetch_clients().await?;
        self.clients = clients.into_iter().map(ClientDto::into_client).collect();
        debug!(form_id = %self.form_id, count = self.clients.len(), "clients loaded");
        Ok(())
    }

    // =========================================================================
    // Item Mutations
    // =========================================================================

    /// Replaces the entire item list from a product selection.
    ///
    /// Full replace, not a merge: every selected entry becomes a fresh line
    /// with quantity 1 and the catalog price/exemption, so re-selecting
    /// discards prior quantity/price/exemption edits even for entries that
    /// remain selected. The legacy panel behaves this way; it is preserved
    /// as observable behavior (and flagged in DESIGN.md as a UX rough
    /// edge), not silently "fixed".
    pub fn select_products(&mut self, entries: &[CatalogEntry]) {
        if self.locked() {
            return;
        }
        debug!(form_id = %self.form_id, count = entries.len(), "select products (full replace)");
        self.document.items = entries.iter().map(LineItem::from_catalog).collect();
        self.after_items_changed();
    }

    /// Applies one field edit to one line, then recomputes totals over the
    /// full list. Coercion guarantees this never fails, whatever the UI
    /// sends; the stock check runs alongside and only annotates.
    pub fn change_item(&mut self, index: usize, field: ItemField, value: &Value) {
        if self.locked() {
            return;
        }
        debug!(form_id = %self.form_id, index, ?field, "change item");
        self.document.items = apply_item_change(&self.document.items, index, field, value);
        self.after_items_changed();
    }

    /// Appends an empty free-text line.
    pub fn add_blank_item(&mut self) {
        if self.locked() {
            return;
        }
        self.document.items.push(LineItem::blank());
        self.after_items_changed();
    }

    /// Removes a line. Out-of-range index is a no-op, same as the mutator.
    pub fn remove_item(&mut self, index: usize) {
        if self.locked() {
            return;
        }
        if index < self.document.items.len() {
            self.document.items.remove(index);
        }
        self.after_items_changed();
    }

    /// Shared tail of every item mutation: totals over the full list,
    /// advisory warnings refreshed wholesale, phase moves to editing.
    fn after_items_changed(&mut self) {
        self.document.totals = calculate_totals(&self.document.items);
        self.refresh_stock_warnings();
        self.mark_editing();
    }

    fn refresh_stock_warnings(&mut self) {
        self.stock_warnings.clear();
        for (index, item) in self.document.items.iter().enumerate() {
            let Some(product_ref) = item.product_ref.as_deref() else {
                continue;
            };
            let Some(entry) = self.catalog.iter().find(|e| e.id == product_ref) else {
                continue;
            };
            let check = check_stock(entry, item.quantity);
            if !check.ok {
                warn!(
                    form_id = %self.form_id,
                    index,
                    requested = item.quantity,
                    available = ?check.available,
                    "stock shortfall (advisory)"
                );
                self.stock_warnings.insert(index, check);
            }
        }
    }

    // =========================================================================
    // Header Mutations
    // =========================================================================

    /// Selects the billing client.
    pub fn set_client(&mut self, client: &Client) {
        if self.locked() {
            return;
        }
        self.document.client_ref = Some(client.id.clone());
        self.document.client_name = Some(client.name.clone());
        self.field_errors.clear_field("client");
        self.mark_editing();
    }

    pub fn set_currency(&mut self, currency: Currency) {
        if self.locked() {
            return;
        }
        self.document.currency = currency;
        self.mark_editing();
    }

    /// Switches payment terms. Leaving credit terms forces `credit_days`
    /// back to 0 and clears any stale credit-days message.
    pub fn set_payment_terms(&mut self, terms: PaymentTerms) {
        if self.locked() {
            return;
        }
        self.document.payment_terms = terms;
        if terms != PaymentTerms::Credit {
            self.document.credit_days = 0;
            self.field_errors.clear_field("creditDays");
        }
        self.mark_editing();
    }

    pub fn set_credit_days(&mut self, days: i64) {
        if self.locked() {
            return;
        }
        self.document.credit_days = days;
        self.mark_editing();
    }

    /// Saved is terminal: the document on the form matches what the backend
    /// stored, and mutating it would desync the two with no way to resubmit
    /// (`AlreadySaved`). Every mutator checks this and drops the edit;
    /// editing after a save requires an explicit `reset`.
    fn locked(&self) -> bool {
        self.phase == FormPhase::Saved
    }

    fn mark_editing(&mut self) {
        self.phase = FormPhase::Editing;
    }

    // =========================================================================
    // Submit Pipeline
    // =========================================================================

    /// Validates and saves the document.
    ///
    /// ## Pipeline
    /// 1. Guard: drop duplicate submits (`Submitting`) and re-submits of a
    ///    saved document (`Saved`).
    /// 2. `Validating`: run the gate; failures return the field map and put
    ///    the form back in `Editing`.
    /// 3. `Submitting`: send the outbound DTO. Success lands in `Saved` and
    ///    adopts the backend id; rejection returns to `Editing` carrying
    ///    the server message (or the generic fallback for transport
    ///    failures). No automatic retry.
    pub async fn submit(&mut self, store: &dyn DocumentStore) -> FormResult<SavedDocument> {
        match self.phase {
            FormPhase::Submitting => return Err(FormError::SubmitInProgress),
            FormPhase::Saved => return Err(FormError::AlreadySaved),
            _ => {}
        }

        self.phase = FormPhase::Validating;
        let errors = validate_for_save(&self.document);
        if !errors.is_clean() {
            debug!(form_id = %self.form_id, fields = errors.len(), "validation failed");
            self.field_errors = errors.clone();
            self.phase = FormPhase::Editing;
            return Err(FormError::ValidationFailed(errors));
        }
        self.field_errors = FieldErrors::new();

        self.phase = FormPhase::Submitting;
        let payload = DocumentDto::from_document(&self.document, &self.user.id);
        debug!(form_id = %self.form_id, total = %self.document.totals.total, "submitting document");

        match store.save_document(&payload).await {
            Ok(saved) => {
                self.document.id = Some(saved.id.clone());
                self.document.updated_at = saved.updated_at.or(self.document.updated_at);
                self.phase = FormPhase::Saved;
                debug!(form_id = %self.form_id, id = %saved.id, "document saved");
                Ok(saved)
            }
            Err(PortError::Rejected { message }) => {
                warn!(form_id = %self.form_id, %message, "save rejected");
                self.phase = FormPhase::Editing;
                Err(FormError::SaveFailed { message })
            }
            Err(PortError::Transport { detail }) => {
                warn!(form_id = %self.form_id, %detail, "save transport failure");
                self.phase = FormPhase::Editing;
                Err(FormError::SaveFailed {
                    message: GENERIC_SAVE_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Cancels/resets the form with no backend side effects.
    ///
    /// A form opened on an existing record re-hydrates to its loaded state
    /// (`Editing`); a new-document form clears back to `Empty`.
    pub fn reset(&mut self) {
        debug!(form_id = %self.form_id, "reset");
        self.stock_warnings.clear();
        self.field_errors = FieldErrors::new();
        match &self.baseline {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.phase = FormPhase::Editing;
            }
            None => {
                self.document = Document::empty(self.document.kind);
                self.phase = FormPhase::Empty;
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn form_id(&self) -> Uuid {
        self.form_id
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn totals(&self) -> DocumentTotals {
        self.document.totals
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Advisory stock warnings by item index (only shortfalls are kept).
    pub fn stock_warnings(&self) -> &BTreeMap<usize, StockCheck> {
        &self.stock_warnings
    }

    /// Inline messages from the last failed validation.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use folio_core::{CatalogKind, Money};

    use crate::ports::StaticSession;

    /// Installs the log subscriber once so `RUST_LOG=debug cargo test`
    /// shows the pipeline's tracing output.
    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn session() -> StaticSession {
        init_logging();
        StaticSession::new(UserRef {
            id: "u1".into(),
            name: "ana".into(),
        })
    }

    fn entry(id: &str, kind: CatalogKind, price_cents: i64, stock: Option<i64>) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            kind,
            code: Some(format!("C-{id}")),
            description: Some(format!("Entry {id}")),
            unit_price: Money::from_cents(price_cents),
            available_stock: stock,
            tax_exempt: false,
        }
    }

    fn client() -> Client {
        Client {
            id: "c1".into(),
            name: "Acme C.A.".into(),
            tax_id: None,
        }
    }

    /// Save port that counts calls and answers with a fixed outcome.
    struct FakeStore {
        calls: AtomicUsize,
        outcome: Result<String, PortError>,
    }

    impl FakeStore {
        fn saving_as(id: &str) -> Self {
            FakeStore {
                calls: AtomicUsize::new(0),
                outcome: Ok(id.to_string()),
            }
        }

        fn failing_with(err: PortError) -> Self {
            FakeStore {
                calls: AtomicUsize::new(0),
                outcome: Err(err),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        async fn save_document(&self, _doc: &DocumentDto) -> Result<SavedDocument, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(id) => Ok(SavedDocument {
                    id: id.clone(),
                    updated_at: None,
                }),
                Err(err) => Err(err.clone()),
            }
        }
    }

    /// A form with a client and one taxed product line, ready to submit.
    fn editing_form() -> DocumentForm {
        let mut form = DocumentForm::new(DocumentKind::Invoice, &session());
        form.catalog = vec![
            entry("p1", CatalogKind::Product, 10_000, Some(3)),
            entry("s1", CatalogKind::Service, 5000, None),
        ];
        form.set_client(&client());
        let selection = form.catalog.clone();
        form.select_products(&selection[..1]);
        form
    }

    #[test]
    fn test_new_form_starts_empty() {
        let form = DocumentForm::new(DocumentKind::Quote, &session());
        assert_eq!(form.phase(), FormPhase::Empty);
        assert!(form.document().items.is_empty());
        assert_eq!(form.totals(), DocumentTotals::zero());
    }

    #[test]
    fn test_selection_is_a_full_replace_that_resets_edits() {
        let mut form = editing_form();

        // Edit the line: quantity 5, exempt
        form.change_item(0, ItemField::Quantity, &json!(5));
        form.change_item(0, ItemField::TaxExempt, &json!(true));
        assert_eq!(form.document().items[0].quantity, 5);
        assert!(form.document().items[0].tax_exempt);

        // Re-select the same product plus the service: edits are discarded
        let selection = form.catalog.clone();
        form.select_products(&selection);
        assert_eq!(form.document().items.len(), 2);
        assert_eq!(form.document().items[0].quantity, 1);
        assert!(!form.document().items[0].tax_exempt);
    }

    #[test]
    fn test_change_item_recomputes_totals_over_full_list() {
        let mut form = editing_form();
        form.change_item(0, ItemField::Quantity, &json!(2));

        // 2 × 100.00 = 200.00, tax 32.00
        assert_eq!(form.totals().subtotal.cents(), 20_000);
        assert_eq!(form.totals().tax_amount.cents(), 3200);
        assert_eq!(form.totals().total.cents(), 23_200);
    }

    #[test]
    fn test_stock_shortfall_warns_but_never_blocks() {
        let mut form = editing_form();

        // Catalog has 3 on hand; ask for 10
        form.change_item(0, ItemField::Quantity, &json!(10));

        let warning = form.stock_warnings().get(&0).expect("warning recorded");
        assert!(!warning.ok);
        assert_eq!(warning.available, Some(3));

        // The edit still applied in full
        assert_eq!(form.document().items[0].quantity, 10);
        assert_eq!(form.document().items[0].line_subtotal.cents(), 100_000);

        // Dropping back under stock clears the warning
        form.change_item(0, ItemField::Quantity, &json!(2));
        assert!(form.stock_warnings().is_empty());
    }

    #[test]
    fn test_service_lines_never_warn() {
        let mut form = editing_form();
        let selection = vec![form.catalog[1].clone()];
        form.select_products(&selection);
        form.change_item(0, ItemField::Quantity, &json!(999));
        assert!(form.stock_warnings().is_empty());
    }

    #[test]
    fn test_leaving_credit_terms_clears_days_and_error() {
        let mut form = editing_form();
        form.set_payment_terms(PaymentTerms::Credit);
        form.set_credit_days(0);
        form.field_errors
            .insert("creditDays", "credit days must be a positive number");

        form.set_payment_terms(PaymentTerms::Cash);
        assert_eq!(form.document().credit_days, 0);
        assert!(form.field_errors().get("creditDays").is_none());
    }

    #[test]
    fn test_add_and_remove_blank_lines() {
        let mut form = editing_form();
        form.add_blank_item();
        assert_eq!(form.document().items.len(), 2);

        form.remove_item(1);
        assert_eq!(form.document().items.len(), 1);

        // Out-of-range removal is a no-op
        form.remove_item(9);
        assert_eq!(form.document().items.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let mut form = editing_form();
        let store = FakeStore::saving_as("doc-1");

        let saved = form.submit(&store).await.expect("save succeeds");
        assert_eq!(saved.id, "doc-1");
        assert_eq!(form.phase(), FormPhase::Saved);
        assert_eq!(form.document().id.as_deref(), Some("doc-1"));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_blocked_by_validation_returns_to_editing() {
        let mut form = DocumentForm::new(DocumentKind::Invoice, &session());
        let store = FakeStore::saving_as("doc-1");

        let err = form.submit(&store).await.unwrap_err();
        let FormError::ValidationFailed(errors) = err else {
            panic!("expected ValidationFailed");
        };
        assert!(errors.get("client").is_some());
        assert!(errors.get("items").is_some());
        assert_eq!(form.phase(), FormPhase::Editing);
        // The store was never reached
        assert_eq!(store.calls(), 0);
        // Messages stay on the form for inline display
        assert!(!form.field_errors().is_clean());
    }

    #[tokio::test]
    async fn test_rejected_save_surfaces_server_message() {
        let mut form = editing_form();
        let store = FakeStore::failing_with(PortError::Rejected {
            message: "invoice number already exists".into(),
        });

        let err = form.submit(&store).await.unwrap_err();
        let FormError::SaveFailed { message } = err else {
            panic!("expected SaveFailed");
        };
        assert_eq!(message, "invoice number already exists");
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_generic_message() {
        let mut form = editing_form();
        let store = FakeStore::failing_with(PortError::Transport {
            detail: "connection refused".into(),
        });

        let err = form.submit(&store).await.unwrap_err();
        let FormError::SaveFailed { message } = err else {
            panic!("expected SaveFailed");
        };
        assert_eq!(message, GENERIC_SAVE_MESSAGE);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_duplicate_submit_is_dropped() {
        let mut form = editing_form();
        let store = FakeStore::saving_as("doc-1");

        // In-flight guard: a submit arriving while one is in flight is
        // dropped without reaching the store.
        form.phase = FormPhase::Submitting;
        assert!(matches!(
            form.submit(&store).await,
            Err(FormError::SubmitInProgress)
        ));
        assert_eq!(store.calls(), 0);

        // After a successful save, another click is also dropped.
        form.phase = FormPhase::Editing;
        form.submit(&store).await.expect("save succeeds");
        assert!(matches!(
            form.submit(&store).await,
            Err(FormError::AlreadySaved)
        ));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_saved_form_drops_edits_until_reset() {
        let mut form = editing_form();
        let store = FakeStore::saving_as("doc-1");
        form.submit(&store).await.expect("save succeeds");

        // Edits after a save are dropped: the form must not diverge from
        // the stored record it can no longer resubmit.
        form.change_item(0, ItemField::Quantity, &json!(7));
        form.set_credit_days(30);
        form.add_blank_item();
        assert_eq!(form.phase(), FormPhase::Saved);
        assert_eq!(form.document().items.len(), 1);
        assert_eq!(form.document().items[0].quantity, 1);
        assert_eq!(form.document().credit_days, 0);

        // An explicit reset unlocks editing again
        form.reset();
        form.add_blank_item();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.document().items.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_new_form_clears_to_empty() {
        let mut form = editing_form();
        form.reset();
        assert_eq!(form.phase(), FormPhase::Empty);
        assert!(form.document().items.is_empty());
        assert!(form.document().client_ref.is_none());
    }

    #[tokio::test]
    async fn test_reset_hydrated_form_restores_loaded_state() {
        let dto: DocumentDto = serde_json::from_value(json!({
            "_id": "doc-5",
            "cliente": "c1",
            "items": [ { "quantity": 2, "price": 50.0 } ]
        }))
        .unwrap();
        let mut form = DocumentForm::hydrate(dto, &session()).unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);

        form.change_item(0, ItemField::Quantity, &json!(9));
        assert_eq!(form.document().items[0].quantity, 9);

        form.reset();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.document().items[0].quantity, 2);
        assert_eq!(form.document().id.as_deref(), Some("doc-5"));
    }

    #[tokio::test]
    async fn test_load_catalog_normalizes_entries() {
        struct FakeCatalog;

        #[async_trait]
        impl CatalogSource for FakeCatalog {
            async fn fetch_catalog(&self) -> Result<Vec<CatalogEntryDto>, PortError> {
                Ok(vec![serde_json::from_value(json!({
                    "_id": "p1", "tipo": "producto", "precio": 12.5, "existencia": 4
                }))
                .unwrap()])
            }
        }

        let mut form = DocumentForm::new(DocumentKind::Invoice, &session());
        form.load_catalog(&FakeCatalog).await.unwrap();
        assert_eq!(form.catalog().len(), 1);
        assert_eq!(form.catalog()[0].unit_price.cents(), 1250);
        assert_eq!(form.catalog()[0].available_stock, Some(4));
    }
}
