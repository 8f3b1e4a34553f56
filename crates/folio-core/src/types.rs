//! # Domain Types
//!
//! Core domain types for the Folio document engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │    Document     │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  kind           │   │  product_ref    │       │
//! │  │  kind (P|S)     │   │  currency       │   │  quantity ≥ 1   │       │
//! │  │  unit_price     │   │  payment_terms  │   │  unit_price ≥ 0 │       │
//! │  │  available_stock│   │  items[]        │   │  tax_exempt     │       │
//! │  │  tax_exempt     │   │  totals (derived)│  │  line_subtotal  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Enumerations: Currency, PaymentTerms, CatalogKind, DocumentKind        │
//! │  All parse via FromStr, accepting the legacy Spanish wire tokens.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Normalization Rule
//! The legacy backend speaks a loose dialect (string enums, Spanish field
//! synonyms, quantity-as-string). Those strings are parsed into the closed
//! enums below exactly once, at the DTO boundary in `folio-form`. Inside the
//! core there is one canonical representation and no duck typing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 1600 bps = 16% (the fixed document
/// rate, [`crate::TAX_RATE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Document currency. Closed set: the panel only bills in these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// United States dollar.
    Usd,
    /// Venezuelan bolívar.
    Ves,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ves => "VES",
        }
    }

    /// Display symbol prefixed to formatted amounts.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Ves => "Bs. ",
        }
    }

    /// Thousands separator for locale grouping.
    pub const fn group_separator(&self) -> char {
        match self {
            Currency::Usd => ',',
            Currency::Ves => '.',
        }
    }

    /// Decimal separator.
    pub const fn decimal_separator(&self) -> char {
        match self {
            Currency::Usd => '.',
            Currency::Ves => ',',
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            // "BS" survives in older records from before the redenomination
            "VES" | "BS" => Ok(Currency::Ves),
            other => Err(CoreError::UnknownCurrency(other.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Payment Terms
// =============================================================================

/// Payment condition for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Immediate payment.
    Cash,
    /// Deferred payment; requires a positive number of credit days.
    Credit,
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms::Cash
    }
}

impl FromStr for PaymentTerms {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" | "contado" => Ok(PaymentTerms::Cash),
            "credit" | "credito" | "crédito" => Ok(PaymentTerms::Credit),
            other => Err(CoreError::UnknownPaymentTerms(other.to_string())),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// What kind of catalog entry a line item came from.
///
/// Only products carry stock; services are never stock-constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Product,
    Service,
}

impl FromStr for CatalogKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" | "producto" => Ok(CatalogKind::Product),
            "service" | "servicio" => Ok(CatalogKind::Service),
            other => Err(CoreError::UnknownCatalogKind(other.to_string())),
        }
    }
}

/// A product or service record from which line items are initialized.
///
/// Read-only to the engine: the catalog is fetched once per form session and
/// never written back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique identifier (backend-assigned).
    pub id: String,

    /// Product or service.
    pub kind: CatalogKind,

    /// Short business code shown in the items table.
    pub code: Option<String>,

    /// Display description.
    pub description: Option<String>,

    /// List price in cents; becomes the line's initial unit price.
    pub unit_price: Money,

    /// Units on hand. Only meaningful when `kind == Product`; `None` means
    /// stock is not tracked for this entry.
    pub available_stock: Option<i64>,

    /// Whether lines created from this entry start tax-exempt.
    pub tax_exempt: bool,
}

/// A client directory record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Fiscal identifier (RIF / tax ID), display only.
    pub tax_id: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of a document: a quantity of a product or service at a price.
///
/// ## Invariant
/// At rest between mutations, `line_subtotal == unit_price × quantity`,
/// `quantity ≥ 1` and `unit_price ≥ 0`. The mutator in [`crate::item`]
/// maintains this; the totals calculator still never trusts the stored
/// derived field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog entry this line came from; `None` for free-text lines.
    pub product_ref: Option<String>,

    /// Business code copied from the catalog entry at selection time.
    pub code: Option<String>,

    /// Display description.
    pub description: Option<String>,

    /// Units billed. Positive integer; the coercion layer floors input at 1.
    pub quantity: i64,

    /// Price per unit. Non-negative; invalid input coerces to zero.
    pub unit_price: Money,

    /// Exempt lines are excluded from the tax base entirely.
    pub tax_exempt: bool,

    /// Derived: `unit_price × quantity`. Recomputed on every mutation.
    pub line_subtotal: Money,
}

impl LineItem {
    /// Creates a fresh line from a catalog entry.
    ///
    /// Quantity always starts at 1 and the price is copied from the catalog,
    /// which is why re-selecting products resets any prior edits (see the
    /// selection-replace behavior on the form aggregate).
    pub fn from_catalog(entry: &CatalogEntry) -> Self {
        LineItem {
            product_ref: Some(entry.id.clone()),
            code: entry.code.clone(),
            description: entry.description.clone(),
            quantity: 1,
            unit_price: entry.unit_price,
            tax_exempt: entry.tax_exempt,
            line_subtotal: entry.unit_price,
        }
    }

    /// Creates an empty free-text line (no catalog reference).
    pub fn blank() -> Self {
        LineItem {
            product_ref: None,
            code: None,
            description: None,
            quantity: 1,
            unit_price: Money::zero(),
            tax_exempt: false,
            line_subtotal: Money::zero(),
        }
    }

    /// Recomputes the derived subtotal from quantity and unit price.
    pub fn recompute_subtotal(&mut self) {
        self.line_subtotal = self.unit_price.times(self.quantity);
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals of a document. Never set directly by callers; always the
/// output of [`crate::totals::calculate_totals`].
///
/// ## Invariant
/// `total == subtotal + tax_amount`, and exempt lines are excluded from
/// `tax_amount` entirely (not partially).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub total: Money,
}

impl DocumentTotals {
    /// All-zero totals (empty document).
    pub const fn zero() -> Self {
        DocumentTotals {
            subtotal: Money::zero(),
            tax_amount: Money::zero(),
            total: Money::zero(),
        }
    }
}

impl Default for DocumentTotals {
    fn default() -> Self {
        DocumentTotals::zero()
    }
}

// =============================================================================
// Document
// =============================================================================

/// Which document type the form is editing. Totals math is identical for
/// both; the kind only changes how the backend files the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Quote,
}

impl FromStr for DocumentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoice" | "factura" => Ok(DocumentKind::Invoice),
            "quote" | "cotizacion" | "cotización" | "presupuesto" => Ok(DocumentKind::Quote),
            other => Err(CoreError::UnknownDocumentKind(other.to_string())),
        }
    }
}

/// The document aggregate owned by the form orchestrator.
///
/// `totals` is always derived from `items`; every item mutation triggers a
/// full recomputation over the whole list. With tens of items at most there
/// is no incremental-update path, on purpose.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub kind: DocumentKind,

    /// Backend identifier; `None` until first saved.
    pub id: Option<String>,

    /// Selected client, by directory id.
    pub client_ref: Option<String>,

    /// Client display name captured at selection time.
    pub client_name: Option<String>,

    pub currency: Currency,

    pub payment_terms: PaymentTerms,

    /// Only meaningful on credit terms; forced to 0 otherwise.
    pub credit_days: i64,

    /// Ordered line items. Order is display-relevant but does not affect
    /// totals.
    pub items: Vec<LineItem>,

    /// Derived totals; see [`crate::totals::calculate_totals`].
    pub totals: DocumentTotals,

    /// Set by the orchestrator (the core never reads the clock).
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates an empty document of the given kind.
    pub fn empty(kind: DocumentKind) -> Self {
        Document {
            kind,
            id: None,
            client_ref: None,
            client_name: None,
            currency: Currency::default(),
            payment_terms: PaymentTerms::default(),
            credit_days: 0,
            items: Vec::new(),
            totals: DocumentTotals::zero(),
            created_at: None,
            updated_at: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_str() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("ves".parse::<Currency>().unwrap(), Currency::Ves);
        assert_eq!(" Bs ".parse::<Currency>().unwrap(), Currency::Ves);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn test_payment_terms_from_str_accepts_legacy_tokens() {
        assert_eq!("cash".parse::<PaymentTerms>().unwrap(), PaymentTerms::Cash);
        assert_eq!("contado".parse::<PaymentTerms>().unwrap(), PaymentTerms::Cash);
        assert_eq!("CREDITO".parse::<PaymentTerms>().unwrap(), PaymentTerms::Credit);
        assert!("installments".parse::<PaymentTerms>().is_err());
    }

    #[test]
    fn test_catalog_kind_from_str() {
        assert_eq!("product".parse::<CatalogKind>().unwrap(), CatalogKind::Product);
        assert_eq!("Servicio".parse::<CatalogKind>().unwrap(), CatalogKind::Service);
        assert!("bundle".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_document_kind_from_str() {
        assert_eq!("factura".parse::<DocumentKind>().unwrap(), DocumentKind::Invoice);
        assert_eq!("quote".parse::<DocumentKind>().unwrap(), DocumentKind::Quote);
        assert!("receipt".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_line_item_from_catalog_starts_at_quantity_one() {
        let entry = CatalogEntry {
            id: "p1".into(),
            kind: CatalogKind::Product,
            code: Some("WID-1".into()),
            description: Some("Widget".into()),
            unit_price: Money::from_cents(2500),
            available_stock: Some(10),
            tax_exempt: false,
        };

        let item = LineItem::from_catalog(&entry);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price.cents(), 2500);
        assert_eq!(item.line_subtotal.cents(), 2500);
        assert_eq!(item.product_ref.as_deref(), Some("p1"));
        assert!(!item.tax_exempt);
    }

    #[test]
    fn test_recompute_subtotal() {
        let mut item = LineItem::blank();
        item.quantity = 4;
        item.unit_price = Money::from_cents(750);
        item.recompute_subtotal();
        assert_eq!(item.line_subtotal.cents(), 3000);
    }

    #[test]
    fn test_empty_document_defaults() {
        let doc = Document::empty(DocumentKind::Invoice);
        assert_eq!(doc.currency, Currency::Usd);
        assert_eq!(doc.payment_terms, PaymentTerms::Cash);
        assert_eq!(doc.credit_days, 0);
        assert!(doc.items.is_empty());
        assert_eq!(doc.totals, DocumentTotals::zero());
    }
}
