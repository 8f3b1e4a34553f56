//! # Wire DTOs and Normalization
//!
//! The legacy REST backend speaks a loose dialect: Spanish/English field
//! synonyms kept in sync by hand (`currency`/`moneda`, `taxAmount`/`tax`),
//! client and product fields that are sometimes a bare id string and
//! sometimes a populated object, quantities stored as strings in old
//! records. All of that is absorbed HERE, once, at the boundary:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Normalization Boundary                               │
//! │                                                                         │
//! │   wire JSON ──► DocumentDto ──► into_document() ──► Document (canonical)│
//! │                     │                                                   │
//! │                     │  • synonyms: serde aliases, one canonical field   │
//! │                     │  • id-or-object: untagged Ref enum, resolved once │
//! │                     │  • string enums: FromStr into closed enums        │
//! │                     │  • stored qty/price: same coercion as live edits  │
//! │                     │  • stored totals: IGNORED, recomputed             │
//! │                     │                                                   │
//! │   Document ──► DocumentDto::from_document() ──► wire JSON               │
//! │                     │                                                   │
//! │                     └─ outbound mirrors BOTH synonym fields so the      │
//! │                        unchanged backend keeps accepting the payload    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inside the core there is exactly one representation; no read site ever
//! checks "is this a string or an object".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use folio_core::item::{coerce_quantity, coerce_unit_price};
use folio_core::{
    calculate_totals, CatalogEntry, CatalogKind, Client, CoreError, Currency, Document,
    DocumentKind, LineItem, Money, PaymentTerms,
};

// =============================================================================
// Reference-or-Object Fields
// =============================================================================

/// A client field as it appears on the wire: either a bare directory id or
/// a populated object (the backend populates it on some list endpoints).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientRef {
    Populated(ClientDto),
    Id(String),
}

impl ClientRef {
    pub fn id(&self) -> &str {
        match self {
            ClientRef::Id(id) => id,
            ClientRef::Populated(client) => &client.id,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            ClientRef::Id(_) => None,
            ClientRef::Populated(client) => Some(&client.name),
        }
    }
}

/// A product field on a stored line item: bare catalog id or populated stub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Populated(ProductStub),
    Id(String),
}

impl ProductRef {
    pub fn id(&self) -> &str {
        match self {
            ProductRef::Id(id) => id,
            ProductRef::Populated(stub) => &stub.id,
        }
    }
}

/// The slice of a catalog entry the backend embeds in populated line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductStub {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "codigo", default)]
    pub code: Option<String>,
    #[serde(alias = "descripcion", default)]
    pub description: Option<String>,
}

// =============================================================================
// Directory / Catalog DTOs
// =============================================================================

/// A client directory record as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "rif", default)]
    pub tax_id: Option<String>,
}

impl ClientDto {
    pub fn into_client(self) -> Client {
        Client {
            id: self.id,
            name: self.name,
            tax_id: self.tax_id,
        }
    }
}

/// A catalog entry as served by the backend. Prices arrive as decimal
/// numbers; `kind` arrives as a string token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "tipo")]
    pub kind: String,
    #[serde(alias = "codigo", default)]
    pub code: Option<String>,
    #[serde(alias = "descripcion", default)]
    pub description: Option<String>,
    #[serde(alias = "precio", default)]
    pub unit_price: Option<f64>,
    #[serde(alias = "existencia", default)]
    pub available_stock: Option<i64>,
    #[serde(alias = "exento", default)]
    pub tax_exempt: bool,
}

impl CatalogEntryDto {
    /// Normalizes into the core catalog type. Unknown kind tokens are typed
    /// errors; a missing or negative price normalizes to zero (the entry is
    /// still selectable, the line just starts free).
    pub fn into_entry(self) -> Result<CatalogEntry, CoreError> {
        let kind: CatalogKind = self.kind.parse()?;
        let unit_price = self
            .unit_price
            .filter(|p| p.is_finite() && *p >= 0.0)
            .map(|p| Money::from_cents((p * 100.0).round() as i64))
            .unwrap_or_else(Money::zero);

        Ok(CatalogEntry {
            id: self.id,
            kind,
            code: self.code,
            description: self.description,
            unit_price,
            available_stock: self.available_stock,
            tax_exempt: self.tax_exempt,
        })
    }
}

// =============================================================================
// Line Item DTO
// =============================================================================

/// A line item on the wire. Quantity and price are `Value` because old
/// records store them as strings; hydration runs them through the same
/// coercion rules as live edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    #[serde(alias = "producto", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
    #[serde(alias = "codigo", default)]
    pub code: Option<String>,
    #[serde(alias = "descripcion", default)]
    pub description: Option<String>,
    #[serde(alias = "cantidad", default)]
    pub quantity: Option<Value>,
    #[serde(alias = "precio", alias = "price", default)]
    pub unit_price: Option<Value>,
    #[serde(alias = "exento", default)]
    pub tax_exempt: bool,
    /// Derived on the wire too; ignored on inbound, recomputed on outbound.
    #[serde(default)]
    pub subtotal: Option<f64>,
}

impl LineItemDto {
    /// Normalizes a stored line through the live-edit coercion rules.
    pub fn into_line_item(self) -> LineItem {
        let quantity = coerce_quantity(&self.quantity.unwrap_or(Value::Null));
        let unit_price = coerce_unit_price(&self.unit_price.unwrap_or(Value::Null));

        let mut item = LineItem {
            product_ref: self.product.map(|p| p.id().to_string()),
            code: self.code,
            description: self.description,
            quantity,
            unit_price,
            tax_exempt: self.tax_exempt,
            line_subtotal: Money::zero(),
        };
        item.recompute_subtotal();
        item
    }

    fn from_line_item(item: &LineItem) -> Self {
        LineItemDto {
            product: item.product_ref.clone().map(ProductRef::Id),
            code: item.code.clone(),
            description: item.description.clone(),
            quantity: Some(Value::from(item.quantity)),
            unit_price: Some(Value::from(item.unit_price.as_decimal())),
            tax_exempt: item.tax_exempt,
            subtotal: Some(item.line_subtotal.as_decimal()),
        }
    }
}

// =============================================================================
// Document DTO
// =============================================================================

/// A document on the wire.
///
/// Outbound payloads populate both members of each legacy synonym pair
/// (`currency`+`moneda`, `taxAmount`+`tax`) because the unchanged backend
/// still reads the Spanish names in places. Inbound, either member wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(alias = "tipo", default)]
    pub kind: Option<String>,

    #[serde(alias = "cliente", default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,

    #[serde(default)]
    pub currency: Option<String>,
    /// Legacy mirror of `currency`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,

    #[serde(alias = "condicionPago", default)]
    pub payment_terms: Option<String>,

    #[serde(alias = "diasCredito", default)]
    pub credit_days: Option<i64>,

    #[serde(alias = "productos", default)]
    pub items: Vec<LineItemDto>,

    // Totals are advisory display values; the server recomputes on save and
    // hydration recomputes from the items.
    #[serde(default)]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    /// Legacy mirror of `taxAmount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,

    #[serde(alias = "creadoPor", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentDto {
    /// Normalizes a persisted record into the canonical document.
    ///
    /// Missing enum fields fall back to defaults (old drafts predate some
    /// columns); present-but-unknown tokens are typed errors. Stored totals
    /// are ignored and recomputed, and `credit_days` is forced to 0 off
    /// credit terms regardless of what the record says.
    pub fn into_document(self) -> Result<Document, CoreError> {
        let kind = match self.kind.as_deref() {
            Some(token) => token.parse()?,
            None => DocumentKind::Invoice,
        };
        let currency = match self.currency.or(self.moneda).as_deref() {
            Some(token) => token.parse()?,
            None => Currency::default(),
        };
        let payment_terms = match self.payment_terms.as_deref() {
            Some(token) => token.parse()?,
            None => PaymentTerms::default(),
        };
        let credit_days = match payment_terms {
            PaymentTerms::Credit => self.credit_days.unwrap_or(0).max(0),
            PaymentTerms::Cash => 0,
        };

        let (client_ref, client_name) = match self.client {
            Some(client) => (
                Some(client.id().to_string()),
                client.display_name().map(str::to_string),
            ),
            None => (None, None),
        };

        let items: Vec<LineItem> = self
            .items
            .into_iter()
            .map(LineItemDto::into_line_item)
            .collect();
        let totals = calculate_totals(&items);

        Ok(Document {
            kind,
            id: self.id,
            client_ref,
            client_name,
            currency,
            payment_terms,
            credit_days,
            items,
            totals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Builds the outbound payload, filling both members of each legacy
    /// synonym pair.
    pub fn from_document(doc: &Document, created_by: &str) -> Self {
        let kind_token = match doc.kind {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
        };
        let terms_token = match doc.payment_terms {
            PaymentTerms::Cash => "cash",
            PaymentTerms::Credit => "credit",
        };
        let currency_code = doc.currency.code().to_string();
        let tax = doc.totals.tax_amount.as_decimal();

        DocumentDto {
            id: doc.id.clone(),
            kind: Some(kind_token.to_string()),
            client: doc.client_ref.clone().map(ClientRef::Id),
            currency: Some(currency_code.clone()),
            moneda: Some(currency_code),
            payment_terms: Some(terms_token.to_string()),
            credit_days: Some(doc.credit_days),
            items: doc.items.iter().map(LineItemDto::from_line_item).collect(),
            subtotal: Some(doc.totals.subtotal.as_decimal()),
            tax_amount: Some(tax),
            tax: Some(tax),
            total: Some(doc.totals.total.as_decimal()),
            created_by: Some(created_by.to_string()),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// The backend's acknowledgement of a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_spanish_record_normalizes() {
        // A record the old panel wrote: Spanish synonyms, populated client,
        // quantity stored as a string.
        let raw = json!({
            "_id": "doc-9",
            "tipo": "factura",
            "cliente": { "_id": "c1", "nombre": "Acme C.A.", "rif": "J-12345678-9" },
            "moneda": "VES",
            "condicionPago": "credito",
            "diasCredito": 30,
            "productos": [
                { "producto": "p1", "cantidad": "2", "precio": "50", "exento": false },
                { "producto": { "_id": "p2", "codigo": "SRV-1" }, "cantidad": 1, "precio": 30.0, "exento": true }
            ],
            "tax": 999.0
        });

        let dto: DocumentDto = serde_json::from_value(raw).unwrap();
        let doc = dto.into_document().unwrap();

        assert_eq!(doc.id.as_deref(), Some("doc-9"));
        assert_eq!(doc.kind, DocumentKind::Invoice);
        assert_eq!(doc.currency, Currency::Ves);
        assert_eq!(doc.payment_terms, PaymentTerms::Credit);
        assert_eq!(doc.credit_days, 30);
        assert_eq!(doc.client_ref.as_deref(), Some("c1"));
        assert_eq!(doc.client_name.as_deref(), Some("Acme C.A."));
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[0].quantity, 2);
        assert_eq!(doc.items[0].unit_price.cents(), 5000);
        assert_eq!(doc.items[1].product_ref.as_deref(), Some("p2"));
        assert!(doc.items[1].tax_exempt);

        // Stored tax figure ignored: recomputed as 16% of 100.00
        assert_eq!(doc.totals.subtotal.cents(), 13_000);
        assert_eq!(doc.totals.tax_amount.cents(), 1600);
    }

    #[test]
    fn test_bare_id_client_normalizes_without_name() {
        let raw = json!({ "cliente": "c7", "items": [] });
        let doc: Document = serde_json::from_value::<DocumentDto>(raw)
            .unwrap()
            .into_document()
            .unwrap();
        assert_eq!(doc.client_ref.as_deref(), Some("c7"));
        assert_eq!(doc.client_name, None);
    }

    #[test]
    fn test_unknown_currency_is_a_typed_error() {
        let raw = json!({ "currency": "EUR" });
        let err = serde_json::from_value::<DocumentDto>(raw)
            .unwrap()
            .into_document()
            .unwrap_err();
        assert_eq!(err, CoreError::UnknownCurrency("EUR".into()));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let doc = serde_json::from_value::<DocumentDto>(json!({}))
            .unwrap()
            .into_document()
            .unwrap();
        assert_eq!(doc.kind, DocumentKind::Invoice);
        assert_eq!(doc.currency, Currency::Usd);
        assert_eq!(doc.payment_terms, PaymentTerms::Cash);
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_credit_days_forced_to_zero_on_cash_records() {
        let raw = json!({ "paymentTerms": "cash", "creditDays": 45 });
        let doc = serde_json::from_value::<DocumentDto>(raw)
            .unwrap()
            .into_document()
            .unwrap();
        assert_eq!(doc.credit_days, 0);
    }

    #[test]
    fn test_outbound_payload_mirrors_synonym_pairs() {
        let mut doc = Document::empty(DocumentKind::Invoice);
        doc.client_ref = Some("c1".into());
        doc.currency = Currency::Ves;
        let mut item = LineItem::blank();
        item.quantity = 2;
        item.unit_price = Money::from_cents(5000);
        item.recompute_subtotal();
        doc.items.push(item);
        doc.totals = calculate_totals(&doc.items);

        let dto = DocumentDto::from_document(&doc, "u1");
        let wire = serde_json::to_value(&dto).unwrap();

        assert_eq!(wire["currency"], "VES");
        assert_eq!(wire["moneda"], "VES");
        assert_eq!(wire["taxAmount"], wire["tax"]);
        assert_eq!(wire["subtotal"], 100.0);
        assert_eq!(wire["total"], 116.0);
        assert_eq!(wire["createdBy"], "u1");
        assert_eq!(wire["items"][0]["quantity"], 2);
        assert_eq!(wire["items"][0]["subtotal"], 100.0);
    }

    #[test]
    fn test_catalog_entry_normalization() {
        let raw = json!({
            "_id": "p1", "tipo": "producto", "codigo": "WID-1",
            "precio": 25.0, "existencia": 10, "exento": false
        });
        let entry = serde_json::from_value::<CatalogEntryDto>(raw)
            .unwrap()
            .into_entry()
            .unwrap();
        assert_eq!(entry.kind, CatalogKind::Product);
        assert_eq!(entry.unit_price.cents(), 2500);
        assert_eq!(entry.available_stock, Some(10));
    }

    #[test]
    fn test_catalog_entry_unknown_kind_errors() {
        let raw = json!({ "_id": "p1", "kind": "bundle" });
        let err = serde_json::from_value::<CatalogEntryDto>(raw)
            .unwrap()
            .into_entry()
            .unwrap_err();
        assert_eq!(err, CoreError::UnknownCatalogKind("bundle".into()));
    }

    #[test]
    fn test_catalog_entry_negative_price_normalizes_to_zero() {
        let raw = json!({ "_id": "p1", "kind": "service", "precio": -4.0 });
        let entry = serde_json::from_value::<CatalogEntryDto>(raw)
            .unwrap()
            .into_entry()
            .unwrap();
        assert!(entry.unit_price.is_zero());
    }
}
