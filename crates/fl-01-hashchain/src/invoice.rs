//! Raw invoice input and its canonical form.
//!
//! Legacy field aliases are resolved exactly once, at this boundary; internal
//! logic only ever sees canonical fields.

use crate::normalize;
use serde::{Deserialize, Serialize};

/// Document type assumed when the caller supplies none.
pub const DEFAULT_DOCUMENT_TYPE: &str = "INV";

/// Raw invoice fields as supplied by a caller.
///
/// Carries both the canonical field names and their deprecated aliases; the
/// alias is consulted only when the canonical field is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInvoice {
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub supplier_tax_id: String,
    #[serde(default)]
    pub supplier_country: String,
    #[serde(default)]
    pub buyer_tax_id: String,
    #[serde(default)]
    pub buyer_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: String,

    // Deprecated aliases, kept for callers on the old field names.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub invoice_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issuer_tax_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issuer_country: String,
}

/// Canonical field taking precedence over its deprecated alias.
fn prefer<'a>(canonical: &'a str, legacy: &'a str) -> &'a str {
    if canonical.is_empty() {
        legacy
    } else {
        canonical
    }
}

impl RawInvoice {
    /// Resolve aliases and normalize every field.
    pub fn canonicalize(&self) -> CanonicalInvoice {
        let document_type = if self.document_type.trim().is_empty() {
            DEFAULT_DOCUMENT_TYPE.to_string()
        } else {
            normalize::document_type(&self.document_type)
        };

        CanonicalInvoice {
            document_type,
            document_id: normalize::document_id(prefer(&self.document_id, &self.invoice_number)),
            supplier_tax_id: normalize::tax_id(prefer(&self.supplier_tax_id, &self.issuer_tax_id)),
            supplier_country: normalize::country(prefer(
                &self.supplier_country,
                &self.issuer_country,
            )),
            buyer_tax_id: normalize::tax_id(&self.buyer_tax_id),
            buyer_country: normalize::country(&self.buyer_country),
            amount: self.amount,
            currency: normalize::currency(&self.currency),
        }
    }
}

/// Invoice fields after alias resolution and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalInvoice {
    pub document_type: String,
    pub document_id: String,
    pub supplier_tax_id: String,
    pub supplier_country: String,
    pub buyer_tax_id: String,
    pub buyer_country: String,
    pub amount: Option<f64>,
    pub currency: String,
}

impl CanonicalInvoice {
    /// Both supplier identity fields are present.
    pub fn has_supplier(&self) -> bool {
        !self.supplier_tax_id.is_empty() && !self.supplier_country.is_empty()
    }

    /// Both buyer identity fields are present.
    pub fn has_buyer(&self) -> bool {
        !self.buyer_tax_id.is_empty() && !self.buyer_country.is_empty()
    }
}
