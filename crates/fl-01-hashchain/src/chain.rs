//! Keyed fingerprint chain derivation.

use crate::invoice::CanonicalInvoice;
use crate::normalize;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared_types::{DisclosureLevel, Fingerprint};

type HmacSha256 = Hmac<Sha256>;

/// Field delimiter in preimages; cannot occur in normalized output.
const DELIMITER: char = '|';

/// Document fingerprints at ascending disclosure levels.
///
/// L1 is always present when both parties are known; L2 and L3 exist only if
/// the extra fields they encode were supplied. L3 present implies L2 and L1
/// present (level monotonicity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFingerprints {
    pub l1: Fingerprint,
    pub l2: Option<Fingerprint>,
    pub l3: Option<Fingerprint>,
}

impl DocumentFingerprints {
    /// Fingerprints in ascending level order (L1, L2, L3) with gaps omitted.
    pub fn to_vec(&self) -> Vec<Fingerprint> {
        let mut out = Vec::with_capacity(3);
        out.push(self.l1.clone());
        if let Some(l2) = &self.l2 {
            out.push(l2.clone());
        }
        if let Some(l3) = &self.l3 {
            out.push(l3.clone());
        }
        out
    }

    /// Highest level present.
    pub fn deepest_level(&self) -> DisclosureLevel {
        if self.l3.is_some() {
            DisclosureLevel::Full
        } else if self.l2.is_some() {
            DisclosureLevel::Document
        } else {
            DisclosureLevel::DocType
        }
    }
}

/// Every fingerprint derivable from one invoice, including the party level.
#[derive(Debug, Clone, Default)]
pub struct NamedFingerprints {
    pub l0_supplier: Option<Fingerprint>,
    pub l0_buyer: Option<Fingerprint>,
    pub documents: Option<DocumentFingerprints>,
}

/// Derives keyed one-way fingerprints from canonical invoice fields.
///
/// Holds the registry operator's secret; the secret is never sent by or to
/// tenants and never appears in any output.
pub struct HashChain {
    key: Vec<u8>,
}

impl HashChain {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// HMAC-SHA256 over `data`, rendered as 64 lowercase hex characters.
    pub fn digest(&self, data: &str) -> Fingerprint {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(data.as_bytes());
        Fingerprint::from_digest(hex::encode(mac.finalize().into_bytes()))
    }

    /// L0 party fingerprint over normalized `tax_id|country`.
    pub fn party_fingerprint(&self, tax_id: &str, country: &str) -> Fingerprint {
        let preimage = format!(
            "{}{DELIMITER}{}",
            normalize::tax_id(tax_id),
            normalize::country(country)
        );
        self.digest(&preimage)
    }

    /// Document fingerprint chain for an invoice with both parties known.
    ///
    /// Returns `None` when either party identity is incomplete; L1 cannot be
    /// computed without both.
    pub fn document_fingerprints(&self, invoice: &CanonicalInvoice) -> Option<DocumentFingerprints> {
        if !invoice.has_supplier() || !invoice.has_buyer() {
            return None;
        }

        let l1_preimage = [
            invoice.document_type.as_str(),
            invoice.supplier_tax_id.as_str(),
            invoice.supplier_country.as_str(),
            invoice.buyer_tax_id.as_str(),
            invoice.buyer_country.as_str(),
        ]
        .join("|");
        let l1 = self.digest(&l1_preimage);

        let mut result = DocumentFingerprints {
            l1,
            l2: None,
            l3: None,
        };

        if invoice.document_id.is_empty() {
            return Some(result);
        }
        let l2_preimage = format!("{l1_preimage}{DELIMITER}{}", invoice.document_id);
        result.l2 = Some(self.digest(&l2_preimage));

        if let Some(amount) = invoice.amount {
            if !invoice.currency.is_empty() {
                let l3_preimage = format!(
                    "{l2_preimage}{DELIMITER}{}{DELIMITER}{}",
                    normalize::amount(amount),
                    invoice.currency
                );
                result.l3 = Some(self.digest(&l3_preimage));
            }
        }

        Some(result)
    }

    /// All derivable fingerprints, party levels included.
    pub fn all_fingerprints(&self, invoice: &CanonicalInvoice) -> NamedFingerprints {
        let mut named = NamedFingerprints::default();
        if invoice.has_supplier() {
            named.l0_supplier =
                Some(self.party_fingerprint(&invoice.supplier_tax_id, &invoice.supplier_country));
        }
        if invoice.has_buyer() {
            named.l0_buyer =
                Some(self.party_fingerprint(&invoice.buyer_tax_id, &invoice.buyer_country));
        }
        named.documents = self.document_fingerprints(invoice);
        named
    }
}
