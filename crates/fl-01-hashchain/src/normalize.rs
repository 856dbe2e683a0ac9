//! Canonicalization of raw identity and document fields.
//!
//! Pure functions, no I/O. The rules are deliberately lossy-but-canonical:
//! two inputs a human would consider "the same identifier" must normalize to
//! identical strings, because fingerprints are computed over the normalized
//! form only.

/// Tax id: strip every non-alphanumeric character, uppercase.
///
/// `" de-123 456 "` and `"DE123456"` both become `"DE123456"`.
pub fn tax_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Invoice/document id: trim surrounding whitespace, uppercase.
pub fn document_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Country code (ISO 3166-1 alpha-2): trim, uppercase.
pub fn country(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Currency code (ISO 4217): trim, uppercase.
pub fn currency(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Document type code: trim, uppercase.
pub fn document_type(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Monetary amount: exactly two decimal digits, no grouping separators,
/// locale-independent.
pub fn amount(value: f64) -> String {
    format!("{value:.2}")
}
