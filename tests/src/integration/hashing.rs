//! Fingerprint determinism across crate boundaries.
//!
//! Pinned HMAC-SHA256 vectors guard the exact preimage layout: any change to
//! normalization, field order or the delimiter breaks these, and with them
//! every fingerprint already stored by a deployment.

#[cfg(test)]
mod tests {
    use fl_01_hashchain::{HashChain, RawInvoice};

    const VECTOR_KEY: &str = "vector-key";

    fn invoice() -> RawInvoice {
        RawInvoice {
            document_id: "INV-2024-001".into(),
            supplier_tax_id: "DE123456".into(),
            supplier_country: "DE".into(),
            buyer_tax_id: "FR654321".into(),
            buyer_country: "FR".into(),
            amount: Some(2500.0),
            currency: "EUR".into(),
            ..Default::default()
        }
    }

    #[test]
    fn pinned_party_vector() {
        let chain = HashChain::new(VECTOR_KEY);
        // HMAC-SHA256("vector-key", "DE123456|DE")
        let fp = chain.party_fingerprint("DE123456", "DE");
        assert_eq!(
            fp.as_str(),
            "cfb12200c44fe39b08c71e6fd5ecc07a92df0ef8b6bbb79d38f9b61ac01236ca"
        );
        // A full SHA-256 digest, not a truncation.
        assert_eq!(hex::decode(fp.as_str()).unwrap().len(), 32);
    }

    #[test]
    fn pinned_document_vectors() {
        let chain = HashChain::new(VECTOR_KEY);
        let fps = chain.document_fingerprints(&invoice().canonicalize()).unwrap();
        // Preimage "INV|DE123456|DE|FR654321|FR" and its L2/L3 extensions.
        assert_eq!(
            fps.l1.as_str(),
            "433410227741a192b3eca926840cbef90aab484d5c99edac24d19bf3f54e638c"
        );
        assert_eq!(
            fps.l2.as_ref().unwrap().as_str(),
            "78c238dc0992e04482e9444d0a925e82d582202cba60bda125e7943fde9f5376"
        );
        assert_eq!(
            fps.l3.as_ref().unwrap().as_str(),
            "40ef5d83c030e59a1162bb9f8b5904024f9f3331672fec7fe3acf40baba34f3b"
        );
    }

    #[test]
    fn normalization_variants_collapse_to_one_fingerprint() {
        let chain = HashChain::new(VECTOR_KEY);
        let messy = RawInvoice {
            document_id: "  inv-2024-001 ".into(),
            supplier_tax_id: " de-123 456 ".into(),
            supplier_country: "de".into(),
            buyer_tax_id: "fr 654-321".into(),
            buyer_country: " fr ".into(),
            amount: Some(2500.0),
            currency: " eur ".into(),
            ..Default::default()
        };
        let clean = chain.document_fingerprints(&invoice().canonicalize()).unwrap();
        let dirty = chain.document_fingerprints(&messy.canonicalize()).unwrap();
        assert_eq!(clean, dirty);
    }

    #[test]
    fn legacy_aliases_hash_identically() {
        let chain = HashChain::new(VECTOR_KEY);
        let legacy = RawInvoice {
            invoice_number: "INV-2024-001".into(),
            issuer_tax_id: "DE123456".into(),
            issuer_country: "DE".into(),
            buyer_tax_id: "FR654321".into(),
            buyer_country: "FR".into(),
            amount: Some(2500.0),
            currency: "EUR".into(),
            ..Default::default()
        };
        assert_eq!(
            chain.document_fingerprints(&invoice().canonicalize()),
            chain.document_fingerprints(&legacy.canonicalize()),
        );
    }

    #[test]
    fn a_different_key_moves_every_fingerprint() {
        let a = HashChain::new("operator-a");
        let b = HashChain::new("operator-b");
        let canonical = invoice().canonicalize();
        let fps_a = a.document_fingerprints(&canonical).unwrap();
        let fps_b = b.document_fingerprints(&canonical).unwrap();
        assert_ne!(fps_a.l1, fps_b.l1);
        assert_ne!(fps_a.l2, fps_b.l2);
        assert_ne!(fps_a.l3, fps_b.l3);
    }

    #[test]
    fn amounts_are_hashed_at_two_decimals() {
        let chain = HashChain::new(VECTOR_KEY);
        let mut variant = invoice();
        variant.amount = Some(2500.004);
        // Rounds to the same "2500.00" preimage component.
        assert_eq!(
            chain.document_fingerprints(&invoice().canonicalize()).unwrap().l3,
            chain.document_fingerprints(&variant.canonicalize()).unwrap().l3,
        );
    }
}
