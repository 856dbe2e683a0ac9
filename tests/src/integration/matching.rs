//! Check/register/unregister semantics across hashchain, registry and engine.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use fl_01_hashchain::{HashChain, RawInvoice};
    use fl_02_registry::{InMemoryDocumentStore, InMemoryPartyStore};
    use fl_03_match_engine::{EngineError, MatchEngine, RegisterOptions};
    use shared_types::{Fingerprint, FunderId};
    use std::sync::Arc;

    fn engine() -> MatchEngine {
        MatchEngine::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryPartyStore::new()),
            Arc::new(HashChain::new("integration-secret")),
        )
    }

    fn invoice(document_id: &str) -> RawInvoice {
        RawInvoice {
            document_id: document_id.into(),
            supplier_tax_id: "DE123456".into(),
            supplier_country: "DE".into(),
            buyer_tax_id: "FR654321".into(),
            buyer_country: "FR".into(),
            amount: Some(2500.0),
            currency: "EUR".into(),
            ..Default::default()
        }
    }

    fn fingerprints(engine_chain_key: &str, raw: &RawInvoice) -> Vec<Fingerprint> {
        HashChain::new(engine_chain_key)
            .document_fingerprints(&raw.canonicalize())
            .unwrap()
            .to_vec()
    }

    #[test]
    fn checker_with_more_detail_matches_the_shallower_registration() {
        let eng = engine();
        let now = Utc::now();
        let fps = fingerprints("integration-secret", &invoice("INV-1"));

        // Registrant supplied only [L1, L2]; checker holds [L1, L2, L3].
        eng.register_fingerprints(&fps[..2], &RegisterOptions::default(), None, now)
            .unwrap();
        let outcome = eng.check_fingerprints(&fps, now).unwrap();

        assert!(outcome.found);
        assert_eq!(outcome.matched_levels, vec!["L1", "L2"]);
    }

    #[test]
    fn sibling_invoices_share_l1_but_not_l2() {
        let eng = engine();
        let now = Utc::now();
        let first = fingerprints("integration-secret", &invoice("INV-1"));
        let second = fingerprints("integration-secret", &invoice("INV-2"));

        // Same parties and doc type, different document id.
        assert_eq!(first[0], second[0]);
        assert_ne!(first[1], second[1]);

        eng.register_fingerprints(&first, &RegisterOptions::default(), None, now)
            .unwrap();
        let outcome = eng.check_fingerprints(&second, now).unwrap();
        assert_eq!(outcome.matched_levels, vec!["L1"]);
    }

    #[test]
    fn registration_is_idempotent_across_calls() {
        let eng = engine();
        let now = Utc::now();
        let fps = fingerprints("integration-secret", &invoice("INV-1"));
        let first = eng
            .register_fingerprints(&fps, &RegisterOptions::default(), None, now)
            .unwrap();
        let again = eng
            .register_fingerprints(&fps, &RegisterOptions::default(), None, now + Duration::hours(1))
            .unwrap();
        assert_eq!(first.levels_registered, vec![1, 2, 3]);
        assert!(again.levels_registered.is_empty());

        // First registration's timestamps survive the replay.
        let outcome = eng.check_fingerprints(&fps, now + Duration::hours(2)).unwrap();
        assert_eq!(outcome.details["L1"].first_seen, outcome.details["L2"].first_seen);
    }

    #[test]
    fn expired_registrations_free_the_fingerprint() {
        let eng = engine();
        let now = Utc::now();
        let fps = fingerprints("integration-secret", &invoice("INV-1"));
        let options = RegisterOptions {
            expires_in_days: Some(30),
            ..Default::default()
        };
        eng.register_fingerprints(&fps, &options, None, now).unwrap();

        let later = now + Duration::days(31);
        assert!(!eng.check_fingerprints(&fps, later).unwrap().found);

        // The level can be claimed again after expiry of the lookup view.
        let whole = eng.check_fingerprints(&fps, now + Duration::days(29)).unwrap();
        assert!(whole.found);
    }

    #[test]
    fn unregister_window_is_measured_from_registration() {
        let eng = engine();
        let now = Utc::now();
        let owner = FunderId::generate();
        let fps = fingerprints("integration-secret", &invoice("INV-1"));
        let options = RegisterOptions {
            track_attribution: true,
            ..Default::default()
        };
        eng.register_fingerprints(&fps, &options, Some(owner), now).unwrap();

        assert!(eng
            .unregister(&fps[2], owner, now + Duration::hours(23))
            .is_ok());
        assert_eq!(
            eng.unregister(&fps[1], owner, now + Duration::hours(25)),
            Err(EngineError::UnregisterWindowExpired)
        );
    }

    #[test]
    fn unregistering_one_level_leaves_the_others() {
        let eng = engine();
        let now = Utc::now();
        let owner = FunderId::generate();
        let fps = fingerprints("integration-secret", &invoice("INV-1"));
        let options = RegisterOptions {
            track_attribution: true,
            ..Default::default()
        };
        eng.register_fingerprints(&fps, &options, Some(owner), now).unwrap();
        eng.unregister(&fps[2], owner, now).unwrap();

        let outcome = eng.check_fingerprints(&fps, now).unwrap();
        assert_eq!(outcome.matched_levels, vec!["L1", "L2"]);
    }
}
