//! Full gateway admission pipeline, front door to stores.

#[cfg(test)]
mod tests {
    use fl_01_hashchain::RawInvoice;
    use fl_04_quota::{PeriodLimits, SubscriptionTier, TierLimits};
    use fl_06_gateway::{
        FunderAccount, GatewayConfig, GatewayError, InMemoryFunderDirectory, RegisterRequest,
        RegistryService,
    };
    use shared_types::{FunderId, Limit, PartyRole, UsageKind};
    use std::sync::Arc;

    const SECRET: &str = "pipeline-secret";

    fn service(accounts: Vec<FunderAccount>) -> RegistryService {
        let directory = InMemoryFunderDirectory::new();
        for account in accounts {
            directory.insert(account);
        }
        RegistryService::in_memory(GatewayConfig::with_secret(SECRET), Arc::new(directory))
            .unwrap()
    }

    fn invoice() -> RawInvoice {
        RawInvoice {
            document_id: "INV-2024-077".into(),
            supplier_tax_id: "NL999888".into(),
            supplier_country: "NL".into(),
            buyer_tax_id: "BE111222".into(),
            buyer_country: "BE".into(),
            amount: Some(18_000.0),
            currency: "EUR".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn double_funding_attempt_is_visible_to_the_second_funder() {
        let first = FunderAccount::new(FunderId::generate(), "First Factor", "business");
        let second = FunderAccount::new(FunderId::generate(), "Second Factor", "business");
        let (first_id, second_id) = (first.id, second.id);
        let service = service(vec![first, second]);

        // First funder sees a clean registry and registers.
        let clean = service
            .check_invoice(first_id, &invoice(), false)
            .await
            .unwrap();
        assert!(!clean.found);
        service
            .register_invoice(first_id, &invoice(), &RegisterRequest::default())
            .await
            .unwrap();

        // Second funder, offered the same invoice, sees the collision.
        let collision = service
            .check_invoice(second_id, &invoice(), false)
            .await
            .unwrap();
        assert!(collision.found);
        assert_eq!(collision.matched_levels, vec!["L1", "L2", "L3"]);
    }

    #[tokio::test]
    async fn party_reputation_flows_between_tenants_anonymously() {
        let first = FunderAccount::new(FunderId::generate(), "First", "business");
        let second = FunderAccount::new(FunderId::generate(), "Second", "business");
        let (first_id, second_id) = (first.id, second.id);
        let service = service(vec![first, second]);

        service
            .party_register(first_id, "NL999888", "NL", PartyRole::Supplier, Some(true))
            .await
            .unwrap();

        let seen = service
            .party_check(second_id, "NL999888", "NL", PartyRole::Supplier, Some(true))
            .await
            .unwrap();
        assert!(seen.found);
        assert!(seen.registered_by_others);
        // The response never says who; only that somebody did.
        let json = serde_json::to_string(&seen).unwrap();
        assert!(!json.contains(&first_id.0.to_string()));
    }

    #[tokio::test]
    async fn throttle_applies_before_any_quota_accounting() {
        let account = FunderAccount::new(FunderId::generate(), "Throttled", "enterprise")
            .with_request_limits(Limit::Bounded(1), Limit::Unbounded);
        let id = account.id;
        let service = service(vec![account]);

        service.check_invoice(id, &invoice(), false).await.unwrap();
        let err = service.check_invoice(id, &invoice(), false).await.unwrap_err();
        assert!(matches!(err, GatewayError::RateLimitExceeded { .. }));

        // The throttled request never reached the quota counters.
        let usage = service.usage(id).await.unwrap();
        assert_eq!(usage.report.usage_for(UsageKind::Check).unwrap().daily.used, 1);
    }

    #[tokio::test]
    async fn quota_rejection_paints_the_full_picture() {
        let account = FunderAccount::new(FunderId::generate(), "Capped", "capped");
        let id = account.id;
        let service = service(vec![account]);
        service.register_tier(SubscriptionTier::new(
            "capped",
            "Capped",
            TierLimits {
                check: PeriodLimits::bounded(1, 50),
                register: PeriodLimits::UNBOUNDED,
                party_query: PeriodLimits::UNBOUNDED,
            },
            90,
            false,
        ));

        service.check_invoice(id, &invoice(), false).await.unwrap();
        let err = service.check_invoice(id, &invoice(), false).await.unwrap_err();
        let rejection = err.to_rejection();
        assert_eq!(rejection.error, "quota_exceeded");
        assert_eq!(rejection.quota_type, Some(UsageKind::Check));
        assert_eq!(rejection.limit, Some(1));
        assert!(rejection.resets_at.is_some());
    }

    #[tokio::test]
    async fn attribution_consent_gates_unregister_end_to_end() {
        let account = FunderAccount::new(FunderId::generate(), "Shy", "business");
        // Account default: no attribution.
        let id = account.id;
        let service = service(vec![account]);

        service
            .register_invoice(id, &invoice(), &RegisterRequest::default())
            .await
            .unwrap();
        let fps = fl_01_hashchain::HashChain::new(SECRET)
            .document_fingerprints(&invoice().canonicalize())
            .unwrap();

        // Without stored attribution even the registrant cannot roll back.
        assert_eq!(
            service.unregister(id, &fps.l1).await.unwrap_err(),
            GatewayError::Forbidden
        );

        // Re-register a second invoice with explicit consent; rollback works.
        let mut second = invoice();
        second.document_id = "INV-2024-078".into();
        let request = RegisterRequest {
            track_attribution: Some(true),
            ..Default::default()
        };
        service.register_invoice(id, &second, &request).await.unwrap();
        let second_fps = fl_01_hashchain::HashChain::new(SECRET)
            .document_fingerprints(&second.canonicalize())
            .unwrap();
        assert!(service
            .unregister(id, second_fps.l2.as_ref().unwrap())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn history_lookback_is_clamped_by_the_plan() {
        let account = FunderAccount::new(FunderId::generate(), "Curious", "free");
        let id = account.id;
        let service = service(vec![account]);

        service
            .party_check(id, "NL999888", "NL", PartyRole::Supplier, Some(true))
            .await
            .unwrap();
        // Free plan caps lookback at 90 days; requesting 10 years is fine,
        // the window just shrinks.
        let history = service
            .party_history(id, "NL999888", "NL", PartyRole::Supplier, Some(3_650))
            .await
            .unwrap();
        assert!(history.found);
        assert_eq!(history.check_count, 1);
    }
}
