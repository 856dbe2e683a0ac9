//! The registry service: admission pipeline plus operation dispatch.

use chrono::Utc;
use dashmap::DashMap;
use fl_01_hashchain::{HashChain, RawInvoice};
use fl_02_registry::{InMemoryDocumentStore, InMemoryPartyStore};
use fl_03_match_engine::{
    CheckOutcome, MatchEngine, PartyCheckOutcome, PartyHistoryOutcome, PartyRegisterOutcome,
    RegisterOptions, RegisterOutcome,
};
use fl_04_quota::{InMemoryUsageStore, MonthlyUsage, QuotaTracker, SubscriptionTier, UsageReport};
use fl_05_rate_limit::{InMemoryCounterStore, RateLimiter};
use serde::{Deserialize, Serialize};
use shared_types::{Fingerprint, FunderId, PartyRole, UsageKind};
use std::sync::Arc;
use tracing::warn;

use crate::adapters::log_sink::LogNotificationSink;
use crate::domain::account::FunderAccount;
use crate::domain::config::{ConfigError, GatewayConfig};
use crate::domain::error::GatewayError;
use crate::ports::{FunderDirectory, NotificationSink};

/// Months of history returned when the caller does not say how many.
const DEFAULT_HISTORY_MONTHS: usize = 12;

/// Register parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub document_type: String,
    /// ISO 8601 calendar date of the funding decision.
    #[serde(default)]
    pub funding_date: String,
    /// Per-call attribution consent; the account default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_attribution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<i64>,
}

/// Usage picture returned by the usage operation: per-operation quota state
/// plus the raw request throttle counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUsage {
    pub report: UsageReport,
    pub requests_today: u64,
    pub requests_this_month: u64,
}

/// Front door for every tenant-facing operation.
pub struct RegistryService {
    config: GatewayConfig,
    engine: Arc<MatchEngine>,
    quota: Arc<QuotaTracker>,
    limiter: Arc<RateLimiter>,
    funders: Arc<dyn FunderDirectory>,
    notifier: Arc<dyn NotificationSink>,
    /// Plans beyond the built-in table, keyed by name.
    custom_tiers: DashMap<String, SubscriptionTier>,
}

impl RegistryService {
    pub fn new(
        config: GatewayConfig,
        engine: Arc<MatchEngine>,
        quota: Arc<QuotaTracker>,
        limiter: Arc<RateLimiter>,
        funders: Arc<dyn FunderDirectory>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            engine,
            quota,
            limiter,
            funders,
            notifier,
            custom_tiers: DashMap::new(),
        })
    }

    /// Fully in-memory wiring: the engine, stores and a logging sink, built
    /// from the configuration alone.
    pub fn in_memory(
        config: GatewayConfig,
        funders: Arc<dyn FunderDirectory>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let chain = Arc::new(HashChain::new(config.hash_secret.clone()));
        let engine = MatchEngine::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryPartyStore::new()),
            chain,
        )
        .with_unregister_window(chrono::Duration::hours(config.unregister_window_hours));
        Self::new(
            config,
            Arc::new(engine),
            Arc::new(QuotaTracker::new(Arc::new(InMemoryUsageStore::new()))),
            Arc::new(RateLimiter::new(Arc::new(InMemoryCounterStore::new()))),
            funders,
            Arc::new(LogNotificationSink),
        )
    }

    /// Register a plan outside the built-in table. Overrides a built-in of
    /// the same name.
    pub fn register_tier(&self, tier: SubscriptionTier) {
        self.custom_tiers.insert(tier.name.clone(), tier);
    }

    /// Check client-side fingerprints against the registry.
    pub async fn check_fingerprints(
        &self,
        funder: FunderId,
        fingerprints: &[Fingerprint],
    ) -> Result<CheckOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.admit(&account, UsageKind::Check, now)?;
        let outcome = self.engine.check_fingerprints(fingerprints, now)?;
        self.dispatch_warning(account.id, tier);
        Ok(outcome)
    }

    /// Check raw invoice fields; fingerprints are derived server-side.
    pub async fn check_invoice(
        &self,
        funder: FunderId,
        raw: &RawInvoice,
        include_party: bool,
    ) -> Result<CheckOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.admit(&account, UsageKind::Check, now)?;
        let outcome = self.engine.check_raw(raw, include_party, now)?;
        self.dispatch_warning(account.id, tier);
        Ok(outcome)
    }

    /// Register client-side fingerprints as funded.
    pub async fn register_fingerprints(
        &self,
        funder: FunderId,
        fingerprints: &[Fingerprint],
        request: &RegisterRequest,
    ) -> Result<RegisterOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.admit(&account, UsageKind::Register, now)?;
        let options = self.register_options(&account, request);
        let outcome = self
            .engine
            .register_fingerprints(fingerprints, &options, Some(account.id), now)?;
        self.dispatch_warning(account.id, tier);
        Ok(outcome)
    }

    /// Register a raw invoice as funded.
    pub async fn register_invoice(
        &self,
        funder: FunderId,
        raw: &RawInvoice,
        request: &RegisterRequest,
    ) -> Result<RegisterOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.admit(&account, UsageKind::Register, now)?;
        let options = self.register_options(&account, request);
        let outcome = self
            .engine
            .register_raw(raw, &options, Some(account.id), now)?;
        self.dispatch_warning(account.id, tier);
        Ok(outcome)
    }

    /// Roll back one of the caller's own registrations. Throttled but not
    /// quota-metered.
    pub async fn unregister(
        &self,
        funder: FunderId,
        fingerprint: &Fingerprint,
    ) -> Result<(), GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        self.throttle(&account, now)?;
        self.engine.unregister(fingerprint, account.id, now)?;
        Ok(())
    }

    pub async fn party_check(
        &self,
        funder: FunderId,
        tax_id: &str,
        country: &str,
        role: PartyRole,
        track_attribution: Option<bool>,
    ) -> Result<PartyCheckOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.admit(&account, UsageKind::PartyCheck, now)?;
        let track = track_attribution.unwrap_or(account.track_attribution);
        let outcome = self
            .engine
            .party_check(tax_id, country, role, account.id, track, now)?;
        self.dispatch_warning(account.id, tier);
        Ok(outcome)
    }

    pub async fn party_register(
        &self,
        funder: FunderId,
        tax_id: &str,
        country: &str,
        role: PartyRole,
        track_attribution: Option<bool>,
    ) -> Result<PartyRegisterOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.admit(&account, UsageKind::PartyRegister, now)?;
        let track = track_attribution.unwrap_or(account.track_attribution);
        let outcome = self
            .engine
            .party_register(tax_id, country, role, account.id, track, now)?;
        self.dispatch_warning(account.id, tier);
        Ok(outcome)
    }

    /// Read party history. Lookback is clamped to the plan's ceiling.
    /// Throttled but not quota-metered.
    pub async fn party_history(
        &self,
        funder: FunderId,
        tax_id: &str,
        country: &str,
        role: PartyRole,
        lookback_days: Option<u32>,
    ) -> Result<PartyHistoryOutcome, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        self.throttle(&account, now)?;
        let tier = self.tier_for(&account);
        let outcome = self.engine.party_history(
            tax_id,
            country,
            role,
            lookback_days,
            tier.party_lookback_days,
            account.id,
            now,
        )?;
        Ok(outcome)
    }

    /// Quota and throttle state for the caller. Not metered.
    pub async fn usage(&self, funder: FunderId) -> Result<TenantUsage, GatewayError> {
        let account = self.resolve(funder)?;
        let now = Utc::now();
        let tier = self.tier_for(&account);
        let report = self.quota.report(account.id, &tier, now)?;
        let (requests_today, requests_this_month) = self.limiter.usage(account.id, now)?;
        Ok(TenantUsage {
            report,
            requests_today,
            requests_this_month,
        })
    }

    /// Aggregated per-month usage, newest month first. Counters are retained
    /// across period rollovers, so this reaches back as far as the tenant has
    /// been active (capped at `months`, default 12). Not metered.
    pub async fn usage_history(
        &self,
        funder: FunderId,
        months: Option<usize>,
    ) -> Result<Vec<MonthlyUsage>, GatewayError> {
        let account = self.resolve(funder)?;
        let history = self
            .quota
            .history(account.id, months.unwrap_or(DEFAULT_HISTORY_MONTHS))?;
        Ok(history)
    }

    fn resolve(&self, funder: FunderId) -> Result<FunderAccount, GatewayError> {
        match self.funders.find(funder)? {
            Some(account) if account.active => Ok(account),
            _ => Err(GatewayError::InvalidCredentials),
        }
    }

    fn tier_for(&self, account: &FunderAccount) -> SubscriptionTier {
        if let Some(tier) = self.custom_tiers.get(&account.tier_name) {
            return tier.clone();
        }
        SubscriptionTier::by_name(&account.tier_name)
            .or_else(|| SubscriptionTier::by_name(&self.config.default_tier))
            .unwrap_or_else(SubscriptionTier::free)
    }

    fn throttle(
        &self,
        account: &FunderAccount,
        now: chrono::DateTime<Utc>,
    ) -> Result<(), GatewayError> {
        let decision = self.limiter.check_and_increment(
            account.id,
            account.daily_request_limit,
            account.monthly_request_limit,
            now,
        )?;
        if decision.is_denied() {
            return Err(GatewayError::RateLimitExceeded {
                retry_after_secs: decision.retry_after_secs.unwrap_or(0),
            });
        }
        Ok(())
    }

    /// Throttle, then test and record quota for one operation.
    ///
    /// A quota breach records the attempted usage before rejecting, so the
    /// counters count demand, not just admitted calls.
    fn admit(
        &self,
        account: &FunderAccount,
        kind: UsageKind,
        now: chrono::DateTime<Utc>,
    ) -> Result<SubscriptionTier, GatewayError> {
        self.throttle(account, now)?;
        let tier = self.tier_for(account);
        if let Err(err) = self.quota.check(account.id, &tier, kind, now) {
            self.quota.record(account.id, kind, now)?;
            return Err(err.into());
        }
        self.quota.record(account.id, kind, now)?;
        Ok(tier)
    }

    /// Fire-and-forget threshold warning dispatch. Never blocks or fails
    /// the operation that triggered it.
    fn dispatch_warning(&self, funder: FunderId, tier: SubscriptionTier) {
        if !self.config.warnings_enabled || !tier.notifications_enabled {
            return;
        }
        let quota = Arc::clone(&self.quota);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let pending = match quota.pending_warning(funder, &tier, Utc::now()) {
                Ok(pending) => pending,
                Err(err) => {
                    warn!(error = %err, "usage warning evaluation failed");
                    return;
                }
            };
            if let Some(warning) = pending {
                if let Err(err) = notifier.send_usage_warning(funder, warning).await {
                    warn!(error = %err, "usage warning delivery failed");
                }
            }
        });
    }

    fn register_options(
        &self,
        account: &FunderAccount,
        request: &RegisterRequest,
    ) -> RegisterOptions {
        let document_type = if request.document_type.trim().is_empty() {
            self.config.default_document_type.clone()
        } else {
            request.document_type.clone()
        };
        RegisterOptions {
            document_type,
            funding_date: request.funding_date.clone(),
            track_attribution: request.track_attribution.unwrap_or(account.track_attribution),
            expires_in_days: request.expires_in_days,
        }
    }
}
