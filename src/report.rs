// 📊 Client Report - Fold per-identity outcomes into one client aggregate
//
// Identities are independent: each one is built on the worker pool and
// returns an owned ProfileOutcome. The aggregate is assembled afterwards in
// input order, then the details are sorted once.

use crate::config::EngineConfig;
use crate::details::DetailSorter;
use crate::model::{ConsolidatedProfile, DetailRecord, DetailRow, ProfileRow, RiskScore};
use crate::profile::{ProfileBuilder, ProfileOutcome, ProviderWarning};
use crate::provider::{BreachSource, ProviderAResult, ProviderBResult};
use crate::roster::Client;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Both provider responses for one identity, already fetched
#[derive(Debug, Clone)]
pub struct IdentityResponses {
    pub email: String,
    pub leakcheck: ProviderAResult,
    pub hibp: ProviderBResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientReport {
    pub client: String,
    pub profiles: Vec<ConsolidatedProfile>,

    /// Sorted by breach date, most recent first
    pub details: Vec<DetailRecord>,

    pub warnings: Vec<ProviderWarning>,
}

impl ClientReport {
    pub fn new(client: &str) -> Self {
        ClientReport {
            client: client.to_string(),
            ..Self::default()
        }
    }

    /// Append one identity's outcome (details stay unsorted until `finish`)
    pub fn absorb(mut self, outcome: ProfileOutcome) -> Self {
        self.profiles.push(outcome.profile);
        self.details.extend(outcome.details);
        self.warnings.extend(outcome.warnings);
        self
    }

    pub fn finish(mut self) -> Self {
        self.details = DetailSorter::sort(self.details);
        self
    }

    pub fn rows(&self) -> Vec<ProfileRow> {
        self.profiles.iter().map(ConsolidatedProfile::to_row).collect()
    }

    pub fn detail_rows(&self) -> Vec<DetailRow> {
        self.details.iter().map(DetailRecord::to_row).collect()
    }

    pub fn high_risk_count(&self) -> usize {
        self.profiles
            .iter()
            .filter(|p| p.risk_score == RiskScore::High)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

// ============================================================================
// REPORT ENGINE
// ============================================================================

pub struct ReportEngine {
    builder: ProfileBuilder,
    pool: Option<rayon::ThreadPool>,
}

impl ReportEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let pool = if config.workers > 0 {
            match rayon::ThreadPoolBuilder::new().num_threads(config.workers).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(error = %e, "worker pool unavailable, using global pool");
                    None
                }
            }
        } else {
            None
        };

        ReportEngine {
            builder: ProfileBuilder::from_config(config),
            pool,
        }
    }

    /// Single-identity builder sharing this engine's config
    pub fn builder(&self) -> &ProfileBuilder {
        &self.builder
    }

    /// Build a report from responses that were already fetched
    pub fn build(&self, client: &str, identities: &[IdentityResponses], now: DateTime<Utc>) -> ClientReport {
        info!(client, identities = identities.len(), "building client report");

        let run = || -> Vec<ProfileOutcome> {
            identities
                .par_iter()
                .map(|id| self.builder.build(&id.email, &id.leakcheck, &id.hibp, now))
                .collect()
        };
        let outcomes = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let report = outcomes
            .into_iter()
            .fold(ClientReport::new(client), ClientReport::absorb)
            .finish();

        info!(
            client,
            profiles = report.profiles.len(),
            high_risk = report.high_risk_count(),
            details = report.details.len(),
            warnings = report.warnings.len(),
            "client report ready"
        );
        report
    }

    /// Acquire responses through `source`, then build the report
    pub fn run_client(&self, client: &Client, source: &dyn BreachSource, now: DateTime<Utc>) -> ClientReport {
        let acquire = || -> Vec<IdentityResponses> {
            client
                .emails
                .par_iter()
                .map(|email| {
                    info!(client = %client.name, email = %email, "checking identity");
                    IdentityResponses {
                        email: email.clone(),
                        leakcheck: source.leakcheck(email),
                        hibp: source.hibp(email),
                    }
                })
                .collect()
        };
        let identities = match &self.pool {
            Some(pool) => pool.install(acquire),
            None => acquire(),
        };

        self.build(&client.name, &identities, now)
    }
}

// ============================================================================
// TESTS
// ============================================================================
