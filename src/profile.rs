// 🧩 Profile Builder - One ConsolidatedProfile per identity
//
// Pure: takes two already-fetched provider results, returns an owned outcome.
// Provider failures never abort; they become warnings next to the profile.

use crate::categories::CategoryNormalizer;
use crate::config::EngineConfig;
use crate::error::{LeakError, Result};
use crate::markup::{DescriptionParser, HtmlDescription};
use crate::merger::LeakEventMerger;
use crate::model::{ConsolidatedProfile, DetailRecord, LeakEvent, ProviderTag};
use crate::provider::{BreachEntry, ProviderAResult, ProviderBResult};
use crate::recency::RecencyTracker;
use crate::scoring::RiskScorer;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// WARNINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Provider call failed or returned something unexpected
    Unavailable(String),

    /// Breach record rejected from the detail table
    MalformedDate(String),

    /// List element that could not be decoded at all
    RejectedEntry(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderWarning {
    pub identity: String,
    pub provider: ProviderTag,
    pub kind: WarningKind,
}

impl fmt::Display for ProviderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::Unavailable(reason) => {
                write!(f, "{} unavailable for {}: {}", self.provider, self.identity, reason)
            }
            WarningKind::MalformedDate(reason) | WarningKind::RejectedEntry(reason) => {
                write!(f, "{} record rejected for {}: {}", self.provider, self.identity, reason)
            }
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOutcome {
    pub profile: ConsolidatedProfile,

    /// Provider B breach details in provider order (unsorted)
    pub details: Vec<DetailRecord>,

    pub warnings: Vec<ProviderWarning>,
}

// ============================================================================
// PROFILE BUILDER
// ============================================================================

#[derive(Clone)]
pub struct ProfileBuilder {
    normalizer: CategoryNormalizer,
    scorer: RiskScorer,
    descriptions: Arc<dyn DescriptionParser>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        ProfileBuilder {
            normalizer: CategoryNormalizer::new(),
            scorer: RiskScorer::from_config(config),
            descriptions: Arc::new(HtmlDescription::new()),
        }
    }

    /// Build the profile for one identity, scoring against `now`
    pub fn build(
        &self,
        identity: &str,
        provider_a: &ProviderAResult,
        provider_b: &ProviderBResult,
        now: DateTime<Utc>,
    ) -> ProfileOutcome {
        let identity = identity.trim();
        let mut warnings = Vec::new();

        match provider_a {
            ProviderAResult::Failure(reason) => {
                warnings.push(self.warning(identity, ProviderTag::LeakCheck, WarningKind::Unavailable(reason.clone())));
            }
            ProviderAResult::Success(_) | ProviderAResult::NotFound => {}
        }
        match provider_b {
            ProviderBResult::Failure(reason) => {
                warnings.push(self.warning(identity, ProviderTag::Hibp, WarningKind::Unavailable(reason.clone())));
            }
            ProviderBResult::Breaches { rejected, .. } => {
                for reason in rejected {
                    warnings.push(self.warning(identity, ProviderTag::Hibp, WarningKind::RejectedEntry(reason.clone())));
                }
            }
            ProviderBResult::NoBreaches => {}
        }

        let a_events = provider_a.events();
        let a_fields = provider_a.fields();
        let b_entries = provider_b.entries();
        let b_events: Vec<LeakEvent> = b_entries.iter().map(BreachEntry::event).collect();

        // Summary
        let mut merger = LeakEventMerger::new();
        merger.extend(a_events.iter().cloned());
        merger.extend(b_events.iter().cloned());

        // Categories: A fields first, then every breach's data classes
        let labels = a_fields
            .iter()
            .chain(b_entries.iter().flat_map(|e| e.data_classes.iter()));
        let categories = self.normalizer.normalize(labels);

        let most_recent = RecencyTracker::track(&a_events, &b_events);
        let risk_score = self
            .scorer
            .score(most_recent.as_ref().map(|r| r.date), &categories, now);

        let mut details = Vec::with_capacity(b_entries.len());
        for entry in b_entries {
            match self.detail_record(entry) {
                Ok(record) => details.push(record),
                Err(e) => warnings.push(self.warning(
                    identity,
                    ProviderTag::Hibp,
                    WarningKind::MalformedDate(format!("{}: {}", entry.name, e)),
                )),
            }
        }

        debug!(
            identity,
            leaks = merger.events().len(),
            categories = categories.len(),
            risk = %risk_score,
            "profile built"
        );

        ProfileOutcome {
            profile: ConsolidatedProfile {
                identity: identity.to_string(),
                merged_leak_summary: merger.summary(),
                most_recent_leak: most_recent,
                categories,
                risk_score,
            },
            details,
            warnings,
        }
    }

    /// Convert a Provider B entry into a detail record; both dates must parse
    pub fn detail_record(&self, entry: &BreachEntry) -> Result<DetailRecord> {
        let breach_date = NaiveDate::parse_from_str(entry.breach_date.trim(), "%Y-%m-%d")
            .map_err(|_| LeakError::malformed_date(&entry.breach_date, "YYYY-MM-DD"))?;
        let added_date = NaiveDateTime::parse_from_str(entry.added_date.trim(), "%Y-%m-%dT%H:%M:%SZ")
            .map_err(|_| LeakError::malformed_date(&entry.added_date, "YYYY-MM-DDTHH:MM:SSZ"))?
            .date();
        let (description, references) = self.descriptions.parse(&entry.description);

        Ok(DetailRecord {
            name: entry.name.clone(),
            breach_date,
            added_date,
            description,
            references,
        })
    }

    fn warning(&self, identity: &str, provider: ProviderTag, kind: WarningKind) -> ProviderWarning {
        let warning = ProviderWarning {
            identity: identity.to_string(),
            provider,
            kind,
        };
        warn!("{}", warning);
        warning
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
