// Leak Ledger - Core Library
// Breach-record reconciliation and risk scoring across two leak providers.
// Exposes all modules for use in the CLI, API server, and tests

pub mod error;
pub mod model;
pub mod config;
pub mod logging;
pub mod provider;       // Raw payloads -> tagged provider results
pub mod markup;         // Breach description rendering
pub mod categories;     // Category Normalizer
pub mod merger;         // Leak Event Merger
pub mod recency;        // Recency Tracker
pub mod scoring;        // Risk Scorer
pub mod profile;        // Profile Builder
pub mod details;        // Detail Sorter
pub mod report;         // Per-client fold
pub mod roster;
pub mod export;

// Re-export commonly used types
pub use error::{LeakError, Result};
pub use model::{
    ConsolidatedProfile, DetailRecord, DetailRow, LeakDate, LeakEvent,
    ProfileRow, ProviderTag, RecentLeak, RiskScore, NO_DATA,
};
pub use config::EngineConfig;
pub use provider::{
    BreachEntry, BreachSource, LeakCheckHit, LeakSource,
    ProviderAResult, ProviderBResult, SnapshotSource,
};
pub use markup::{DescriptionParser, HtmlDescription};
pub use categories::CategoryNormalizer;
pub use merger::LeakEventMerger;
pub use recency::RecencyTracker;
pub use scoring::RiskScorer;
pub use profile::{ProfileBuilder, ProfileOutcome, ProviderWarning, WarningKind};
pub use details::DetailSorter;
pub use report::{ClientReport, IdentityResponses, ReportEngine};
pub use roster::{load_roster, read_roster, Client};
pub use export::{report_stem, write_report, ExportedFiles};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
