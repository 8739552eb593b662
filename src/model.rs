// 📦 Data Model - Leak events, dates, profiles and detail records
//
// Two providers report the same breaches at different date granularities:
//   Provider A (LeakCheck-style): name + "YYYY-MM"
//   Provider B (HIBP-style):      name + "YYYY-MM-DD" + full breach model

use crate::error::{LeakError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Rendered wherever a value is missing (summary, label, categories)
pub const NO_DATA: &str = "No Data";

// ============================================================================
// PROVIDER TAG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderTag {
    /// Month-granular name list (LeakCheck)
    LeakCheck,

    /// Day-granular full breach models (HaveIBeenPwned)
    Hibp,
}

impl ProviderTag {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            ProviderTag::LeakCheck => "LeakCheck",
            ProviderTag::Hibp => "HaveIBeenPwned",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// LEAK DATE
// ============================================================================

/// Parsed form of a provider date string.
///
/// Ordering compares the calendar month first. Inside the same month a
/// `Day` ranks above a `Month` (the more precise report wins the tie), and
/// two days compare normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeakDate {
    Month { year: i32, month: u32 },
    Day(NaiveDate),
}

impl LeakDate {
    /// Parse a month-granular date ("YYYY-MM")
    pub fn parse_month(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        // chrono cannot parse a date without a day, so anchor on the 1st
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .ok()
            .filter(|_| trimmed.len() == 7)
            .map(|d| LeakDate::Month {
                year: d.year(),
                month: d.month(),
            })
            .ok_or_else(|| LeakError::malformed_date(raw, "YYYY-MM"))
    }

    /// Parse a day-granular date ("YYYY-MM-DD")
    pub fn parse_day(raw: &str) -> Result<Self> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(LeakDate::Day)
            .map_err(|_| LeakError::malformed_date(raw, "YYYY-MM-DD"))
    }

    /// Calendar date used for windowed comparisons (month dates anchor on the 1st)
    pub fn calendar_date(&self) -> NaiveDate {
        match self {
            LeakDate::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .unwrap_or(NaiveDate::MIN),
            LeakDate::Day(date) => *date,
        }
    }

    fn month_key(&self) -> (i32, u32) {
        match self {
            LeakDate::Month { year, month } => (*year, *month),
            LeakDate::Day(date) => (date.year(), date.month()),
        }
    }
}

impl Ord for LeakDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.month_key()
            .cmp(&other.month_key())
            .then_with(|| match (self, other) {
                (LeakDate::Day(a), LeakDate::Day(b)) => a.cmp(b),
                (LeakDate::Day(_), LeakDate::Month { .. }) => Ordering::Greater,
                (LeakDate::Month { .. }, LeakDate::Day(_)) => Ordering::Less,
                (LeakDate::Month { .. }, LeakDate::Month { .. }) => Ordering::Equal,
            })
    }
}

impl PartialOrd for LeakDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LeakDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeakDate::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            LeakDate::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

// ============================================================================
// LEAK EVENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakEvent {
    pub name: String,

    /// Date exactly as the provider presented it (None = undated)
    pub date: Option<String>,

    pub source: ProviderTag,
}

impl LeakEvent {
    pub fn new(name: &str, date: Option<&str>, source: ProviderTag) -> Self {
        LeakEvent {
            name: name.to_string(),
            date: date.map(|d| d.to_string()),
            source,
        }
    }

    /// Dedup identity: case-folded name + trimmed presented date
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.name.trim().to_lowercase(),
            self.date
                .as_deref()
                .map(|d| d.trim().to_lowercase())
                .unwrap_or_default(),
        )
    }

    /// Parse the presented date at this provider's granularity
    pub fn parsed_date(&self) -> Option<Result<LeakDate>> {
        let raw = self.date.as_deref().filter(|d| !d.trim().is_empty())?;
        Some(match self.source {
            ProviderTag::LeakCheck => LeakDate::parse_month(raw),
            ProviderTag::Hibp => LeakDate::parse_day(raw),
        })
    }

    /// Summary form: "Name (date)"
    pub fn render(&self) -> String {
        format!("{} ({})", self.name, self.date.as_deref().unwrap_or(""))
    }
}

// ============================================================================
// RISK SCORE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskScore {
    High,
    Low,
}

impl RiskScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskScore::High => "High",
            RiskScore::Low => "Low",
        }
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MOST RECENT LEAK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLeak {
    pub name: String,
    pub date: LeakDate,
    pub source: ProviderTag,
}

impl RecentLeak {
    /// Label form: "Name: date"
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.date)
    }
}

// ============================================================================
// CONSOLIDATED PROFILE
// ============================================================================

/// Per-identity merged view. Built once by `ProfileBuilder`, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedProfile {
    pub identity: String,

    /// "Name (date)" entries, unique under `LeakEvent::dedup_key`
    pub merged_leak_summary: Vec<String>,

    pub most_recent_leak: Option<RecentLeak>,

    /// Normalized labels, sorted case-insensitively
    pub categories: Vec<String>,

    pub risk_score: RiskScore,
}

impl ConsolidatedProfile {
    pub fn summary_text(&self) -> String {
        if self.merged_leak_summary.is_empty() {
            NO_DATA.to_string()
        } else {
            self.merged_leak_summary.join("; ")
        }
    }

    pub fn most_recent_leak_label(&self) -> String {
        self.most_recent_leak
            .as_ref()
            .map(RecentLeak::label)
            .unwrap_or_else(|| NO_DATA.to_string())
    }

    pub fn most_recent_leak_date(&self) -> Option<LeakDate> {
        self.most_recent_leak.as_ref().map(|r| r.date)
    }

    pub fn categories_csv(&self) -> String {
        if self.categories.is_empty() {
            NO_DATA.to_string()
        } else {
            self.categories.join(", ")
        }
    }

    /// Flatten for tabular emission
    pub fn to_row(&self) -> ProfileRow {
        ProfileRow {
            email: self.identity.clone(),
            leak_summary: self.summary_text(),
            most_recent_leak: self.most_recent_leak_label(),
            categories: self.categories_csv(),
            risk_score: self.risk_score.as_str().to_string(),
        }
    }
}

/// One line of the "Leaked Data" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(rename = "email")]
    pub email: String,

    #[serde(rename = "Data Leak Name")]
    pub leak_summary: String,

    #[serde(rename = "Most Recent Leak Date")]
    pub most_recent_leak: String,

    #[serde(rename = "Data Historically Leaked")]
    pub categories: String,

    #[serde(rename = "Risk Score")]
    pub risk_score: String,
}

// ============================================================================
// DETAIL RECORD
// ============================================================================

/// Full breach entry from Provider B, kept for the "Breach Details" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub name: String,
    pub breach_date: NaiveDate,
    pub added_date: NaiveDate,

    /// Plain text (markup already stripped)
    pub description: String,

    /// "; "-joined links pulled out of the description
    pub references: String,
}

impl DetailRecord {
    pub fn to_row(&self) -> DetailRow {
        DetailRow {
            name: self.name.clone(),
            breach_date: self.breach_date.format("%Y-%m-%d").to_string(),
            added_date: self.added_date.format("%Y-%m-%d").to_string(),
            description: self.description.clone(),
            references: self.references.clone(),
        }
    }
}

/// One line of the "Breach Details" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    #[serde(rename = "Data Leak Name")]
    pub name: String,

    #[serde(rename = "Breach Date")]
    pub breach_date: String,

    #[serde(rename = "Date Added to Database")]
    pub added_date: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "References")]
    pub references: String,
}

// ============================================================================
// TESTS
// ============================================================================
