// 🚦 Risk Scorer - High/Low classification
//
// High  = most recent leak inside the trailing window
//      OR any category mentions the sensitive keyword ("password")
// Low   = everything else (including "no data")

use crate::config::EngineConfig;
use crate::model::{LeakDate, RiskScore};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
pub struct RiskScorer {
    window: Duration,
    keyword: String,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        RiskScorer {
            window: Duration::days(config.recent_window_days),
            keyword: config.sensitive_keyword.to_lowercase(),
        }
    }

    /// Pure: same inputs and same `now` always give the same score
    pub fn score(
        &self,
        most_recent: Option<LeakDate>,
        categories: &[String],
        now: DateTime<Utc>,
    ) -> RiskScore {
        if most_recent.map_or(false, |date| self.is_recent(date, now)) || self.has_sensitive(categories) {
            RiskScore::High
        } else {
            RiskScore::Low
        }
    }

    pub fn is_recent(&self, date: LeakDate, now: DateTime<Utc>) -> bool {
        let cutoff = now.date_naive() - self.window;
        date.calendar_date() > cutoff
    }

    pub fn has_sensitive(&self, categories: &[String]) -> bool {
        categories
            .iter()
            .any(|c| c.to_lowercase().contains(&self.keyword))
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn months_ago(n: u32) -> LeakDate {
        LeakDate::Day(now().date_naive().checked_sub_months(Months::new(n)).unwrap())
    }

    fn cats(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_old_leak_without_password_is_low() {
        let scorer = RiskScorer::new();
        assert_eq!(scorer.score(Some(months_ago(14)), &cats(&["username"]), now()), RiskScore::Low);
    }

    #[test]
    fn test_old_leak_with_password_is_high() {
        let scorer = RiskScorer::new();
        assert_eq!(scorer.score(Some(months_ago(14)), &cats(&["password"]), now()), RiskScore::High);
    }

    #[test]
    fn test_no_data_is_low() {
        let scorer = RiskScorer::new();
        assert_eq!(scorer.score(None, &[], now()), RiskScore::Low);
    }

    #[test]
    fn test_recent_leak_is_high() {
        let scorer = RiskScorer::new();
        assert_eq!(scorer.score(Some(months_ago(3)), &[], now()), RiskScore::High);
    }

    #[test]
    fn test_password_substring_case_insensitive() {
        let scorer = RiskScorer::new();
        assert!(scorer.has_sensitive(&cats(&["email", "Password hints"])));
        assert!(!scorer.has_sensitive(&cats(&["passphrase"])));
    }

    #[test]
    fn test_month_date_anchors_on_first_day() {
        let scorer = RiskScorer::new();
        // 2024-06 -> 2024-06-01, which is before the cutoff 2024-06-15
        let month = LeakDate::parse_month("2024-06").unwrap();
        assert!(!scorer.is_recent(month, now()));
        let month = LeakDate::parse_month("2024-07").unwrap();
        assert!(scorer.is_recent(month, now()));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let scorer = RiskScorer::new();
        let cutoff = now().date_naive() - Duration::days(365);
        assert!(!scorer.is_recent(LeakDate::Day(cutoff), now()));
        assert!(scorer.is_recent(LeakDate::Day(cutoff + Duration::days(1)), now()));
    }

    #[test]
    fn test_configured_window_and_keyword() {
        let config = EngineConfig {
            recent_window_days: 30,
            sensitive_keyword: "SSN".to_string(),
            ..EngineConfig::default()
        };
        let scorer = RiskScorer::from_config(&config);
        assert_eq!(scorer.score(Some(months_ago(3)), &cats(&["password"]), now()), RiskScore::Low);
        assert_eq!(scorer.score(None, &cats(&["partial ssn"]), now()), RiskScore::High);
    }
}
