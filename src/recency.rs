// ⏰ Recency Tracker - Most recent leak across both providers
//
// Provider A: max over dated entries (month granularity)
// Provider B: running max over every entry (day granularity), no ordering assumed
// Combined: strictly later wins; same calendar month -> the day report wins

use crate::model::{LeakEvent, RecentLeak};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct RecencyTracker {
    best: Option<RecentLeak>,
}

impl RecencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consider one event. Undated and malformed entries are skipped.
    pub fn observe(&mut self, event: &LeakEvent) {
        let date = match event.parsed_date() {
            None => return,
            Some(Ok(date)) => date,
            Some(Err(e)) => {
                warn!(name = %event.name, source = %event.source, error = %e, "skipping leak date for recency");
                return;
            }
        };

        let later = match &self.best {
            None => true,
            Some(current) => date > current.date,
        };

        if later {
            self.best = Some(RecentLeak {
                name: event.name.clone(),
                date,
                source: event.source,
            });
        }
    }

    pub fn observe_all<'a, I: IntoIterator<Item = &'a LeakEvent>>(&mut self, events: I) {
        for event in events {
            self.observe(event);
        }
    }

    /// None is the "no data" sentinel
    pub fn finish(self) -> Option<RecentLeak> {
        self.best
    }

    /// Track both providers for one identity
    pub fn track(provider_a: &[LeakEvent], provider_b: &[LeakEvent]) -> Option<RecentLeak> {
        let mut a = Self::new();
        a.observe_all(provider_a);
        let mut b = Self::new();
        b.observe_all(provider_b);

        match (a.finish(), b.finish()) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only),
            (Some(from_a), Some(from_b)) => {
                if from_a.date > from_b.date {
                    Some(from_a)
                } else if from_b.date > from_a.date {
                    Some(from_b)
                } else {
                    // Only reachable when both sides share a granularity;
                    // keep the richer provider
                    Some(from_b)
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeakDate, ProviderTag};

    fn a(name: &str, date: Option<&str>) -> LeakEvent {
        LeakEvent::new(name, date, ProviderTag::LeakCheck)
    }

    fn b(name: &str, date: &str) -> LeakEvent {
        LeakEvent::new(name, Some(date), ProviderTag::Hibp)
    }

    #[test]
    fn test_provider_a_only() {
        let recent = RecencyTracker::track(
            &[a("Old", Some("2022-01")), a("New", Some("2023-07"))],
            &[],
        )
        .unwrap();
        assert_eq!(recent.date, LeakDate::parse_month("2023-07").unwrap());
        assert_eq!(recent.label(), "New: 2023-07");
    }

    #[test]
    fn test_undated_and_malformed_skipped() {
        let recent = RecencyTracker::track(
            &[a("Undated", None), a("Broken", Some("sometime")), a("Real", Some("2020-02"))],
            &[b("BadDay", "2024-02-30")],
        )
        .unwrap();
        assert_eq!(recent.name, "Real");
    }

    #[test]
    fn test_no_dated_entries_is_no_data() {
        assert!(RecencyTracker::track(&[a("Undated", None)], &[]).is_none());
        assert!(RecencyTracker::track(&[], &[]).is_none());
    }

    #[test]
    fn test_provider_b_unsorted_input() {
        let recent = RecencyTracker::track(
            &[],
            &[b("Mid", "2020-06-01"), b("Newest", "2022-03-15"), b("Oldest", "2015-01-01")],
        )
        .unwrap();
        assert_eq!(recent.label(), "Newest: 2022-03-15");
    }

    #[test]
    fn test_provider_b_equal_dates_keep_first() {
        let recent = RecencyTracker::track(&[], &[b("First", "2022-03-15"), b("Second", "2022-03-15")]).unwrap();
        assert_eq!(recent.name, "First");
    }

    #[test]
    fn test_later_provider_wins() {
        let recent = RecencyTracker::track(&[a("AcmeA", Some("2023-09"))], &[b("AcmeB", "2023-08-31")]).unwrap();
        assert_eq!(recent.source, ProviderTag::LeakCheck);

        let recent = RecencyTracker::track(&[a("AcmeA", Some("2023-08"))], &[b("AcmeB", "2023-09-01")]).unwrap();
        assert_eq!(recent.source, ProviderTag::Hibp);
    }

    #[test]
    fn test_same_month_day_wins() {
        let recent = RecencyTracker::track(&[a("Acme", Some("2023-05"))], &[b("Acme", "2023-05-01")]).unwrap();
        assert_eq!(recent.source, ProviderTag::Hibp);
        assert_eq!(recent.label(), "Acme: 2023-05-01");
    }
}
