// 🔗 Leak Event Merger - One ordered, deduplicated leak summary per identity
//
// Provider A events go in first, Provider B events are appended unless an
// entry with the same (case-folded name, presented date) already exists.
//
// Dedup is exact on the date STRING. The same breach reported as
// "Acme (2023-05)" by A and "Acme (2023-05-14)" by B stays as two entries.

use crate::model::LeakEvent;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LeakEventMerger {
    events: Vec<LeakEvent>,
    seen: HashSet<(String, String)>,
}

impl LeakEventMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one event; returns false when it duplicates an earlier entry
    pub fn push(&mut self, event: LeakEvent) -> bool {
        let key = event.dedup_key();
        if !self.seen.insert(key) {
            debug!(name = %event.name, date = ?event.date, source = %event.source, "duplicate leak event skipped");
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn extend<I: IntoIterator<Item = LeakEvent>>(&mut self, events: I) {
        for event in events {
            self.push(event);
        }
    }

    pub fn events(&self) -> &[LeakEvent] {
        &self.events
    }

    /// "Name (date)" entries in insertion order
    pub fn summary(&self) -> Vec<String> {
        self.events.iter().map(LeakEvent::render).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
