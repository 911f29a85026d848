use std::collections::HashSet;

use crate::types::TransferSummary;

/// Bookkeeping of one transfer run.
///
/// Ids only ever enter the de-duplication set; nothing is removed until the
/// session is dropped.
#[derive(Debug, Default)]
pub struct TransferSession {
    seen: HashSet<String>,
    duplicates: usize,
    errors: usize,
    skipped: usize,
}

impl TransferSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_duplicate(&self, track_id: &str) -> bool {
        self.seen.contains(track_id)
    }

    /// Counts a repeat of an id that was already processed.
    pub fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    /// Marks an id as processed.
    pub fn record_added(&mut self, track_id: &str) {
        self.seen.insert(track_id.to_string());
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn summary(&self) -> TransferSummary {
        TransferSummary {
            added: self.seen.len(),
            duplicates: self.duplicates,
            errors: self.errors,
            skipped: self.skipped,
        }
    }
}
