//! Domain models for the hazard table normalizer.
//!
//! - [`Record`] - One complete hazard/event line of the output
//! - [`RowKind`] - How an input row was classified
//! - [`FillStats`] - Per-run classification counters

use serde::Serialize;

// =============================================================================
// Record
// =============================================================================

/// A complete hazard/event record.
///
/// Field order is the output column order. Identifiers are kept as opaque
/// strings even though they look like dotted numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Hazard identifier, e.g. `1.2`.
    pub hazard_id: String,
    /// Hazard name.
    pub hazard: String,
    /// Event identifier, e.g. `1.2.3`.
    pub event_id: String,
    /// Event name.
    pub event: String,
}

impl Record {
    pub fn new(
        hazard_id: impl Into<String>,
        hazard: impl Into<String>,
        event_id: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self {
            hazard_id: hazard_id.into(),
            hazard: hazard.into(),
            event_id: event_id.into(),
            event: event.into(),
        }
    }

    /// Derive a record for another event of the same hazard.
    pub fn with_event(&self, event_id: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            hazard_id: self.hazard_id.clone(),
            hazard: self.hazard.clone(),
            event_id: event_id.into(),
            event: event.into(),
        }
    }
}

// =============================================================================
// Row classification
// =============================================================================

/// Classification of a single data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// All four fields present and well-formed.
    Full,
    /// Hazard fields empty, event fields well-formed.
    Continuation,
    /// Matches neither rule.
    Skipped,
}

// =============================================================================
// Statistics
// =============================================================================

/// Counters collected while filling rows.
///
/// `full + continuation + orphaned + skipped == rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Data rows seen (headers excluded).
    pub rows: usize,
    /// Rows emitted as full records.
    pub full: usize,
    /// Continuation rows merged with a carried hazard.
    pub continuation: usize,
    /// Continuation rows seen before any full record.
    pub orphaned: usize,
    /// Rows matching neither rule.
    pub skipped: usize,
}

impl FillStats {
    /// Account for one row.
    pub fn count(&mut self, kind: RowKind, emitted: bool) {
        self.rows += 1;
        match (kind, emitted) {
            (RowKind::Full, _) => self.full += 1,
            (RowKind::Continuation, true) => self.continuation += 1,
            (RowKind::Continuation, false) => self.orphaned += 1,
            (RowKind::Skipped, _) => self.skipped += 1,
        }
    }

    /// Number of records emitted.
    pub fn emitted(&self) -> usize {
        self.full + self.continuation
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_event_keeps_hazard() {
        let full = Record::new("1.2", "Опасность", "1.2.3", "СобытиеА");
        let next = full.with_event("1.2.4", "СобытиеБ");

        assert_eq!(next.hazard_id, "1.2");
        assert_eq!(next.hazard, "Опасность");
        assert_eq!(next.event_id, "1.2.4");
        assert_eq!(next.event, "СобытиеБ");
        // Source untouched
        assert_eq!(full.event_id, "1.2.3");
    }

    #[test]
    fn test_stats_invariant() {
        let mut stats = FillStats::default();
        stats.count(RowKind::Continuation, false);
        stats.count(RowKind::Full, true);
        stats.count(RowKind::Continuation, true);
        stats.count(RowKind::Skipped, false);

        assert_eq!(stats.rows, 4);
        assert_eq!(stats.orphaned, 1);
        assert_eq!(stats.emitted(), 2);
        assert_eq!(
            stats.full + stats.continuation + stats.orphaned + stats.skipped,
            stats.rows
        );
    }
}
