//! Classify rows and forward-fill hazard fields.
//!
//! Continuation rows leave the hazard columns empty: they belong to the last
//! full row above them.
//!
//! ```text
//! Input rows                             →  Output records
//! ┌──────────────────────────────────┐     ┌──────────────────────────────────┐
//! │ 1.2 │ Опасность │ 1.2.3 │ СобА   │     │ 1.2 │ Опасность │ 1.2.3 │ СобА   │
//! │     │           │ 1.2.4 │ СобБ   │  →  │ 1.2 │ Опасность │ 1.2.4 │ СобБ   │
//! │ abc │ 123       │ xyz   │ 456    │     └──────────────────────────────────┘
//! └──────────────────────────────────┘
//! ```
//!
//! The carried hazard is an explicit `Option<Record>` passed into and
//! returned from [`Classifier::fill_row`]. Only full rows replace it.

use crate::error::PatternError;
use crate::models::{FillStats, Record, RowKind};

use super::rules::{RuleSet, EVENT_COLUMN, EVENT_ID_COLUMN, HAZARD_COLUMN, HAZARD_ID_COLUMN};

/// Outcome of processing one row
#[derive(Debug, Clone, PartialEq)]
pub struct FillStep {
    /// Record to append, if any
    pub record: Option<Record>,
    /// Carried hazard for the next row
    pub carried: Option<Record>,
    /// How the row was classified
    pub kind: RowKind,
}

/// A row that produced no record
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Index among data rows (headers excluded)
    pub row: usize,
    /// Why no record came out of it
    pub reason: String,
}

/// Result of filling a whole table
#[derive(Debug, Default)]
pub struct FillResult {
    /// Complete records in input order
    pub records: Vec<Record>,
    /// Rows that produced no record, in input order
    pub skipped: Vec<SkippedRow>,
    /// Per-kind row counters
    pub stats: FillStats,
}

impl FillResult {
    pub fn summary(&self) -> String {
        format!(
            "Filled: {} records ({} full, {} continuation), {} skipped",
            self.records.len(),
            self.stats.full,
            self.stats.continuation,
            self.skipped.len()
        )
    }
}

/// Trim surrounding whitespace from every cell.
pub fn trim_cells(row: &[String]) -> Vec<String> {
    row.iter().map(|cell| cell.trim().to_string()).collect()
}

/// Compiled classification rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    full: RuleSet,
    continuation: RuleSet,
}

impl Classifier {
    /// Compile both rule sets. Fails only if a pattern constant is broken.
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            full: RuleSet::full_record()?,
            continuation: RuleSet::continuation()?,
        })
    }

    /// Classify already trimmed cells. Full rules are tested first.
    pub fn classify(&self, cells: &[String]) -> RowKind {
        if self.full.matches(cells) {
            RowKind::Full
        } else if self.continuation.matches(cells) {
            RowKind::Continuation
        } else {
            RowKind::Skipped
        }
    }

    /// Process one raw row against the carried hazard.
    pub fn fill_row(&self, row: &[String], carried: Option<Record>) -> FillStep {
        let cells = trim_cells(row);
        let kind = self.classify(&cells);

        match kind {
            RowKind::Full => {
                let record = Record::new(
                    cells[HAZARD_ID_COLUMN].as_str(),
                    cells[HAZARD_COLUMN].as_str(),
                    cells[EVENT_ID_COLUMN].as_str(),
                    cells[EVENT_COLUMN].as_str(),
                );
                FillStep {
                    record: Some(record.clone()),
                    carried: Some(record),
                    kind,
                }
            }
            RowKind::Continuation => {
                let record = carried.as_ref().map(|hazard| {
                    hazard.with_event(
                        cells[EVENT_ID_COLUMN].as_str(),
                        cells[EVENT_COLUMN].as_str(),
                    )
                });
                FillStep { record, carried, kind }
            }
            RowKind::Skipped => FillStep { record: None, carried, kind },
        }
    }

    /// Fill every data row in order.
    pub fn fill_rows(&self, rows: &[Vec<String>]) -> FillResult {
        let mut result = FillResult::default();
        let mut carried: Option<Record> = None;

        for (index, row) in rows.iter().enumerate() {
            let step = self.fill_row(row, carried);
            carried = step.carried;
            result.stats.count(step.kind, step.record.is_some());

            match step.record {
                Some(record) => result.records.push(record),
                None => result.skipped.push(SkippedRow {
                    row: index,
                    reason: match step.kind {
                        RowKind::Continuation => "continuation before any hazard".to_string(),
                        _ => "matches neither rule".to_string(),
                    },
                }),
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    #[test]
    fn test_full_row_passes_through() {
        let step = classifier().fill_row(&row(&["1.2", "Опасность", "1.2.3", "СобытиеА"]), None);

        let expected = Record::new("1.2", "Опасность", "1.2.3", "СобытиеА");
        assert_eq!(step.kind, RowKind::Full);
        assert_eq!(step.record.as_ref(), Some(&expected));
        assert_eq!(step.carried, Some(expected));
    }

    #[test]
    fn test_continuation_copies_hazard() {
        let c = classifier();
        let rows = vec![
            row(&["1.2", "Опасность", "1.2.3", "СобытиеА"]),
            row(&["", "", "1.2.4", "СобытиеБ"]),
        ];

        let result = c.fill_rows(&rows);

        assert_eq!(
            result.records,
            vec![
                Record::new("1.2", "Опасность", "1.2.3", "СобытиеА"),
                Record::new("1.2", "Опасность", "1.2.4", "СобытиеБ"),
            ]
        );
    }

    #[test]
    fn test_consecutive_continuations_use_same_hazard() {
        let c = classifier();
        let rows = vec![
            row(&["1.1", "Механические", "1.1.1", "Падение"]),
            row(&["", "", "1.1.2", "Удар"]),
            row(&["", "", "1.1.3", "Порез"]),
            row(&["2.1", "Электрические", "2.1.1", "Контакт"]),
            row(&["", "", "2.1.2", "Дуга"]),
        ];

        let result = c.fill_rows(&rows);

        let hazards: Vec<&str> = result.records.iter().map(|r| r.hazard_id.as_str()).collect();
        assert_eq!(hazards, vec!["1.1", "1.1", "1.1", "2.1", "2.1"]);
        assert_eq!(result.records[2].hazard, "Механические");
        assert_eq!(result.records[4].hazard, "Электрические");
    }

    #[test]
    fn test_skipped_row_keeps_carried_state() {
        let c = classifier();
        let carried = Some(Record::new("1.2", "Опасность", "1.2.3", "СобытиеА"));

        let step = c.fill_row(&row(&["abc", "123", "xyz", "456"]), carried.clone());

        assert_eq!(step.kind, RowKind::Skipped);
        assert!(step.record.is_none());
        assert_eq!(step.carried, carried);
    }

    #[test]
    fn test_skipped_row_between_continuations() {
        let c = classifier();
        let rows = vec![
            row(&["1.2", "Опасность", "1.2.3", "СобытиеА"]),
            row(&["abc", "123", "xyz", "456"]),
            row(&["", "", "1.2.4", "СобытиеБ"]),
        ];

        let result = c.fill_rows(&rows);

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].hazard_id, "1.2");
        assert_eq!(result.skipped, vec![SkippedRow { row: 1, reason: "matches neither rule".into() }]);
    }

    #[test]
    fn test_continuation_without_hazard_emits_nothing() {
        let c = classifier();
        let rows = vec![
            row(&["", "", "1.2.4", "СобытиеБ"]),
            row(&["1.2", "Опасность", "1.2.3", "СобытиеА"]),
        ];

        let result = c.fill_rows(&rows);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.stats.orphaned, 1);
        assert_eq!(result.skipped[0].reason, "continuation before any hazard");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let c = classifier();
        let rows = vec![
            row(&["  1.2 ", "\tОпасность ", " 1.2.3", "СобытиеА  "]),
            row(&["   ", "", " 1.2.4 ", " СобытиеБ"]),
        ];

        let result = c.fill_rows(&rows);

        assert_eq!(result.records[0], Record::new("1.2", "Опасность", "1.2.3", "СобытиеА"));
        assert_eq!(result.records[1], Record::new("1.2", "Опасность", "1.2.4", "СобытиеБ"));
    }

    #[test]
    fn test_trailing_text_after_prefix_kept() {
        let result = classifier().fill_rows(&[row(&["1.2.", "Опасность падения", "1.2.3.", "Событие (прочее)"])]);
        assert_eq!(result.records[0].event, "Событие (прочее)");
        assert_eq!(result.records[0].hazard_id, "1.2.");
    }

    #[test]
    fn test_short_row_is_skipped() {
        let c = classifier();
        assert_eq!(c.classify(&row(&["1.2", "Опасность"])), RowKind::Skipped);
        assert_eq!(c.classify(&[]), RowKind::Skipped);
    }

    #[test]
    fn test_hazard_cell_present_but_invalid_is_not_continuation() {
        let c = classifier();
        assert_eq!(c.classify(&row(&["-", "", "1.2.4", "СобытиеБ"])), RowKind::Skipped);
        assert_eq!(c.classify(&row(&["1.2", "", "1.2.4", "СобытиеБ"])), RowKind::Skipped);
    }

    #[test]
    fn test_output_never_exceeds_input() {
        let c = classifier();
        let rows = vec![
            row(&["1.2", "Опасность", "1.2.3", "СобытиеА"]),
            row(&["", "", "", ""]),
            row(&["", "", "1.2.4", "СобытиеБ"]),
            row(&["Итого", "", "", ""]),
        ];

        let result = c.fill_rows(&rows);

        assert!(result.records.len() <= rows.len());
        assert_eq!(result.stats.rows, rows.len());
        assert_eq!(result.stats.emitted(), result.records.len());
        assert_eq!(result.stats.skipped, 2);
    }
}
