//! Row classification rules.
//!
//! A rule pairs a column index with a pattern. A rule set matches a row when
//! every rule matches its column. Patterns are anchored at the start only, so
//! trailing text after a valid prefix is accepted.

use regex::Regex;

use crate::error::PatternError;

/// Hazard id column, e.g. `1.2`
pub const HAZARD_ID_COLUMN: usize = 0;
/// Hazard name column
pub const HAZARD_COLUMN: usize = 1;
/// Event id column, e.g. `1.2.3`
pub const EVENT_ID_COLUMN: usize = 2;
/// Event name column
pub const EVENT_COLUMN: usize = 3;

/// Two-level dotted number prefix.
pub const HAZARD_ID_PATTERN: &str = r"^[0-9]+\.[0-9]+";
/// Three-level dotted number prefix.
pub const EVENT_ID_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+";
/// Leading Cyrillic word.
pub const NAME_PATTERN: &str = r"^[а-яА-Я]+";
/// Exactly empty cell.
pub const EMPTY_PATTERN: &str = r"^$";

/// A single column test
#[derive(Debug, Clone)]
pub struct Rule {
    pub column: usize,
    pub pattern: Regex,
}

impl Rule {
    pub fn new(column: usize, pattern: &str) -> Result<Self, PatternError> {
        let compiled = Regex::new(pattern).map_err(|source| PatternError::Compile {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { column, pattern: compiled })
    }

    /// Missing columns never match.
    pub fn matches(&self, cells: &[String]) -> bool {
        cells
            .get(self.column)
            .is_some_and(|cell| self.pattern.is_match(cell))
    }
}

/// Ordered list of rules that must all match
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: &'static str, spec: &[(usize, &str)]) -> Result<Self, PatternError> {
        let rules = spec
            .iter()
            .map(|&(column, pattern)| Rule::new(column, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, rules })
    }

    /// Rows carrying hazard and event fields.
    pub fn full_record() -> Result<Self, PatternError> {
        Self::new(
            "full",
            &[
                (HAZARD_ID_COLUMN, HAZARD_ID_PATTERN),
                (HAZARD_COLUMN, NAME_PATTERN),
                (EVENT_ID_COLUMN, EVENT_ID_PATTERN),
                (EVENT_COLUMN, NAME_PATTERN),
            ],
        )
    }

    /// Rows carrying only event fields.
    pub fn continuation() -> Result<Self, PatternError> {
        Self::new(
            "continuation",
            &[
                (HAZARD_ID_COLUMN, EMPTY_PATTERN),
                (HAZARD_COLUMN, EMPTY_PATTERN),
                (EVENT_ID_COLUMN, EVENT_ID_PATTERN),
                (EVENT_COLUMN, NAME_PATTERN),
            ],
        )
    }

    pub fn matches(&self, cells: &[String]) -> bool {
        self.rules.iter().all(|rule| rule.matches(cells))
    }
}
