//! Transformation module.
//!
//! This module turns raw table rows into complete records:
//! - Rules: column patterns used to classify rows
//! - Fill: classification and hazard forward-fill
//! - Pipeline: read → fill → write orchestration

pub mod fill;
pub mod pipeline;
pub mod rules;

pub use fill::{trim_cells, Classifier, FillResult, FillStep, SkippedRow};
pub use pipeline::*;
pub use rules::{Rule, RuleSet};
