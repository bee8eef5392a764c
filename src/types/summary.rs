//! Aggregate output types

use serde::{Deserialize, Serialize};

use crate::types::{DayKey, SummaryError};

/// Total spend and number of UTC days with positive spend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpendSummary {
    pub total_amount: f64,
    pub days_with_records: u64,
}

/// Wire shape of the summary action: either the stats or a flat error string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SummaryResponse {
    Stats(SpendSummary),
    Error { error: String },
}

impl From<std::result::Result<SpendSummary, SummaryError>> for SummaryResponse {
    fn from(result: std::result::Result<SpendSummary, SummaryError>) -> Self {
        match result {
            Ok(summary) => Self::Stats(summary),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Dense day x category grid of summed amounts.
///
/// `matrix[d][c]` is the sum for `days[d]` and `categories[c]`. Every row has
/// exactly `categories.len()` cells; cells with no records hold 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DailyCategoryMatrix {
    /// Chronological ascending
    pub days: Vec<DayKey>,
    /// First-seen order
    pub categories: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

impl DailyCategoryMatrix {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Cell value, `None` only when the day or category is not in the grid
    pub fn get(&self, day: &DayKey, category: &str) -> Option<f64> {
        let d = self.days.binary_search(day).ok()?;
        let c = self.categories.iter().position(|cat| cat == category)?;
        self.matrix.get(d).and_then(|row| row.get(c)).copied()
    }

    /// One value per day for a category, aligned with `days`
    pub fn series(&self, category: &str) -> Option<Vec<f64>> {
        let c = self.categories.iter().position(|cat| cat == category)?;
        Some(
            self.matrix
                .iter()
                .map(|row| row.get(c).copied().unwrap_or(0.0))
                .collect(),
        )
    }

    /// Sum across categories for the day at `index`
    pub fn day_total(&self, index: usize) -> f64 {
        self.matrix
            .get(index)
            .map(|row| row.iter().sum())
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.matrix.iter().flatten().sum()
    }
}
