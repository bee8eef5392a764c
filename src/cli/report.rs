//! Text rendering of summaries and the daily category chart

use spendtrack::types::{DailyCategoryMatrix, DayKey, SpendSummary};
use std::fmt::Write;

/// Width of the longest bar in the daily chart
const BAR_WIDTH: usize = 40;

/// Axis label for a day: `MM/DD`
pub fn day_label(day: &DayKey) -> String {
    day.date().format("%m/%d").to_string()
}

/// One line per stacked segment, e.g. `Food: $10.00`
pub fn segment_label(category: &str, value: f64) -> String {
    format!("{}: ${:.2}", category, value)
}

/// Day footer, e.g. `Total: $15.00`
pub fn total_label(total: f64) -> String {
    format!("Total: ${:.2}", total)
}

pub fn render_summary(summary: &SpendSummary) -> String {
    format!(
        "Total spent:       ${:.2}\nDays with records: {}",
        summary.total_amount, summary.days_with_records
    )
}

/// Render the matrix as a text bar chart, one block per day.
///
/// Bar length scales with the day's positive spend; segments with a zero
/// value are skipped in the breakdown.
pub fn render_daily(matrix: &DailyCategoryMatrix) -> String {
    if matrix.is_empty() {
        return "No records yet".to_string();
    }

    let max_total = (0..matrix.days.len())
        .map(|i| matrix.day_total(i))
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (i, day) in matrix.days.iter().enumerate() {
        let total = matrix.day_total(i);
        let bar_len = if max_total > 0.0 && total > 0.0 {
            ((total / max_total) * BAR_WIDTH as f64).round().max(1.0) as usize
        } else {
            0
        };

        let _ = writeln!(
            out,
            "{}  {:<width$}  {}",
            day_label(day),
            "#".repeat(bar_len),
            total_label(total),
            width = BAR_WIDTH
        );
        for (category, value) in matrix.categories.iter().zip(&matrix.matrix[i]) {
            if *value != 0.0 {
                let _ = writeln!(out, "       {}", segment_label(category, *value));
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_matrix() -> DailyCategoryMatrix {
        DailyCategoryMatrix {
            days: vec!["2024-03-01".parse().unwrap(), "2024-03-02".parse().unwrap()],
            categories: vec!["Food".into(), "Transport".into()],
            matrix: vec![vec![10.0, 5.0], vec![-2.0, 0.0]],
        }
    }

    #[test]
    fn test_day_label() {
        let day: DayKey = "2024-03-01".parse().unwrap();
        assert_eq!(day_label(&day), "03/01");
    }

    #[test]
    fn test_segment_and_total_labels() {
        assert_eq!(segment_label("Food", 10.0), "Food: $10.00");
        assert_eq!(total_label(15.456), "Total: $15.46");
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&SpendSummary {
            total_amount: 13.0,
            days_with_records: 1,
        });
        assert!(text.contains("$13.00"));
        assert!(text.contains("Days with records: 1"));
    }

    #[test]
    fn test_render_daily_empty() {
        assert_eq!(render_daily(&DailyCategoryMatrix::default()), "No records yet");
    }

    #[test]
    fn test_render_daily() {
        let text = render_daily(&make_matrix());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("03/01"));
        assert!(lines[0].contains(&"#".repeat(BAR_WIDTH)));
        assert!(lines[0].ends_with("Total: $15.00"));
        assert_eq!(lines[1].trim(), "Food: $10.00");
        assert_eq!(lines[2].trim(), "Transport: $5.00");
        assert!(lines[3].starts_with("03/02"));
        assert!(lines[3].ends_with("Total: $-2.00"));
        assert_eq!(lines[4].trim(), "Food: $-2.00");
        assert_eq!(lines.len(), 5);
    }
}
