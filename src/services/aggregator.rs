//! Aggregator service for computing spend statistics

use crate::types::{DailyCategoryMatrix, DayKey, ExpenseRecord, SpendSummary};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};

/// Aggregator for computing spend statistics
pub struct Aggregator;

impl Aggregator {
    /// Total spend and count of UTC days with at least one positive amount
    pub fn summary(records: &[ExpenseRecord]) -> SpendSummary {
        let mut days: HashSet<DayKey> = HashSet::new();
        let mut total_amount = 0.0;

        for record in records {
            total_amount += record.amount;

            // Zero and refunds never mark a day as a spend day
            if record.amount > 0.0 {
                days.insert(record.day_key());
            }
        }

        SpendSummary {
            total_amount,
            days_with_records: days.len() as u64,
        }
    }

    /// Bucket records into a dense day x category matrix.
    ///
    /// Days come out chronological, categories in first-seen order.
    pub fn daily_by_category(records: &[ExpenseRecord]) -> DailyCategoryMatrix {
        if records.is_empty() {
            return DailyCategoryMatrix::default();
        }

        // category -> column index, insertion ordered
        let mut categories: IndexMap<&str, usize> = IndexMap::new();
        // day -> (column -> partial sum); BTreeMap keeps days sorted
        let mut by_day: BTreeMap<DayKey, Vec<(usize, f64)>> = BTreeMap::new();

        for record in records {
            let next = categories.len();
            let column = *categories.entry(record.category.as_str()).or_insert(next);

            let cells = by_day.entry(record.day_key()).or_default();
            match cells.iter_mut().find(|(c, _)| *c == column) {
                Some((_, sum)) => *sum += record.amount,
                None => cells.push((column, record.amount)),
            }
        }

        // Densify
        let width = categories.len();
        let mut days = Vec::with_capacity(by_day.len());
        let mut matrix = Vec::with_capacity(by_day.len());
        for (day, cells) in by_day {
            let mut row = vec![0.0; width];
            for (column, sum) in cells {
                row[column] = sum;
            }
            days.push(day);
            matrix.push(row);
        }

        DailyCategoryMatrix {
            days,
            categories: categories.into_keys().map(String::from).collect(),
            matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn make_record(
        year: i32,
        month: u32,
        day: u32,
        amount: f64,
        category: &str,
    ) -> ExpenseRecord {
        make_record_at(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
            amount,
            category,
        )
    }

    fn make_record_at(timestamp: DateTime<Utc>, amount: f64, category: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: format!("{}-{}", timestamp.timestamp(), category),
            amount,
            timestamp,
            created_at: timestamp,
            category: category.to_string(),
            text: None,
        }
    }

    fn worked_example() -> Vec<ExpenseRecord> {
        vec![
            make_record(2024, 3, 1, 10.0, "Food"),
            make_record(2024, 3, 1, 5.0, "Transport"),
            make_record(2024, 3, 2, -2.0, "Food"),
        ]
    }

    // ========== summary() tests ==========

    #[test]
    fn test_summary_empty() {
        let result = Aggregator::summary(&[]);
        assert_eq!(result.total_amount, 0.0);
        assert_eq!(result.days_with_records, 0);
    }

    #[test]
    fn test_summary_worked_example() {
        let result = Aggregator::summary(&worked_example());
        assert!((result.total_amount - 13.0).abs() < f64::EPSILON);
        // 2024-03-02 only has a negative amount
        assert_eq!(result.days_with_records, 1);
    }

    #[test]
    fn test_summary_zero_amount_does_not_count_day() {
        let records = vec![
            make_record(2024, 1, 10, 0.0, "Food"),
            make_record(2024, 1, 11, 4.0, "Food"),
        ];
        let result = Aggregator::summary(&records);
        assert!((result.total_amount - 4.0).abs() < f64::EPSILON);
        assert_eq!(result.days_with_records, 1);
    }

    #[test]
    fn test_summary_same_day_counted_once() {
        let records = vec![
            make_record(2024, 1, 10, 1.0, "Food"),
            make_record(2024, 1, 10, 2.0, "Rent"),
            make_record(2024, 1, 10, 3.0, "Food"),
        ];
        assert_eq!(Aggregator::summary(&records).days_with_records, 1);
    }

    #[test]
    fn test_summary_utc_day_boundary() {
        let records = vec![
            make_record_at(Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap(), 1.0, "Food"),
            make_record_at(Utc.with_ymd_and_hms(2024, 1, 2, 0, 1, 0).unwrap(), 1.0, "Food"),
        ];
        assert_eq!(Aggregator::summary(&records).days_with_records, 2);
    }

    #[test]
    fn test_summary_total_independent_of_order() {
        let mut records = vec![
            make_record(2024, 2, 1, 0.1, "Food"),
            make_record(2024, 2, 3, 0.2, "Rent"),
            make_record(2024, 2, 2, 0.3, "Food"),
            make_record(2024, 2, 5, -0.05, "Food"),
        ];
        let forward = Aggregator::summary(&records);
        records.reverse();
        let backward = Aggregator::summary(&records);

        assert!((forward.total_amount - backward.total_amount).abs() < 1e-9);
        assert!((forward.total_amount - 0.55).abs() < 1e-9);
        assert_eq!(forward.days_with_records, backward.days_with_records);
        assert_eq!(forward.days_with_records, 3);
    }

    // ========== daily_by_category() tests ==========

    #[test]
    fn test_daily_by_category_empty() {
        let result = Aggregator::daily_by_category(&[]);
        assert!(result.days.is_empty());
        assert!(result.categories.is_empty());
        assert!(result.matrix.is_empty());
    }

    #[test]
    fn test_daily_by_category_worked_example() {
        let result = Aggregator::daily_by_category(&worked_example());

        let days: Vec<String> = result.days.iter().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2024-03-01", "2024-03-02"]);
        assert_eq!(result.categories, vec!["Food", "Transport"]);
        assert_eq!(result.matrix, vec![vec![10.0, 5.0], vec![-2.0, 0.0]]);
    }

    #[test]
    fn test_daily_by_category_first_seen_order() {
        let records = vec![
            make_record(2024, 1, 1, 1.0, "Food"),
            make_record(2024, 1, 1, 1.0, "Rent"),
            make_record(2024, 1, 2, 1.0, "Food"),
            make_record(2024, 1, 2, 1.0, "Transport"),
        ];
        let result = Aggregator::daily_by_category(&records);
        assert_eq!(result.categories, vec!["Food", "Rent", "Transport"]);
    }

    #[test]
    fn test_daily_by_category_not_alphabetical() {
        let records = vec![
            make_record(2024, 1, 1, 1.0, "Zoo"),
            make_record(2024, 1, 1, 1.0, "Apples"),
        ];
        let result = Aggregator::daily_by_category(&records);
        assert_eq!(result.categories, vec!["Zoo", "Apples"]);
    }

    #[test]
    fn test_daily_by_category_days_sorted_regardless_of_input_order() {
        let records = vec![
            make_record(2024, 1, 20, 1.0, "Food"),
            make_record(2023, 12, 31, 2.0, "Food"),
            make_record(2024, 1, 10, 3.0, "Food"),
        ];
        let result = Aggregator::daily_by_category(&records);

        let days: Vec<String> = result.days.iter().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2023-12-31", "2024-01-10", "2024-01-20"]);
        assert_eq!(result.series("Food"), Some(vec![2.0, 3.0, 1.0]));
    }

    #[test]
    fn test_daily_by_category_same_cell_accumulates() {
        let records = vec![
            make_record_at(Utc.with_ymd_and_hms(2024, 4, 1, 1, 0, 0).unwrap(), 2.5, "Food"),
            make_record_at(Utc.with_ymd_and_hms(2024, 4, 1, 22, 0, 0).unwrap(), 7.5, "Food"),
        ];
        let result = Aggregator::daily_by_category(&records);
        assert_eq!(result.matrix, vec![vec![10.0]]);
    }

    #[test]
    fn test_daily_by_category_dense_and_sums_to_total() {
        let records = vec![
            make_record(2024, 5, 1, 12.0, "Food"),
            make_record(2024, 5, 2, 800.0, "Rent"),
            make_record(2024, 5, 3, 3.5, "Transport"),
            make_record(2024, 5, 3, -1.5, "Food"),
            make_record(2024, 5, 5, 0.0, "Fun"),
        ];
        let result = Aggregator::daily_by_category(&records);

        assert_eq!(result.days.len(), 4);
        assert_eq!(result.categories.len(), 4);
        assert_eq!(result.matrix.len(), result.days.len());
        for row in &result.matrix {
            assert_eq!(row.len(), result.categories.len());
        }

        let record_total: f64 = records.iter().map(|r| r.amount).sum();
        assert!((result.total() - record_total).abs() < 1e-9);
    }

    #[test]
    fn test_daily_by_category_agrees_with_summary_total() {
        let records = worked_example();
        let matrix = Aggregator::daily_by_category(&records);
        let summary = Aggregator::summary(&records);
        assert!((matrix.total() - summary.total_amount).abs() < 1e-9);
    }
}
