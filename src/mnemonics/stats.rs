//! Usage statistics over the record table
//!
//! Every distinct `createdAt` value counts as one study session, since a
//! bulk import stamps all of its entries with the same timestamp.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use super::models::{timestamp_to_utc, MnemonicRecord, StoreStats};

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn compute_stats(records: &[MnemonicRecord]) -> StoreStats {
    let total = records.len();

    let mut stats = StoreStats {
        total_records: total,
        distinct_words: records
            .iter()
            .map(|r| r.word.as_str())
            .collect::<HashSet<_>>()
            .len(),
        distinct_meanings: records
            .iter()
            .map(|r| r.meaning.as_str())
            .collect::<HashSet<_>>()
            .len(),
        missing_notes: records.iter().filter(|r| r.notes.trim().is_empty()).count(),
        ..StoreStats::default()
    };

    let timestamps: Vec<f64> = records
        .iter()
        .filter_map(|r| r.created_at)
        .filter(|t| t.is_finite())
        .collect();

    let sessions = distinct_sorted(&timestamps);
    let (Some(&first), Some(&last)) = (sessions.first(), sessions.last()) else {
        return stats;
    };

    stats.session_count = sessions.len();
    stats.most_recent_session = timestamp_to_utc(last);
    stats.records_per_session = Some(total as f64 / sessions.len() as f64);

    if sessions.len() > 1 {
        let gaps: Vec<f64> = sessions
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs() / SECONDS_PER_DAY)
            .collect();
        stats.mean_session_gap_days = Some(mean(&gaps));
    }

    let days_since_first: Vec<f64> = sessions
        .iter()
        .map(|t| (t - first) / SECONDS_PER_DAY)
        .collect();
    stats.session_spread_days = Some(std_dev(&days_since_first));

    let span_days = (last - first) / SECONDS_PER_DAY;
    if span_days > 0.0 {
        stats.records_per_day = Some(total as f64 / span_days);
    }

    stats.records_per_week = records_per_week(&timestamps);

    stats
}

/// Mean records per Monday-to-Sunday week (UTC), counting every week from
/// the first to the last, empty ones included
fn records_per_week(timestamps: &[f64]) -> Option<f64> {
    let weeks: Vec<NaiveDate> = timestamps
        .iter()
        .filter_map(|&t| timestamp_to_utc(t))
        .filter_map(|dt| week_start(dt.date_naive()))
        .collect();

    let first = weeks.iter().min()?;
    let last = weeks.iter().max()?;
    let bucket_count = (*last - *first).num_days() / 7 + 1;

    Some(weeks.len() as f64 / bucket_count as f64)
}

/// Monday of the week holding `date`, if it is representable
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
}

fn distinct_sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f64 = SECONDS_PER_DAY;

    fn record(word: &str, meaning: &str, created_at: Option<f64>) -> MnemonicRecord {
        let mut r = MnemonicRecord::new(word, meaning);
        r.created_at = created_at;
        r
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("metric should be defined");
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_empty_table() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, StoreStats::default());
    }

    #[test]
    fn test_three_sessions() {
        let records = vec![
            record("a", "one", Some(100.0)),
            record("b", "two", Some(200.0)),
            record("c", "three", Some(300.0)),
        ];
        let stats = compute_stats(&records);

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.most_recent_session.map(|d| d.timestamp()), Some(300));
        assert_close(stats.mean_session_gap_days, 100.0 / DAY);
        assert_close(stats.records_per_session, 1.0);
        assert_close(stats.records_per_day, 3.0 / (200.0 / DAY));
        // All three land in the same week
        assert_close(stats.records_per_week, 3.0);
    }

    #[test]
    fn test_single_session_has_no_gap_metrics() {
        let records = vec![
            record("a", "one", Some(1_000.0)),
            record("b", "two", Some(1_000.0)),
        ];
        let stats = compute_stats(&records);

        assert_eq!(stats.session_count, 1);
        assert_eq!(stats.mean_session_gap_days, None);
        assert_eq!(stats.records_per_day, None);
        assert_close(stats.records_per_session, 2.0);
        assert_close(stats.session_spread_days, 0.0);
    }

    #[test]
    fn test_distinct_counts_and_missing_notes() {
        let mut with_notes = record("a", "two", None);
        with_notes.notes = "noted".to_string();
        let records = vec![record("a", "one", None), with_notes, record("b", "one", None)];
        let stats = compute_stats(&records);

        assert_eq!(stats.distinct_words, 2);
        assert_eq!(stats.distinct_meanings, 2);
        assert_eq!(stats.missing_notes, 2);
        assert_eq!(stats.session_count, 0);
        assert_eq!(stats.records_per_session, None);
    }

    #[test]
    fn test_weekly_buckets_include_empty_weeks() {
        // 1970-01-05 was a Monday
        let monday = 4.0 * DAY;
        let records = vec![
            record("a", "1", Some(monday)),
            record("b", "2", Some(monday + 6.0 * DAY)),
            record("c", "3", Some(monday + 14.0 * DAY)),
            record("d", "4", Some(monday + 15.0 * DAY)),
        ];
        let stats = compute_stats(&records);

        // Weeks of Jan 5, Jan 12 (empty) and Jan 19
        assert_close(stats.records_per_week, 4.0 / 3.0);
    }

    #[test]
    fn test_session_spread() {
        let records = vec![
            record("a", "1", Some(0.0)),
            record("b", "2", Some(2.0 * DAY)),
        ];
        let stats = compute_stats(&records);
        assert_close(stats.session_spread_days, 1.0);
        assert_close(stats.mean_session_gap_days, 2.0);
    }

    #[test]
    fn test_earliest_representable_date_does_not_panic() {
        let earliest = chrono::DateTime::<chrono::Utc>::MIN_UTC.timestamp() as f64;
        let records = vec![record("a", "1", Some(earliest))];

        let stats = compute_stats(&records);
        assert_eq!(stats.session_count, 1);
        let min_is_monday = NaiveDate::MIN.weekday() == chrono::Weekday::Mon;
        assert_eq!(week_start(NaiveDate::MIN).is_some(), min_is_monday);
    }
}
