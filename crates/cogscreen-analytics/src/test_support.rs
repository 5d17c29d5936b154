//! Shared fixtures for analytics tests.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use cogscreen_core::model::Severity;
use cogscreen_store::result::TestResult;

pub fn base_time() -> DateTime<Utc> {
    "2025-06-15T12:00:00Z".parse().unwrap()
}

/// Build one result record with explicit fields the analytics care about.
pub fn result_at(
    test_id: &str,
    percentage: u32,
    severity: Severity,
    timestamp: DateTime<Utc>,
    test_number: u32,
) -> TestResult {
    TestResult {
        id: Uuid::new_v4(),
        test_id: test_id.into(),
        test_name: test_id.to_uppercase(),
        user_id: "user-1".into(),
        score: percentage * 30 / 100,
        max_score: 30,
        percentage,
        severity,
        duration: 8.0,
        timestamp,
        date: timestamp.format("%Y-%m-%d").to_string(),
        time: timestamp.format("%H:%M").to_string(),
        test_number,
        version: 1,
        answers: None,
        metadata: None,
    }
}

/// Results from an oldest-first percentage series, one per day, returned
/// newest-first the way the store hands them out.
pub fn results_with_percentages(percentages: &[u32]) -> Vec<TestResult> {
    let mut out: Vec<TestResult> = percentages
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            result_at(
                "mmse",
                p,
                Severity::Normal,
                base_time() + Duration::days(i as i64),
                i as u32 + 1,
            )
        })
        .collect();
    out.reverse();
    out
}
