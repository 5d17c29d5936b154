//! The persisted result record.
//!
//! `TestResult` is immutable once written. Field names are camelCase on the
//! wire to match the documented storage layout; the derived `date`/`time`
//! strings exist for display layers that render without a date library.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cogscreen_core::model::{Answer, Severity};
use cogscreen_core::scoring::ScoreOutcome;
use cogscreen_core::session::CompletedSession;

/// Schema version stamped onto new records.
pub const SCHEMA_VERSION: u32 = 1;

/// One completed, persisted test attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Generated unique id.
    pub id: Uuid,
    /// Originating test id.
    pub test_id: String,
    /// Display name at the time of the attempt.
    pub test_name: String,
    /// Owning user.
    pub user_id: String,
    /// Raw presence-based score.
    pub score: u32,
    /// Maximum possible raw score.
    pub max_score: u32,
    /// Rounded 0..=100.
    pub percentage: u32,
    pub severity: Severity,
    /// Attempt duration in minutes.
    pub duration: f64,
    /// Creation instant, ISO-8601.
    pub timestamp: DateTime<Utc>,
    /// Derived "YYYY-MM-DD" display string.
    pub date: String,
    /// Derived "HH:MM" display string.
    pub time: String,
    /// Monotonically assigned sequence number for trend charts.
    pub test_number: u32,
    /// Schema version tag.
    pub version: u32,
    /// Full answer list, when the caller chose to keep it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<StoredAnswer>>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

/// An answer as stored alongside a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnswer {
    pub question_id: String,
    pub answer: Answer,
}

/// The caller-supplied part of a result; the store assigns the rest
/// (id, timestamp, derived strings, test number, version).
#[derive(Debug, Clone)]
pub struct NewResult {
    pub test_id: String,
    pub test_name: String,
    pub user_id: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub severity: Severity,
    pub duration: f64,
    pub answers: Option<Vec<StoredAnswer>>,
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl NewResult {
    /// Build a record from a scored session, keeping the answer list.
    pub fn from_scored(session: &CompletedSession, outcome: ScoreOutcome) -> Self {
        let duration_minutes =
            (session.completed_at - session.started_at).num_seconds().max(0) as f64 / 60.0;
        Self {
            test_id: session.test.id.clone(),
            test_name: session.test.name.clone(),
            user_id: session.user_id.clone(),
            score: outcome.raw_score,
            max_score: outcome.max_score,
            percentage: outcome.percentage,
            severity: outcome.severity,
            duration: duration_minutes,
            answers: Some(
                session
                    .answers
                    .iter()
                    .map(|(question_id, answer)| StoredAnswer {
                        question_id: question_id.clone(),
                        answer: answer.clone(),
                    })
                    .collect(),
            ),
            metadata: None,
        }
    }

    /// Stamp the store-assigned fields onto the record.
    pub(crate) fn into_result(self, test_number: u32, timestamp: DateTime<Utc>) -> TestResult {
        TestResult {
            id: Uuid::new_v4(),
            test_id: self.test_id,
            test_name: self.test_name,
            user_id: self.user_id,
            score: self.score,
            max_score: self.max_score,
            percentage: self.percentage,
            severity: self.severity,
            duration: self.duration,
            timestamp,
            date: timestamp.format("%Y-%m-%d").to_string(),
            time: timestamp.format("%H:%M").to_string(),
            test_number,
            version: SCHEMA_VERSION,
            answers: self.answers,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new() -> NewResult {
        NewResult {
            test_id: "mmse".into(),
            test_name: "MMSE".into(),
            user_id: "user-1".into(),
            score: 25,
            max_score: 30,
            percentage: 83,
            severity: Severity::Normal,
            duration: 9.5,
            answers: None,
            metadata: None,
        }
    }

    #[test]
    fn stamped_fields() {
        let timestamp: DateTime<Utc> = "2025-06-01T14:30:00Z".parse().unwrap();
        let result = sample_new().into_result(4, timestamp);
        assert_eq!(result.test_number, 4);
        assert_eq!(result.version, SCHEMA_VERSION);
        assert_eq!(result.date, "2025-06-01");
        assert_eq!(result.time, "14:30");
    }

    #[test]
    fn camel_case_wire_format() {
        let timestamp: DateTime<Utc> = "2025-06-01T14:30:00Z".parse().unwrap();
        let result = sample_new().into_result(1, timestamp);
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("testId").is_some());
        assert!(json.get("maxScore").is_some());
        assert!(json.get("testNumber").is_some());
        assert_eq!(json["severity"], "normal");
        // absent optionals are omitted entirely
        assert!(json.get("answers").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn serde_roundtrip_with_answers() {
        let timestamp: DateTime<Utc> = "2025-06-01T14:30:00Z".parse().unwrap();
        let mut new = sample_new();
        new.answers = Some(vec![StoredAnswer {
            question_id: "orientation-time".into(),
            answer: Answer::Text {
                value: "june 2025".into(),
            },
        }]);
        let result = new.into_result(1, timestamp);

        let json = serde_json::to_string(&result).unwrap();
        let back: TestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
