//! Presence-based scoring and severity classification.
//!
//! Most question types require human or clinical judgment to grade, so the
//! engine awards a question's points whenever an answer was supplied, not
//! whenever it was correct. Pure and deterministic: identical inputs always
//! produce identical outcomes.

use serde::{Deserialize, Serialize};

use crate::model::{
    Cutoffs, Interpretation, ScoreDirection, ScoringSystem, Severity, TestDefinition,
};
use crate::session::CompletedSession;

/// The resolved score of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub raw_score: u32,
    pub max_score: u32,
    /// `round(raw / max * 100)`, 0 when max is 0.
    pub percentage: u32,
    pub severity: Severity,
}

/// Score a completed session against its originating test definition.
pub fn score(session: &CompletedSession) -> ScoreOutcome {
    let test = &session.test;
    let raw_score: u32 = test
        .questions
        .iter()
        .filter(|q| {
            session
                .answers
                .iter()
                .find(|(id, _)| *id == q.id)
                .is_some_and(|(_, answer)| answer.is_present_for(q.kind))
        })
        .map(|q| q.points)
        .sum();

    let max_score = test.scoring.total_points;
    ScoreOutcome {
        raw_score,
        max_score,
        percentage: percentage(raw_score, max_score),
        severity: classify(raw_score, &test.scoring),
    }
}

/// Rounded percentage, clamped to the 0..=100 contract.
pub fn percentage(raw: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    ((raw as f64 / max as f64) * 100.0).round().min(100.0) as u32
}

/// Classify a raw score into a severity band.
///
/// Walks the cutoffs from the best band to the worst and selects the first
/// whose threshold the score satisfies, defaulting to `Severe`. For
/// higher-is-better tests a threshold is a lower bound; for lower-is-better
/// staging scales it is an upper bound.
pub fn classify(raw: u32, scoring: &ScoringSystem) -> Severity {
    let Cutoffs {
        normal,
        mild,
        moderate,
        ..
    } = scoring.cutoffs;

    match scoring.direction {
        ScoreDirection::HigherIsBetter => {
            if raw >= normal {
                Severity::Normal
            } else if raw >= mild {
                Severity::Mild
            } else if raw >= moderate {
                Severity::Moderate
            } else {
                Severity::Severe
            }
        }
        ScoreDirection::LowerIsBetter => {
            if raw <= normal {
                Severity::Normal
            } else if raw <= mild {
                Severity::Mild
            } else if raw <= moderate {
                Severity::Moderate
            } else {
                Severity::Severe
            }
        }
    }
}

/// Interpretation text and recommendations for a band of the given test.
pub fn interpretation(test: &TestDefinition, severity: Severity) -> &Interpretation {
    test.interpretations.for_severity(severity)
}
