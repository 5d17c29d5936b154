//! Core data model types for cogscreen.
//!
//! These are the fundamental types the entire cogscreen system uses to
//! represent test definitions, questions, answers, and severity bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A complete cognitive assessment instrument.
///
/// Definitions are immutable: constructed once (built in, or parsed from a
/// TOML file) and only ever read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestDefinition {
    /// Unique identifier (e.g. "mmse").
    pub id: String,
    /// Short display name.
    pub name: String,
    /// Full clinical name.
    pub full_name: String,
    /// Cognitive domain this test targets.
    pub category: Category,
    /// Difficulty tier shown to the user.
    pub difficulty: Difficulty,
    /// Estimated duration in minutes.
    pub duration_minutes: u32,
    /// Questions in presentation and scoring order.
    pub questions: Vec<Question>,
    /// How raw scores map to severity bands.
    pub scoring: ScoringSystem,
    /// Per-band interpretation text and recommendations.
    pub interpretations: SeverityInterpretations,
}

impl TestDefinition {
    /// Sum of the point values of all questions.
    pub fn question_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// A single question within a test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the owning test.
    pub id: String,
    /// Answer type expected for this question.
    pub kind: QuestionKind,
    /// The prompt shown to the user.
    pub prompt: String,
    /// Points awarded when the answer is present.
    pub points: u32,
    /// Optional per-question countdown in seconds.
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
    /// Optional image/audio reference, opaque to the engine.
    #[serde(default)]
    pub media: Option<String>,
    /// Enumerated options for selection-style questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Reference answer for grading aids; not used by presence scoring.
    #[serde(default)]
    pub reference_answer: Option<String>,
}

/// The answer type a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FreeText,
    Recall,
    Recognition,
    Drawing,
    Timed,
    Sequence,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::FreeText => "free_text",
            QuestionKind::Recall => "recall",
            QuestionKind::Recognition => "recognition",
            QuestionKind::Drawing => "drawing",
            QuestionKind::Timed => "timed",
            QuestionKind::Sequence => "sequence",
        };
        write!(f, "{s}")
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "free_text" | "text" => Ok(QuestionKind::FreeText),
            "recall" => Ok(QuestionKind::Recall),
            "recognition" => Ok(QuestionKind::Recognition),
            "drawing" => Ok(QuestionKind::Drawing),
            "timed" => Ok(QuestionKind::Timed),
            "sequence" => Ok(QuestionKind::Sequence),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// Cognitive domain of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Memory,
    Attention,
    Language,
    Visuospatial,
    Executive,
    Screening,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Memory => "memory",
            Category::Attention => "attention",
            Category::Language => "language",
            Category::Visuospatial => "visuospatial",
            Category::Executive => "executive",
            Category::Screening => "screening",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Category::Memory),
            "attention" => Ok(Category::Attention),
            "language" => Ok(Category::Language),
            "visuospatial" => Ok(Category::Visuospatial),
            "executive" => Ok(Category::Executive),
            "screening" => Ok(Category::Screening),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Difficulty tier shown in the catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// How a test's raw score maps to severity bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSystem {
    /// Maximum achievable raw score. Must equal the sum of question points.
    pub total_points: u32,
    /// Whether higher or lower raw scores indicate better function.
    #[serde(default)]
    pub direction: ScoreDirection,
    /// Band boundaries as raw-score thresholds.
    pub cutoffs: Cutoffs,
}

/// Score polarity. Most instruments award points for intact function, but
/// staging scales (e.g. deterioration ratings) invert: a low score is the
/// healthy outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

/// Four raw-score boundaries defining severity band edges.
///
/// For `HigherIsBetter` each value is the lower bound of its band; for
/// `LowerIsBetter` it is the upper bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cutoffs {
    pub normal: u32,
    pub mild: u32,
    pub moderate: u32,
    pub severe: u32,
}

/// Severity band assigned by comparing a raw score against cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// All bands, best to worst.
    pub const ALL: [Severity; 4] = [
        Severity::Normal,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
    ];

    /// Stable lowercase label used on the wire and in breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Severity::Normal),
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Interpretation text and follow-up recommendations for one band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    pub text: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Per-band interpretations for a test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityInterpretations {
    pub normal: Interpretation,
    pub mild: Interpretation,
    pub moderate: Interpretation,
    pub severe: Interpretation,
}

impl SeverityInterpretations {
    pub fn for_severity(&self, severity: Severity) -> &Interpretation {
        match severity {
            Severity::Normal => &self.normal,
            Severity::Mild => &self.mild,
            Severity::Moderate => &self.moderate,
            Severity::Severe => &self.severe,
        }
    }
}

/// A submitted answer, tagged by shape.
///
/// The variant carries the payload the presentation layer captured; which
/// variants are acceptable for a question depends on its [`QuestionKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    /// Free text, recall text, or a timed-task transcription.
    Text { value: String },
    /// A selection from an enumerated option list.
    Selection { value: String },
    /// Ordered steps for sequence questions.
    Sequence { steps: Vec<String> },
    /// Captured stroke points plus an optional verbal description.
    Drawing {
        points: Vec<(f32, f32)>,
        #[serde(default)]
        description: String,
    },
    /// Explicitly skipped; never present.
    Skipped,
}

impl Answer {
    /// Type-specific presence rule.
    ///
    /// An answer is "present" only when it is non-empty for the question's
    /// kind. Presence drives both submission validation and scoring, so the
    /// match is deliberately exhaustive over (kind, variant).
    pub fn is_present_for(&self, kind: QuestionKind) -> bool {
        match (kind, self) {
            (_, Answer::Skipped) => false,

            (
                QuestionKind::MultipleChoice | QuestionKind::Recognition,
                Answer::Selection { value },
            ) => !value.trim().is_empty(),
            (QuestionKind::MultipleChoice | QuestionKind::Recognition, _) => false,

            (
                QuestionKind::FreeText | QuestionKind::Recall | QuestionKind::Timed,
                Answer::Text { value },
            ) => !value.trim().is_empty(),
            (QuestionKind::FreeText | QuestionKind::Recall | QuestionKind::Timed, _) => false,

            (QuestionKind::Drawing, Answer::Drawing {
                points,
                description,
            }) => !points.is_empty() || !description.trim().is_empty(),
            // A verbal description may stand in for a drawing capture.
            (QuestionKind::Drawing, Answer::Text { value }) => !value.trim().is_empty(),
            (QuestionKind::Drawing, _) => false,

            (QuestionKind::Sequence, Answer::Sequence { steps }) => {
                steps.iter().any(|s| !s.trim().is_empty())
            }
            // Ditto for sequences recounted as text.
            (QuestionKind::Sequence, Answer::Text { value }) => !value.trim().is_empty(),
            (QuestionKind::Sequence, _) => false,
        }
    }
}
