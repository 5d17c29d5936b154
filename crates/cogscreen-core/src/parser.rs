//! TOML test-definition parser.
//!
//! Loads custom test definitions from TOML files and directories, and
//! validates them before they join the catalog.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Category, Cutoffs, Difficulty, Interpretation, Question, QuestionKind, ScoreDirection,
    ScoringSystem, SeverityInterpretations, TestDefinition,
};

/// Intermediate TOML structure for parsing test definition files.
#[derive(Debug, Deserialize)]
struct TomlTestFile {
    test: TomlTestHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlTestHeader {
    id: String,
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    category: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default = "default_duration")]
    duration_minutes: u32,
    scoring: TomlScoring,
    interpretations: TomlInterpretations,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_duration() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
struct TomlScoring {
    total_points: u32,
    #[serde(default = "default_direction")]
    direction: String,
    cutoffs: TomlCutoffs,
}

fn default_direction() -> String {
    "higher_is_better".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlCutoffs {
    normal: u32,
    mild: u32,
    moderate: u32,
    severe: u32,
}

#[derive(Debug, Deserialize)]
struct TomlInterpretations {
    normal: TomlInterpretation,
    mild: TomlInterpretation,
    moderate: TomlInterpretation,
    severe: TomlInterpretation,
}

#[derive(Debug, Deserialize)]
struct TomlInterpretation {
    text: String,
    #[serde(default)]
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    kind: String,
    prompt: String,
    points: u32,
    #[serde(default)]
    time_limit_secs: Option<u32>,
    #[serde(default)]
    media: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    reference_answer: Option<String>,
}

/// Parse a single TOML file into a `TestDefinition`.
pub fn parse_test_file(path: &Path) -> Result<TestDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read test file: {}", path.display()))?;
    parse_test_str(&content, path)
}

/// Parse a TOML string into a `TestDefinition` (useful for testing).
pub fn parse_test_str(content: &str, source_path: &Path) -> Result<TestDefinition> {
    let parsed: TomlTestFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let TomlTestHeader {
        id,
        name,
        full_name,
        category,
        difficulty,
        duration_minutes,
        scoring,
        interpretations,
    } = parsed.test;

    let category = Category::from_str(&category).map_err(|e| anyhow::anyhow!("{e}"))?;
    let difficulty = Difficulty::from_str(&difficulty).map_err(|e| anyhow::anyhow!("{e}"))?;
    let direction = match scoring.direction.as_str() {
        "higher_is_better" => ScoreDirection::HigherIsBetter,
        "lower_is_better" => ScoreDirection::LowerIsBetter,
        other => anyhow::bail!("unknown score direction: {other}"),
    };

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind = QuestionKind::from_str(&q.kind).map_err(|e| anyhow::anyhow!("{e}"))?;
            Ok(Question {
                id: q.id,
                kind,
                prompt: q.prompt,
                points: q.points,
                time_limit_secs: q.time_limit_secs,
                media: q.media,
                options: q.options,
                reference_answer: q.reference_answer,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let interp = |i: TomlInterpretation| Interpretation {
        text: i.text,
        recommendations: i.recommendations,
    };

    Ok(TestDefinition {
        id,
        full_name: full_name.unwrap_or_else(|| name.clone()),
        name,
        category,
        difficulty,
        duration_minutes,
        questions,
        scoring: ScoringSystem {
            total_points: scoring.total_points,
            direction,
            cutoffs: Cutoffs {
                normal: scoring.cutoffs.normal,
                mild: scoring.cutoffs.mild,
                moderate: scoring.cutoffs.moderate,
                severe: scoring.cutoffs.severe,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(interpretations.normal),
            mild: interp(interpretations.mild),
            moderate: interp(interpretations.moderate),
            severe: interp(interpretations.severe),
        },
    })
}

/// Recursively load all `.toml` test definitions from a directory.
///
/// Files that fail to parse are skipped with a warning rather than aborting
/// the whole load.
pub fn load_test_directory(dir: &Path) -> Result<Vec<TestDefinition>> {
    let mut tests = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            tests.extend(load_test_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_test_file(&path) {
                Ok(test) => tests.push(test),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(tests)
}

/// A warning from test-definition validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a test definition for common issues.
pub fn validate_test(test: &TestDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate question ids
    let mut seen_ids = std::collections::HashSet::new();
    for question in &test.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question id: {}", question.id),
            });
        }
    }

    // Point sum must equal the declared total
    let sum = test.question_points();
    if sum != test.scoring.total_points {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "question points sum to {sum} but total_points is {}",
                test.scoring.total_points
            ),
        });
    }

    // Cutoffs must be monotonic in the declared direction
    let c = &test.scoring.cutoffs;
    let ordered = match test.scoring.direction {
        ScoreDirection::HigherIsBetter => {
            c.normal >= c.mild && c.mild >= c.moderate && c.moderate >= c.severe
        }
        ScoreDirection::LowerIsBetter => {
            c.normal <= c.mild && c.mild <= c.moderate && c.moderate <= c.severe
        }
    };
    if !ordered {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "cutoff thresholds are not monotonic for the score direction".into(),
        });
    }

    // Selection questions need options; all questions need a prompt
    for question in &test.questions {
        if matches!(
            question.kind,
            QuestionKind::MultipleChoice | QuestionKind::Recognition
        ) && question.options.is_empty()
        {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("{} question has no options", question.kind),
            });
        }
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[test]
id = "story-recall"
name = "Story Recall"
full_name = "Short Story Recall Test"
category = "memory"
difficulty = "easy"
duration_minutes = 7

[test.scoring]
total_points = 10
direction = "higher_is_better"

[test.scoring.cutoffs]
normal = 8
mild = 5
moderate = 2
severe = 0

[test.interpretations.normal]
text = "Story memory within the expected range."
recommendations = ["Re-screen annually."]

[test.interpretations.mild]
text = "Mildly reduced story memory."

[test.interpretations.moderate]
text = "Moderately reduced story memory."

[test.interpretations.severe]
text = "Severely reduced story memory."

[[questions]]
id = "immediate"
kind = "recall"
prompt = "Retell the story you just heard."
points = 5

[[questions]]
id = "delayed"
kind = "recall"
prompt = "Retell the story again after the delay."
points = 5
time_limit_secs = 120
"#;

    #[test]
    fn parse_valid_toml() {
        let test = parse_test_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(test.id, "story-recall");
        assert_eq!(test.category, Category::Memory);
        assert_eq!(test.questions.len(), 2);
        assert_eq!(test.questions[1].time_limit_secs, Some(120));
        assert_eq!(test.scoring.cutoffs.normal, 8);
        assert!(validate_test(&test).is_empty());
    }

    #[test]
    fn parse_defaults() {
        let toml = r#"
[test]
id = "minimal"
name = "Minimal"
category = "attention"

[test.scoring]
total_points = 1

[test.scoring.cutoffs]
normal = 1
mild = 1
moderate = 0
severe = 0

[test.interpretations.normal]
text = "ok"
[test.interpretations.mild]
text = "ok"
[test.interpretations.moderate]
text = "ok"
[test.interpretations.severe]
text = "ok"

[[questions]]
id = "q1"
kind = "free_text"
prompt = "Say something."
points = 1
"#;
        let test = parse_test_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(test.difficulty, Difficulty::Medium);
        assert_eq!(test.duration_minutes, 10);
        assert_eq!(test.scoring.direction, ScoreDirection::HigherIsBetter);
        assert_eq!(test.full_name, "Minimal");
    }

    #[test]
    fn parse_bad_category() {
        let toml = VALID_TOML.replace("category = \"memory\"", "category = \"sports\"");
        assert!(parse_test_str(&toml, &PathBuf::from("test.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_test_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_point_sum_mismatch() {
        let mut test = parse_test_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        test.scoring.total_points = 12;
        let warnings = validate_test(&test);
        assert!(warnings.iter().any(|w| w.message.contains("sum to 10")));
    }

    #[test]
    fn validate_duplicate_question_ids() {
        let mut test = parse_test_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        test.questions[1].id = "immediate".into();
        let warnings = validate_test(&test);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_unordered_cutoffs() {
        let mut test = parse_test_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        test.scoring.cutoffs.mild = 9;
        test.scoring.cutoffs.normal = 5;
        let warnings = validate_test(&test);
        assert!(warnings.iter().any(|w| w.message.contains("monotonic")));
    }

    #[test]
    fn validate_selection_without_options() {
        let mut test = parse_test_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        test.questions[0].kind = QuestionKind::MultipleChoice;
        let warnings = validate_test(&test);
        assert!(warnings.iter().any(|w| w.message.contains("no options")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("story.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml [").unwrap();

        let tests = load_test_directory(dir.path()).unwrap();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].id, "story-recall");
    }
}
