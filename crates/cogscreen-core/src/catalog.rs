//! The built-in test catalog.
//!
//! An immutable registry of assessment instruments, constructed once and
//! queried by pure functions. Custom definitions parsed from TOML files can
//! be merged in after the builtins; builtins win on id collision.

use crate::model::{
    Category, Cutoffs, Difficulty, Interpretation, Question, QuestionKind, ScoreDirection,
    ScoringSystem, SeverityInterpretations, TestDefinition,
};

/// Immutable registry of test definitions, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    tests: Vec<TestDefinition>,
}

impl Catalog {
    /// The built-in instrument set.
    pub fn builtin() -> Self {
        Self {
            tests: builtin_tests(),
        }
    }

    /// Builtins plus extra (e.g. TOML-loaded) definitions.
    ///
    /// A builtin id always shadows an extra definition with the same id.
    pub fn with_extra_tests(extra: Vec<TestDefinition>) -> Self {
        let mut tests = builtin_tests();
        for def in extra {
            if tests.iter().any(|t| t.id == def.id) {
                tracing::warn!("ignoring custom test '{}': id collides with a builtin", def.id);
            } else {
                tests.push(def);
            }
        }
        Self { tests }
    }

    /// Look up a test by id.
    pub fn get_test(&self, id: &str) -> Option<&TestDefinition> {
        self.tests.iter().find(|t| t.id == id)
    }

    /// All tests, in catalog order.
    pub fn tests(&self) -> &[TestDefinition] {
        &self.tests
    }

    /// Tests in the given category, in catalog order.
    pub fn tests_by_category(&self, category: Category) -> Vec<&TestDefinition> {
        self.tests.iter().filter(|t| t.category == category).collect()
    }

    /// Deduplicated categories in catalog order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::new();
        for t in &self.tests {
            if !out.contains(&t.category) {
                out.push(t.category);
            }
        }
        out
    }
}

fn q(id: &str, kind: QuestionKind, prompt: &str, points: u32) -> Question {
    Question {
        id: id.into(),
        kind,
        prompt: prompt.into(),
        points,
        time_limit_secs: None,
        media: None,
        options: Vec::new(),
        reference_answer: None,
    }
}

fn timed_q(id: &str, kind: QuestionKind, prompt: &str, points: u32, limit: u32) -> Question {
    Question {
        time_limit_secs: Some(limit),
        ..q(id, kind, prompt, points)
    }
}

fn choice_q(id: &str, kind: QuestionKind, prompt: &str, points: u32, options: &[&str]) -> Question {
    Question {
        options: options.iter().map(|s| s.to_string()).collect(),
        ..q(id, kind, prompt, points)
    }
}

fn interp(text: &str, recommendations: &[&str]) -> Interpretation {
    Interpretation {
        text: text.into(),
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
    }
}

fn builtin_tests() -> Vec<TestDefinition> {
    vec![
        mmse(),
        moca(),
        word_recall(),
        digit_span(),
        verbal_fluency(),
        clock_drawing(),
        trail_making(),
        gds_staging(),
    ]
}

fn mmse() -> TestDefinition {
    TestDefinition {
        id: "mmse".into(),
        name: "MMSE".into(),
        full_name: "Mini-Mental State Examination".into(),
        category: Category::Screening,
        difficulty: Difficulty::Medium,
        duration_minutes: 10,
        questions: vec![
            q(
                "orientation-time",
                QuestionKind::FreeText,
                "What is the year, season, date, day of the week, and month?",
                5,
            ),
            q(
                "orientation-place",
                QuestionKind::FreeText,
                "Where are we now: country, region, town, building, floor?",
                5,
            ),
            q(
                "registration",
                QuestionKind::Recall,
                "Repeat these three words: apple, table, penny.",
                3,
            ),
            q(
                "serial-sevens",
                QuestionKind::Sequence,
                "Count backwards from 100 by sevens, five steps.",
                5,
            ),
            q(
                "delayed-recall",
                QuestionKind::Recall,
                "What were the three words I asked you to remember earlier?",
                3,
            ),
            choice_q(
                "naming",
                QuestionKind::Recognition,
                "Name the two objects shown.",
                2,
                &["watch", "pencil", "glasses", "key"],
            ),
            q(
                "repetition",
                QuestionKind::FreeText,
                "Repeat the phrase: \"No ifs, ands, or buts.\"",
                1,
            ),
            q(
                "comprehension",
                QuestionKind::Sequence,
                "Take this paper in your right hand, fold it in half, and place it on the floor.",
                3,
            ),
            q(
                "reading",
                QuestionKind::FreeText,
                "Read the sentence aloud and do what it says: CLOSE YOUR EYES.",
                1,
            ),
            q(
                "writing",
                QuestionKind::FreeText,
                "Write a complete sentence of your choosing.",
                1,
            ),
            q(
                "copying",
                QuestionKind::Drawing,
                "Copy the intersecting pentagons.",
                1,
            ),
        ],
        scoring: ScoringSystem {
            total_points: 30,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 24,
                mild: 19,
                moderate: 10,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "Performance within the expected range for general cognition.",
                &[
                    "Maintain regular mental and physical activity.",
                    "Re-screen in 12 months.",
                ],
            ),
            mild: interp(
                "Mild cognitive difficulty; some domains scored below the usual range.",
                &[
                    "Discuss the result with a primary care provider.",
                    "Repeat the screening in 3 to 6 months.",
                ],
            ),
            moderate: interp(
                "Moderate impairment across several cognitive domains.",
                &[
                    "Arrange a comprehensive clinical evaluation.",
                    "Review medications that may affect cognition.",
                ],
            ),
            severe: interp(
                "Severe impairment; the screening indicates substantial difficulty.",
                &[
                    "Seek a specialist assessment promptly.",
                    "Involve a caregiver in planning daily support.",
                ],
            ),
        },
    }
}

fn moca() -> TestDefinition {
    TestDefinition {
        id: "moca".into(),
        name: "MoCA".into(),
        full_name: "Montreal Cognitive Assessment".into(),
        category: Category::Screening,
        difficulty: Difficulty::Hard,
        duration_minutes: 15,
        questions: vec![
            q(
                "trail-alternation",
                QuestionKind::Drawing,
                "Draw a line alternating between numbers and letters: 1-A-2-B-3-C.",
                1,
            ),
            q("cube-copy", QuestionKind::Drawing, "Copy the cube.", 1),
            q(
                "clock-draw",
                QuestionKind::Drawing,
                "Draw a clock showing ten past eleven.",
                3,
            ),
            choice_q(
                "naming-animals",
                QuestionKind::Recognition,
                "Name the three animals shown.",
                3,
                &["lion", "rhinoceros", "camel", "horse", "elephant"],
            ),
            q(
                "digits",
                QuestionKind::Sequence,
                "Repeat the digits forward, then a second list backward.",
                2,
            ),
            timed_q(
                "vigilance-tap",
                QuestionKind::Timed,
                "Tap each time you hear the letter A in the read-out list.",
                1,
                60,
            ),
            q(
                "serial-sevens",
                QuestionKind::Sequence,
                "Subtract 7 from 100, then keep subtracting 7, five times.",
                3,
            ),
            q(
                "sentence-repetition",
                QuestionKind::FreeText,
                "Repeat each sentence exactly as spoken.",
                2,
            ),
            timed_q(
                "fluency-f",
                QuestionKind::Timed,
                "Name as many words beginning with F as you can in one minute.",
                1,
                60,
            ),
            q(
                "abstraction",
                QuestionKind::FreeText,
                "How are a train and a bicycle alike? An orange and a banana?",
                2,
            ),
            q(
                "delayed-recall",
                QuestionKind::Recall,
                "Recall the five words from earlier with no cues.",
                5,
            ),
            q(
                "orientation",
                QuestionKind::FreeText,
                "State the date, month, year, day, place, and city.",
                6,
            ),
        ],
        scoring: ScoringSystem {
            total_points: 30,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 26,
                mild: 18,
                moderate: 10,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "No indication of cognitive impairment on this screening.",
                &["Continue routine cognitive health habits."],
            ),
            mild: interp(
                "Scores suggest mild cognitive impairment.",
                &[
                    "Follow up with a clinician for a fuller work-up.",
                    "Track results over the coming months.",
                ],
            ),
            moderate: interp(
                "Scores suggest moderate impairment across domains.",
                &["Schedule a neuropsychological evaluation."],
            ),
            severe: interp(
                "Scores suggest severe impairment.",
                &[
                    "Seek specialist care promptly.",
                    "Arrange support for day-to-day activities.",
                ],
            ),
        },
    }
}

fn word_recall() -> TestDefinition {
    TestDefinition {
        id: "word-recall".into(),
        name: "Word Recall".into(),
        full_name: "Word List Memory Test".into(),
        category: Category::Memory,
        difficulty: Difficulty::Easy,
        duration_minutes: 8,
        questions: vec![
            q(
                "immediate-recall",
                QuestionKind::Recall,
                "Listen to the ten words, then repeat as many as you can.",
                5,
            ),
            choice_q(
                "interference",
                QuestionKind::MultipleChoice,
                "Which of these shapes matches the one shown before the list?",
                2,
                &["circle", "square", "triangle", "star"],
            ),
            q(
                "delayed-recall",
                QuestionKind::Recall,
                "After the delay, repeat as many of the ten words as you can.",
                5,
            ),
            choice_q(
                "word-recognition",
                QuestionKind::Recognition,
                "Pick the words that were on the original list.",
                3,
                &["river", "candle", "engine", "garden", "marble", "basket"],
            ),
        ],
        scoring: ScoringSystem {
            total_points: 15,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 12,
                mild: 9,
                moderate: 5,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "Verbal memory performance within the expected range.",
                &["Re-screen annually."],
            ),
            mild: interp(
                "Mildly reduced verbal memory performance.",
                &["Repeat the test in 3 months to establish a trend."],
            ),
            moderate: interp(
                "Moderately reduced verbal memory performance.",
                &["Discuss memory changes with a clinician."],
            ),
            severe: interp(
                "Severely reduced verbal memory performance.",
                &["Arrange a clinical memory assessment."],
            ),
        },
    }
}

fn digit_span() -> TestDefinition {
    TestDefinition {
        id: "digit-span".into(),
        name: "Digit Span".into(),
        full_name: "Digit Span Attention Test".into(),
        category: Category::Attention,
        difficulty: Difficulty::Medium,
        duration_minutes: 6,
        questions: vec![
            q(
                "forward-3",
                QuestionKind::Sequence,
                "Repeat the three digits in the order given.",
                2,
            ),
            q(
                "forward-5",
                QuestionKind::Sequence,
                "Repeat the five digits in the order given.",
                3,
            ),
            q(
                "forward-7",
                QuestionKind::Sequence,
                "Repeat the seven digits in the order given.",
                3,
            ),
            q(
                "backward-3",
                QuestionKind::Sequence,
                "Repeat the three digits in reverse order.",
                4,
            ),
            q(
                "backward-5",
                QuestionKind::Sequence,
                "Repeat the five digits in reverse order.",
                4,
            ),
        ],
        scoring: ScoringSystem {
            total_points: 16,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 12,
                mild: 8,
                moderate: 4,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "Attention span within the expected range.",
                &["No follow-up needed."],
            ),
            mild: interp(
                "Mildly reduced attention span.",
                &["Check sleep quality and medication effects."],
            ),
            moderate: interp(
                "Moderately reduced attention span.",
                &["Consider a focused attention assessment."],
            ),
            severe: interp(
                "Severely reduced attention span.",
                &["Seek clinical evaluation of attention and concentration."],
            ),
        },
    }
}

fn verbal_fluency() -> TestDefinition {
    TestDefinition {
        id: "verbal-fluency".into(),
        name: "Verbal Fluency".into(),
        full_name: "Verbal Fluency Test (phonemic and semantic)".into(),
        category: Category::Language,
        difficulty: Difficulty::Medium,
        duration_minutes: 5,
        questions: vec![
            timed_q(
                "letter-f",
                QuestionKind::Timed,
                "Say as many words starting with the letter F as you can.",
                4,
                60,
            ),
            timed_q(
                "animals",
                QuestionKind::Timed,
                "Name as many animals as you can.",
                4,
                60,
            ),
            timed_q(
                "category-switch",
                QuestionKind::Timed,
                "Alternate naming a fruit and a piece of furniture.",
                4,
                60,
            ),
        ],
        scoring: ScoringSystem {
            total_points: 12,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 9,
                mild: 6,
                moderate: 3,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "Word retrieval within the expected range.",
                &["No follow-up needed."],
            ),
            mild: interp(
                "Mildly reduced word retrieval.",
                &["Re-test after adequate rest; fatigue lowers fluency."],
            ),
            moderate: interp(
                "Moderately reduced word retrieval.",
                &["Consider a speech-language evaluation."],
            ),
            severe: interp(
                "Severely reduced word retrieval.",
                &["Arrange a clinical language assessment."],
            ),
        },
    }
}

fn clock_drawing() -> TestDefinition {
    TestDefinition {
        id: "clock-drawing".into(),
        name: "Clock Drawing".into(),
        full_name: "Clock Drawing Test".into(),
        category: Category::Visuospatial,
        difficulty: Difficulty::Easy,
        duration_minutes: 5,
        questions: vec![
            timed_q(
                "clock-face",
                QuestionKind::Drawing,
                "Draw a clock face with all the numbers, showing ten past eleven.",
                4,
                300,
            ),
            choice_q(
                "time-reading",
                QuestionKind::Recognition,
                "What time does the clock shown display?",
                2,
                &["10:10", "11:10", "1:50", "2:55"],
            ),
        ],
        scoring: ScoringSystem {
            total_points: 6,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 5,
                mild: 4,
                moderate: 2,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "Visuospatial construction within the expected range.",
                &["No follow-up needed."],
            ),
            mild: interp(
                "Minor visuospatial inaccuracies.",
                &["Repeat in 6 months."],
            ),
            moderate: interp(
                "Notable visuospatial difficulty.",
                &["Discuss with a clinician; consider vision check."],
            ),
            severe: interp(
                "Severe visuospatial difficulty.",
                &["Arrange a clinical visuospatial assessment."],
            ),
        },
    }
}

fn trail_making() -> TestDefinition {
    TestDefinition {
        id: "trail-making".into(),
        name: "Trail Making".into(),
        full_name: "Trail Making Test (parts A and B)".into(),
        category: Category::Executive,
        difficulty: Difficulty::Hard,
        duration_minutes: 8,
        questions: vec![
            timed_q(
                "part-a",
                QuestionKind::Drawing,
                "Connect the numbered circles in ascending order as fast as you can.",
                4,
                180,
            ),
            timed_q(
                "part-b",
                QuestionKind::Drawing,
                "Connect circles alternating numbers and letters: 1-A-2-B-3-C...",
                6,
                300,
            ),
        ],
        scoring: ScoringSystem {
            total_points: 10,
            direction: ScoreDirection::HigherIsBetter,
            cutoffs: Cutoffs {
                normal: 8,
                mild: 5,
                moderate: 2,
                severe: 0,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "Processing speed and set-shifting within the expected range.",
                &["No follow-up needed."],
            ),
            mild: interp(
                "Mildly slowed set-shifting.",
                &["Re-test when rested."],
            ),
            moderate: interp(
                "Moderately slowed set-shifting.",
                &["Consider an executive-function evaluation."],
            ),
            severe: interp(
                "Severely slowed set-shifting.",
                &["Seek a clinical executive-function assessment."],
            ),
        },
    }
}

/// Deterioration staging scale. The one builtin where lower is better:
/// stage 1 (no complaints) is the healthy end, stage 7 the severe end.
fn gds_staging() -> TestDefinition {
    TestDefinition {
        id: "gds-staging".into(),
        name: "GDS Staging".into(),
        full_name: "Global Deterioration Staging Questionnaire".into(),
        category: Category::Screening,
        difficulty: Difficulty::Easy,
        duration_minutes: 5,
        questions: vec![
            choice_q(
                "memory-complaints",
                QuestionKind::MultipleChoice,
                "How often do memory lapses interfere with daily tasks?",
                2,
                &["never", "occasionally", "weekly", "daily"],
            ),
            choice_q(
                "daily-function",
                QuestionKind::MultipleChoice,
                "How much help is needed with routine activities?",
                2,
                &["none", "reminders", "supervision", "full assistance"],
            ),
            choice_q(
                "orientation-awareness",
                QuestionKind::MultipleChoice,
                "How often is there confusion about time or place?",
                3,
                &["never", "rarely", "often", "constantly"],
            ),
        ],
        scoring: ScoringSystem {
            total_points: 7,
            direction: ScoreDirection::LowerIsBetter,
            cutoffs: Cutoffs {
                normal: 2,
                mild: 3,
                moderate: 5,
                severe: 7,
            },
        },
        interpretations: SeverityInterpretations {
            normal: interp(
                "No functional decline reported.",
                &["Re-screen annually."],
            ),
            mild: interp(
                "Early-stage functional changes reported.",
                &["Monitor and re-screen in 3 months."],
            ),
            moderate: interp(
                "Mid-stage functional decline reported.",
                &["Arrange a clinical staging assessment."],
            ),
            severe: interp(
                "Late-stage functional decline reported.",
                &["Coordinate care planning with a specialist."],
            ),
        },
    }
}
