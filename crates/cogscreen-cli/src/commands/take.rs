//! Take a test non-interactively, answering from a JSON file.
//!
//! The answers file maps question ids to payloads in the collaborator
//! shapes: a string (text or selection), a string array (sequence steps),
//! or an object `{points, description}` for drawings. Questions missing
//! from the file are skipped.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;

use cogscreen_core::model::{Answer, QuestionKind};
use cogscreen_core::scoring;
use cogscreen_core::session::{Session, SessionState};
use cogscreen_store::result::NewResult;

use crate::config::load_config;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Text(String),
    Steps(Vec<String>),
    Drawing {
        #[serde(default)]
        points: Vec<(f32, f32)>,
        #[serde(default)]
        description: String,
    },
}

impl RawAnswer {
    fn into_answer(self, kind: QuestionKind) -> Answer {
        match (kind, self) {
            (
                QuestionKind::MultipleChoice | QuestionKind::Recognition,
                RawAnswer::Text(value),
            ) => Answer::Selection { value },
            (_, RawAnswer::Text(value)) => Answer::Text { value },
            (_, RawAnswer::Steps(steps)) => Answer::Sequence { steps },
            (_, RawAnswer::Drawing { points, description }) => Answer::Drawing {
                points,
                description,
            },
        }
    }
}

pub async fn execute(
    test_id: String,
    user: Option<String>,
    answers_path: PathBuf,
    duration: Option<f64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let catalog = super::load_catalog(&config)?;
    let user_id = user.unwrap_or_else(|| config.default_user.clone());

    let answers_text = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("Failed to read answers file: {}", answers_path.display()))?;
    let mut raw_answers: HashMap<String, RawAnswer> = serde_json::from_str(&answers_text)
        .with_context(|| format!("Failed to parse answers file: {}", answers_path.display()))?;

    let mut session = Session::start(&catalog, &test_id, &user_id, Utc::now())?;
    let test_name = session.test().name.clone();

    while session.state() == SessionState::InProgress {
        let question = session
            .current_question()
            .ok_or_else(|| anyhow::anyhow!("session in progress without a current question"))?;
        let question_id = question.id.clone();
        let kind = question.kind;

        match raw_answers.remove(&question_id) {
            Some(raw) => session
                .submit_answer(raw.into_answer(kind), Utc::now())
                .with_context(|| format!("Answer rejected for question '{question_id}'"))?,
            None => session.next(Utc::now())?,
        }
    }

    for unmatched in raw_answers.keys() {
        tracing::warn!("answers file entry '{unmatched}' matches no question, ignored");
    }

    let completed = session.finish(Utc::now())?;
    let outcome = scoring::score(&completed);
    let interpretation = scoring::interpretation(&completed.test, outcome.severity).clone();

    let mut new = NewResult::from_scored(&completed, outcome);
    if let Some(minutes) = duration {
        new.duration = minutes;
    }

    let mut store = super::open_store(&config).await;
    let stored = store.add_result(new).await?;

    println!("{test_name} — attempt #{}", stored.test_number);
    println!(
        "  score: {}/{} ({}%)",
        outcome.raw_score, outcome.max_score, outcome.percentage
    );
    println!("  severity: {}", outcome.severity);
    println!("\n{}", interpretation.text);
    for recommendation in &interpretation.recommendations {
        println!("  • {recommendation}");
    }
    println!("\nResult stored as {}", stored.id);

    Ok(())
}
