use std::path::PathBuf;

use anyhow::Result;

use cogscreen_core::model::{ScoreDirection, Severity};

use crate::config::load_config;

pub fn execute(test_id: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let catalog = super::load_catalog(&config)?;

    let test = catalog
        .get_test(&test_id)
        .ok_or_else(|| anyhow::anyhow!("Test not found: {test_id}"))?;

    println!("{} — {}", test.name, test.full_name);
    println!(
        "  category: {}  difficulty: {}  duration: ~{} min",
        test.category, test.difficulty, test.duration_minutes
    );
    println!(
        "  scoring: {} points, {}",
        test.scoring.total_points,
        match test.scoring.direction {
            ScoreDirection::HigherIsBetter => "higher is better",
            ScoreDirection::LowerIsBetter => "lower is better",
        }
    );
    println!(
        "  cutoffs: normal {} / mild {} / moderate {} / severe {}",
        test.scoring.cutoffs.normal,
        test.scoring.cutoffs.mild,
        test.scoring.cutoffs.moderate,
        test.scoring.cutoffs.severe
    );

    println!("\nQuestions:");
    for (i, question) in test.questions.iter().enumerate() {
        let mut line = format!(
            "  {:2}. [{}] {} ({} pt)",
            i + 1,
            question.kind,
            question.prompt,
            question.points
        );
        if let Some(limit) = question.time_limit_secs {
            line.push_str(&format!(" [{limit}s limit]"));
        }
        println!("{line}");
        if !question.options.is_empty() {
            println!("      options: {}", question.options.join(", "));
        }
    }

    println!("\nInterpretations:");
    for severity in Severity::ALL {
        let interp = test.interpretations.for_severity(severity);
        println!("  {}: {}", severity, interp.text);
    }

    Ok(())
}
