//! cogscreen CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "cogscreen", version, about = "Cognitive assessment screening toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog tests
    List {
        /// Filter by category (memory, attention, language, ...)
        #[arg(long)]
        category: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show one test's questions and scoring
    Show {
        /// Test id (e.g. "mmse")
        #[arg(long)]
        test: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate custom test definition TOML files
    Validate {
        /// Path to a test definition file or directory
        #[arg(long)]
        tests: PathBuf,
    },

    /// Take a test, answering from a JSON file, and store the result
    Take {
        /// Test id
        #[arg(long)]
        test: String,

        /// User id the result belongs to
        #[arg(long)]
        user: Option<String>,

        /// JSON file mapping question ids to answers
        #[arg(long)]
        answers: PathBuf,

        /// Attempt duration in minutes (defaults to elapsed time)
        #[arg(long)]
        duration: Option<f64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored results
    Results {
        /// Only results for this test id
        #[arg(long)]
        test: Option<String>,

        /// Only results for this user id
        #[arg(long)]
        user: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete one stored result
    Delete {
        /// Result id
        #[arg(long)]
        id: Uuid,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete all stored results
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export all results as a JSON document
    Export {
        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Import results from an export document, replacing the collection
    Import {
        /// Input file
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the dashboard summary
    Dashboard {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show performance statistics
    Stats {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example custom test
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cogscreen=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { category, config } => commands::list::execute(category, config),
        Commands::Show { test, config } => commands::show::execute(test, config),
        Commands::Validate { tests } => commands::validate::execute(tests),
        Commands::Take {
            test,
            user,
            answers,
            duration,
            config,
        } => commands::take::execute(test, user, answers, duration, config).await,
        Commands::Results { test, user, config } => {
            commands::results::execute(test, user, config).await
        }
        Commands::Delete { id, config } => commands::delete::execute(id, config).await,
        Commands::Clear { yes, config } => commands::clear::execute(yes, config).await,
        Commands::Export { output, config } => commands::export::execute(output, config).await,
        Commands::Import { input, config } => commands::import::execute(input, config).await,
        Commands::Dashboard { config } => commands::dashboard::execute(config).await,
        Commands::Stats { config } => commands::stats::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
