//! quickmath CLI: play the quiz and manage best scores from a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod presenter;

#[derive(Parser)]
#[command(name = "quickmath", version, about = "Timed true/false times-table quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one or more rounds
    Play {
        /// Number of questions (prompts for a tier if omitted)
        #[arg(long)]
        questions: Option<u32>,

        /// Seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the 3, 2, 1, GO! countdown
        #[arg(long)]
        no_countdown: bool,

        /// Write each round's results to this JSON file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Best-scores file (overrides config)
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show best scores
    Scores {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Best-scores file (overrides config)
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Clear every best score back to the placeholder
    ResetScores {
        /// Best-scores file (overrides config)
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a generated round of equations
    Generate {
        /// Number of equations
        #[arg(long)]
        questions: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Show whether each equation is true
        #[arg(long)]
        answers: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quickmath=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            questions,
            seed,
            no_countdown,
            output,
            scores,
            config,
        } => {
            commands::play::execute(commands::play::PlayOptions {
                questions,
                seed,
                no_countdown,
                output,
                scores,
                config,
            })
            .await
        }
        Commands::Scores {
            json,
            scores,
            config,
        } => commands::scores::execute(json, scores, config),
        Commands::ResetScores { scores, config } => commands::reset_scores::execute(scores, config),
        Commands::Generate {
            questions,
            seed,
            format,
            answers,
            config,
        } => commands::generate::execute(questions, seed, format, answers, config),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
