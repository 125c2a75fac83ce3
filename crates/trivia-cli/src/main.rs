//! trivia CLI — play the adaptive quiz in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Adaptive trivia quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play quizzes until you stop
    Play {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Name to record scores under
        #[arg(long)]
        username: Option<String>,

        /// Base URL of the question service
        #[arg(long)]
        base_url: Option<String>,

        /// Questions per quiz
        #[arg(long)]
        questions: Option<u32>,

        /// Questions fetched per difficulty tier
        #[arg(long)]
        amount: Option<u32>,

        /// Open Trivia DB category id
        #[arg(long)]
        category: Option<u32>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trivia=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            config,
            username,
            base_url,
            questions,
            amount,
            category,
        } => {
            commands::play::execute(commands::play::PlayArgs {
                config,
                username,
                base_url,
                questions,
                amount,
                category,
            })
            .await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
