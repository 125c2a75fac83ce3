//! The `trivia play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use trivia_core::host::QuizHost;
use trivia_core::ledger::ScoreLedger;
use trivia_source::config::load_config_from;
use trivia_source::create_source;

use crate::terminal::TerminalPresentation;

/// Command-line overrides for `play`.
pub struct PlayArgs {
    pub config: Option<PathBuf>,
    pub username: Option<String>,
    pub base_url: Option<String>,
    pub questions: Option<u32>,
    pub amount: Option<u32>,
    pub category: Option<u32>,
}

pub async fn execute(args: PlayArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(username) = args.username {
        config.username = username;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(questions) = args.questions {
        config.max_questions = questions;
    }
    if let Some(amount) = args.amount {
        config.amount_per_tier = amount;
    }
    if args.category.is_some() {
        config.category = args.category;
    }
    config.validate()?;

    tracing::debug!(
        username = %config.username,
        base_url = %config.base_url,
        "starting play session"
    );
    let source = create_source(&config)?;
    let settings = config.host_settings();
    let mut host = QuizHost::new(TerminalPresentation::default(), config.username.clone());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    'session: loop {
        if host.load(&source, &settings).await.is_err() {
            if prompt_yes(&mut lines, "Try again? [y/N] ")? {
                continue;
            }
            break;
        }

        while host.is_running() {
            let count = host.presentation().choice_count();
            let Some(line) = prompt(&mut lines, &format!("Your answer (1-{count}): "))? else {
                println!("\nQuiz abandoned.");
                break 'session;
            };
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| host.presentation().choice(n))
                .map(str::to_string);
            match picked {
                Some(answer) => {
                    host.answer_selected(answer);
                    host.submit_requested()?;
                }
                None => println!("Please enter a number between 1 and {count}."),
            }
        }

        if !prompt_yes(&mut lines, "Play again? [y/N] ")? {
            break;
        }
    }

    print_history(host.ledger(), host.username());
    Ok(())
}

/// Print `message` and read one line; `None` on end of input.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

fn prompt_yes(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Result<bool> {
    let answer = prompt(lines, message)?;
    Ok(answer.is_some_and(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes")))
}

fn print_history(ledger: &ScoreLedger, username: &str) {
    let history = ledger.history(username);
    if history.is_empty() {
        println!("\nNo completed quizzes this session.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Score", "Percent", "Finished at"]);
    for (i, entry) in history.iter().enumerate() {
        let percent = if entry.total == 0 {
            0.0
        } else {
            entry.score as f64 / entry.total as f64 * 100.0
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.username),
            Cell::new(format!("{}/{}", entry.score, entry.total)),
            Cell::new(format!("{percent:.0}%")),
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        ]);
    }

    println!("\nScore history for {username}:");
    println!("{table}");
}
