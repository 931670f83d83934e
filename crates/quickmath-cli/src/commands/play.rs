//! The `quickmath play` command.
//!
//! Runs the session on a single-threaded event loop: timer ticks and stdin
//! lines are the only events, and each is handed to the session as soon as
//! it arrives.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::time::MissedTickBehavior;

use quickmath_core::rng::QuizRng;
use quickmath_core::scoring::RoundResult;
use quickmath_core::timer::TickOutcome;
use quickmath_core::traits::Presenter;
use quickmath_core::GameSession;

use crate::commands::open_store;
use crate::presenter::TerminalPresenter;

/// Flags for `quickmath play`.
pub struct PlayOptions {
    pub questions: Option<u32>,
    pub seed: Option<u64>,
    pub no_countdown: bool,
    pub output: Option<PathBuf>,
    pub scores: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub async fn execute(options: PlayOptions) -> Result<()> {
    anyhow::ensure!(
        options.questions != Some(0),
        "--questions must be at least 1"
    );

    let (config, store) = open_store(options.config, options.scores)?;
    let countdown_secs = if options.no_countdown {
        0
    } else {
        config.countdown_secs
    };

    let mut session = GameSession::new(
        config.session_config(),
        QuizRng::new(options.seed),
        Arc::new(store),
        TerminalPresenter::default(),
    );
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let amount = match options.questions {
            Some(amount) => amount,
            None => match choose_tier(&mut session, &mut input).await? {
                Some(amount) => amount,
                None => return Ok(()),
            },
        };

        session.start(amount)?;
        countdown(countdown_secs).await;

        if !play_round(&mut session, &mut input).await? {
            println!("\nRound abandoned.");
            return Ok(());
        }

        // The reveal is a one-shot delay; nothing cancels it once queued.
        tokio::time::sleep(session.config().reveal_delay).await;
        if let Some(result) = session.reveal_results() {
            if let Some(path) = &options.output {
                save_result(&result, path)?;
            }
        }

        println!("\nPlay again? [y/N]");
        match input.next_line().await? {
            Some(answer) if is_yes(&answer) => session.reset(),
            _ => return Ok(()),
        }
    }
}

/// Prompt until a configured tier is chosen. `None` when input ends.
async fn choose_tier<P, R>(
    session: &mut GameSession<P>,
    input: &mut Lines<R>,
) -> Result<Option<u32>>
where
    P: Presenter,
    R: AsyncBufRead + Unpin,
{
    let tiers = session.config().tiers.clone();
    let listing = tiers
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" / ");

    loop {
        println!("\nHow many questions? {listing}");
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        let choice = line.trim().parse::<u32>().ok().filter(|n| tiers.contains(n));
        if let Ok(amount) = session.select_tier(choice) {
            return Ok(Some(amount));
        }
    }
}

async fn countdown(secs: u32) {
    if secs == 0 {
        return;
    }
    for n in (1..=secs).rev() {
        println!("{n}");
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    println!("GO!");
}

/// Drive one round until every question is answered (`true`) or input ends
/// first (`false`).
async fn play_round<P, R>(session: &mut GameSession<P>, input: &mut Lines<R>) -> Result<bool>
where
    P: Presenter,
    R: AsyncBufRead + Unpin,
{
    let mut ticker = tokio::time::interval(session.config().tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if session.tick() == TickOutcome::Stopped {
                    return Ok(true);
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    tracing::warn!(
                        answered = session.round().answered(),
                        questions = session.round().question_amount,
                        "input closed before the round finished"
                    );
                    return Ok(false);
                };
                session.interact();
                match parse_guess(&line) {
                    Some(guess) => {
                        if session.submit_guess(guess)?.round_complete {
                            return Ok(true);
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("Answer t (true) or f (false)."),
                }
            }
        }
    }
}

/// Read an answer: the player's claim that the equation is true or false.
fn parse_guess(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "r" | "right" | "1" => Some(true),
        "f" | "false" | "n" | "no" | "w" | "wrong" | "0" => Some(false),
        _ => None,
    }
}

fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

fn save_result(result: &RoundResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("failed to serialize results")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write results to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved round results");
    Ok(())
}
