//! Crossway - terminal front-end
//!
//! Hot-seat play and move-list replay on top of the rule engine.

#![warn(missing_docs)]

use anyhow::{Result, bail};
use clap::Parser;
use crossway::cli::{Cli, Command};
use crossway::{
    ConsolePlayer, MatchConfig, Orchestrator, Renderer, load_script, render_board, render_status,
    replay, shared_input,
};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config } => run_play(config).await,
        Command::Replay { file, json } => run_replay(file, json).await,
    }
}

/// Run a hot-seat match on stdin/stdout
#[instrument]
async fn run_play(config: Option<PathBuf>) -> Result<()> {
    let config = MatchConfig::load(config.as_deref())?;
    info!(?config, "Starting console match");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(Renderer::new(std::io::stdout()).run(event_rx));

    let input = shared_input(tokio::io::stdin());
    let first = ConsolePlayer::new(config.first_player(), input.clone(), event_tx.clone())
        .with_pie_rule(*config.pie_rule())
        .with_legal_moves(*config.show_legal_moves());
    let second = ConsolePlayer::new(config.second_player(), input, event_tx.clone())
        .with_pie_rule(*config.pie_rule())
        .with_legal_moves(*config.show_legal_moves());

    let mut orchestrator = Orchestrator::new(Box::new(first), Box::new(second), event_tx);
    let result = orchestrator.run().await;

    // Dropping the orchestrator closes the channel so the renderer can finish.
    drop(orchestrator);
    renderer.await??;

    let winner = result?;
    info!(?winner, "Console match finished");
    Ok(())
}

/// Replay a move list and print the outcome
#[instrument]
async fn run_replay(file: PathBuf, json: bool) -> Result<()> {
    let script = load_script(&file)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(async move {
        if json {
            // Only the final JSON goes to stdout.
            let mut event_rx = event_rx;
            while event_rx.recv().await.is_some() {}
            Ok::<(), std::io::Error>(())
        } else {
            Renderer::new(std::io::stdout())
                .without_boards()
                .run(event_rx)
                .await
                .map(drop)
        }
    });

    let outcome = replay(script, event_tx).await?;
    renderer.await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.game)?);
    } else {
        print!("{}", render_board(outcome.game.board(), None));
        println!("{}", render_status(&outcome.game));
    }

    if let Some(rejected) = outcome.rejected {
        bail!(rejected);
    }
    Ok(())
}
