#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Ghost Catcher from a terminal or a script.

mod ads;
mod board;
mod config;
mod intent;
mod shell;

use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use ghost_catcher_session::Session;
use ghost_catcher_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{ads::MockAdService, config::ShellConfig, shell::Shell};

/// Command-line arguments for the Ghost Catcher shell.
#[derive(Debug, Parser)]
#[command(name = "ghost-catcher", about = "Herd the ghost into a pot, one talisman at a time.")]
struct CliArgs {
    /// Session seed; levels are drawn from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file with `[game]` and `[ads]` tables.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Read intents from a file instead of standard input.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
    /// Print only the status line after each intent.
    #[arg(long)]
    quiet_board: bool,
}

/// Entry point for the Ghost Catcher command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };

    let session = Session::new(config.game.clone(), args.seed);
    println!("{}", query::welcome_banner(session.world()));
    info!(seed = session.seed(), "session ready");

    let mut shell = Shell::new(session, MockAdService::default(), config.ads, !args.quiet_board);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            shell.run(BufReader::new(file), &mut out)?;
        }
        None => shell.run(io::stdin().lock(), &mut out)?,
    }

    let session = shell.session();
    info!(
        state = ?session.state(),
        level = session.level_number(),
        score = session.score(),
        ads_shown = shell.ads().shown(),
        ads_loaded = shell.ads().loads(),
        "session finished"
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
