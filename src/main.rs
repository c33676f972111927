use std::io;

use anyhow::Result;
use arbiter_cli::{Session, SessionConfig};
use arbiter_core::GameResult;
use tracing::info;

/// Environment variable holding an optional starting position in FEN.
const FEN_VAR: &str = "ARBITER_FEN";

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("arbiter starting");

    let config = SessionConfig {
        starting_fen: std::env::var(FEN_VAR).ok(),
        ..SessionConfig::default()
    };
    let mut session = Session::new(config)?;

    let stdin = io::stdin();
    let result = session.run(stdin.lock(), io::stdout().lock())?;
    match result {
        Some(GameResult::Won(winner)) => info!(winner = winner.name(), "game finished"),
        Some(GameResult::Drawn) => info!("game drawn"),
        None => info!("game abandoned"),
    }
    Ok(())
}
