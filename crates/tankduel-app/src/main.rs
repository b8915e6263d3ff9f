use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tankduel_app::config::AppConfig;
use tankduel_app::game_loop;

#[derive(Parser, Debug)]
#[command(name = "tankduel", about = "Two-player top-down tank duel")]
struct Args {
    /// JSON config file. Defaults are used for anything it leaves out.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks, overriding the config.
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Pace ticks against the wall clock.
    #[arg(long)]
    realtime: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_filter: String,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    print_snapshot: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_filter))?,
        )
        .init();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.max_ticks = Some(ticks);
    }
    config.realtime |= args.realtime;
    config.validate()?;

    info!(seed = config.sim.seed, "starting match");
    let handle = game_loop::spawn_game_loop(config)?;
    let report = handle.join()?;

    match report.snapshot.winner {
        Some(player) => info!(winner = player.label(), ticks = report.ticks, "match finished"),
        None if report.snapshot.game_over => info!(ticks = report.ticks, "match drawn"),
        None => info!(ticks = report.ticks, "match stopped"),
    }

    if args.print_snapshot {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
