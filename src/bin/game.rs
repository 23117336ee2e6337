use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use spaceship_game::app::App;
use spaceship_game::config::GameConfig;
use spaceship_game::{build_info, preflight};

/// Dodge the meteors for as long as you can
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration profile to load (falls back to APP_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,

    /// Fixed seed for meteor placement
    #[arg(long)]
    seed: Option<u64>,

    /// Run the preflight checks and exit with their status
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(version = %build_info::version_string(), "Spaceship Game");

    let mut config = match &cli.profile {
        Some(profile) => GameConfig::load(profile),
        None => GameConfig::load_from_env(),
    }
    .context("Failed to load configuration")?;

    if let Some(seed) = cli.seed {
        config.gameplay.seed = Some(seed);
    }

    if cli.check {
        let report = preflight::run_all(&config);
        preflight::print_report(&report);
        return Ok(ExitCode::from(report.exit_code()));
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated with an error")?;

    match app.take_fatal() {
        Some(e) => Err(e),
        None => Ok(ExitCode::SUCCESS),
    }
}
