//! GMK67 Lighting CLI
//!
//! A command-line interface for controlling GMK67 keyboard lighting.

use clap::Parser;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "gmk67_driver=debug,gmk67_keyboard=debug,gmk67_transport=debug"
    } else {
        "gmk67_driver=info,gmk67_keyboard=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context::from_cli(&cli)?;

    match cli.command {
        Commands::List { json } => commands::utility::list(&ctx, json),
        Commands::Mode {
            mode,
            brightness,
            speed,
        } => commands::mode::set_mode(&ctx, mode, brightness, speed),
        Commands::Modes => commands::mode::demo_modes(&ctx),
        Commands::Off => commands::mode::off(&ctx),
        Commands::Direct {
            colors,
            interval_ms,
            refresh_secs,
        } => commands::direct::stream(&ctx, &colors, interval_ms, refresh_secs),
        Commands::Custom { colors } => commands::custom::program(&ctx, &colors),
    }
}
