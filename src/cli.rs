// CLI definitions using clap

use clap::{Args, Parser, Subcommand};
use gmk67_keyboard::{LightingMode, RgbColor};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gmk67")]
#[command(author, version, about = "GMK67 RGB lighting control")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable transport monitoring (prints all reports sent/received)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show raw hex dump alongside monitor output
    #[arg(long, global = true)]
    pub hex: bool,

    /// Monitor filter (all, commands, data, cmd=0xNN)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// USB vendor ID override (hex, e.g. 258a)
    #[arg(long, global = true, value_parser = parse_hex_u16)]
    pub vid: Option<u16>,

    /// USB product ID override (hex, e.g. 010c)
    #[arg(long, global = true, value_parser = parse_hex_u16)]
    pub pid: Option<u16>,

    /// Driver config file (default: $XDG_CONFIG_HOME/gmk67/driver.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging for the protocol crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List connected GMK67 keyboards
    #[command(visible_alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Switch to a built-in lighting effect
    #[command(visible_alias = "m")]
    Mode {
        /// Mode name or number (e.g. 'breath', 'spectrum', 7)
        mode: LightingMode,

        /// Brightness 0-5 (default: 5)
        #[arg(short, long)]
        brightness: Option<u8>,

        /// Animation speed 0-5 (default: 0)
        #[arg(short, long)]
        speed: Option<u8>,
    },

    /// Cycle through every lighting mode interactively
    Modes,

    /// Turn all lighting off
    Off,

    /// Stream live colors in direct mode until Ctrl+C
    #[command(visible_alias = "d")]
    Direct {
        #[command(flatten)]
        colors: ColorArgs,

        /// Frame interval in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Seconds between random color changes (overrides config)
        #[arg(long)]
        refresh_secs: Option<u64>,
    },

    /// Store a per-key color program on the keyboard
    #[command(visible_alias = "c")]
    Custom {
        #[command(flatten)]
        colors: ColorArgs,
    },
}

/// Color source for per-key commands. Default: random color per row.
#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
pub struct ColorArgs {
    /// One color for every key (RRGGBB)
    #[arg(long)]
    pub color: Option<RgbColor>,

    /// Rows spread across the hue circle
    #[arg(long)]
    pub rainbow: bool,

    /// Random color per row (the default)
    #[arg(long)]
    pub random: bool,
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let hex = s.strip_prefix("0x").unwrap_or(s);
    u16::from_str_radix(hex, 16).map_err(|e| format!("invalid hex id '{s}': {e}"))
}
