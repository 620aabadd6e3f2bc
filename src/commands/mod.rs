//! Command handlers for the CLI application.
//!
//! - `mode`: built-in effects (mode, modes demo, off)
//! - `direct`: live direct-mode streaming
//! - `custom`: stored per-key color programs
//! - `utility`: device listing

pub mod custom;
pub mod direct;
pub mod mode;
pub mod utility;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context as _};
use gmk67_driver::frames;
use gmk67_driver::DriverConfig;
use gmk67_keyboard::{ColorMap, Gmk67Keyboard, Layout};
use gmk67_transport::{PacketFilter, PrinterConfig};
use tracing::debug;

use crate::cli::{Cli, ColorArgs};

/// Settings shared by every command
pub struct Context {
    pub config: DriverConfig,
    pub printer: Option<PrinterConfig>,
}

impl Context {
    /// Merge config file and command-line flags
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config =
            DriverConfig::load_or_default(cli.config.as_deref()).map_err(|e| anyhow!(e))?;
        if let Some(vid) = cli.vid {
            config.vid = vid;
        }
        if let Some(pid) = cli.pid {
            config.pid = pid;
        }
        debug!("Driver config: {:?}", config);

        Ok(Self {
            config,
            printer: create_printer_config(cli.monitor, cli.hex, cli.filter.as_deref())?,
        })
    }

    /// Open the configured keyboard
    pub fn open_keyboard(&self) -> anyhow::Result<Gmk67Keyboard> {
        let (vid, pid) = (self.config.vid, self.config.pid);
        let opened = match &self.printer {
            Some(printer) => Gmk67Keyboard::open_monitored(vid, pid, printer.clone()),
            None => Gmk67Keyboard::open(vid, pid),
        };
        match opened {
            Ok(kb) => Ok(kb),
            Err(e) if e.is_not_found() => {
                Err(e).with_context(|| format!("No device found ({vid:04x}:{pid:04x})"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Create printer config from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    filter: Option<&str>,
) -> anyhow::Result<Option<PrinterConfig>> {
    if !monitor {
        return Ok(None);
    }
    let filter = match filter {
        Some(f) => f.parse::<PacketFilter>().map_err(|e| anyhow!(e))?,
        None => PacketFilter::All,
    };
    Ok(Some(
        PrinterConfig::default().with_hex(hex).with_filter(filter),
    ))
}

/// Build the color map selected on the command line
pub fn color_map(layout: &Layout, args: &ColorArgs) -> ColorMap {
    if let Some(color) = args.color {
        gmk67_keyboard::colors::solid(layout, color)
    } else if args.rainbow {
        frames::rainbow_rows(layout, 0.0)
    } else {
        frames::random_rows(layout, &mut rand::thread_rng())
    }
}

/// Setup Ctrl+C handler and return the running flag
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}
