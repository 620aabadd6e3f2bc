//! Stored per-key color programs.

use super::{color_map, Context};
use crate::cli::ColorArgs;

/// Write a custom program built from the command-line color source
pub fn program(ctx: &Context, args: &ColorArgs) -> anyhow::Result<()> {
    let kb = ctx.open_keyboard()?;
    let colors = color_map(kb.layout(), args);
    kb.send_custom(&colors)?;
    println!(
        "Custom program written: {} keys on {}",
        colors.values().filter(|c| c.is_some()).count(),
        kb.layout().name()
    );
    Ok(())
}
