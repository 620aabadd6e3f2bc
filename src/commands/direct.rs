//! Direct-mode streaming.
//!
//! Two loops share one snapshot channel: the producer task recomputes the
//! color map and publishes it whole, the push loop sends the latest
//! published map to the keyboard at a fixed pace.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gmk67_driver::frames;
use gmk67_keyboard::{snapshot, Gmk67Keyboard, SnapshotReader};
use tracing::{info, warn};

use super::{color_map, setup_interrupt_handler, Context};
use crate::cli::ColorArgs;

/// Stream frames until Ctrl+C
pub fn stream(
    ctx: &Context,
    args: &ColorArgs,
    interval_ms: Option<u64>,
    refresh_secs: Option<u64>,
) -> anyhow::Result<()> {
    let kb = ctx.open_keyboard()?;
    let frame_interval = ctx.config.frame_interval(interval_ms);
    let refresh = ctx.config.color_refresh(refresh_secs);
    let running = setup_interrupt_handler();

    let layout = kb.layout();
    let animated = args.color.is_none();
    let (publisher, reader) = snapshot::channel(color_map(layout, args));

    println!(
        "Streaming direct mode every {} ms (Ctrl+C to stop)",
        frame_interval.as_millis()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        if animated {
            let running = Arc::clone(&running);
            let rainbow = args.rainbow;
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(refresh);
                let mut hue = 0.0f32;
                // First tick fires immediately; the seed frame is already published
                ticker.tick().await;
                while running.load(Ordering::SeqCst) {
                    ticker.tick().await;
                    let colors = if rainbow {
                        hue = (hue + 30.0) % 360.0;
                        frames::rainbow_rows(layout, hue)
                    } else {
                        frames::random_rows(layout, &mut rand::thread_rng())
                    };
                    publisher.publish(colors);
                }
            });
        }

        let running = Arc::clone(&running);
        tokio::task::spawn_blocking(move || push_loop(kb, reader, frame_interval, &running)).await?
    })
}

/// Blocking loop: one `send_direct` per interval with the latest snapshot
fn push_loop(
    kb: Gmk67Keyboard,
    reader: SnapshotReader,
    frame_interval: Duration,
    running: &AtomicBool,
) -> anyhow::Result<()> {
    let mut frames_sent: u64 = 0;
    while running.load(Ordering::SeqCst) {
        let colors = reader.latest();
        if let Err(e) = kb.send_direct(&colors) {
            warn!("Direct frame failed after {} frames: {}", frames_sent, e);
            return Err(e.into());
        }
        frames_sent += 1;
        std::thread::sleep(frame_interval);
    }

    info!("Stopped after {} frames", frames_sent);
    Ok(())
}
