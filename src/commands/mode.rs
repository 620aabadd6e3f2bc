//! Built-in effect commands: mode, modes, off.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use gmk67_keyboard::{EffectParams, LightingMode};
use tracing::info;

use super::{setup_interrupt_handler, Context};

const PROMPT_POLL: Duration = Duration::from_millis(100);

/// Switch to one built-in effect
pub fn set_mode(
    ctx: &Context,
    mode: LightingMode,
    brightness: Option<u8>,
    speed: Option<u8>,
) -> anyhow::Result<()> {
    let mut params = EffectParams::preset(mode);
    if let Some(brightness) = brightness {
        params = params.with_brightness(brightness);
    }
    if let Some(speed) = speed {
        params = params.with_speed(speed);
    }

    let kb = ctx.open_keyboard()?;
    kb.apply_effect(params)?;
    println!(
        "Lighting mode set to {} (0x{:02X}), brightness {}, speed {}",
        mode,
        mode.as_u8(),
        params.brightness,
        params.speed
    );
    Ok(())
}

/// Turn the lights off
pub fn off(ctx: &Context) -> anyhow::Result<()> {
    set_mode(ctx, LightingMode::LightsOff, None, None)
}

/// Reply to the demo prompt
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Next,
    Repeat,
    Stop,
}

/// Walk through every mode; each is re-applied until the user answers N
pub fn demo_modes(ctx: &Context) -> anyhow::Result<()> {
    let kb = ctx.open_keyboard()?;
    let running = setup_interrupt_handler();
    let lines = spawn_line_reader();

    'modes: for mode in LightingMode::ALL {
        loop {
            if !running.load(Ordering::SeqCst) {
                break 'modes;
            }
            println!("Displaying lighting mode: {}", mode);
            kb.update_mode(mode)?;
            std::thread::sleep(Duration::from_millis(500));

            println!("Press N and Enter to continue (Ctrl+C to stop)");
            io::stdout().flush()?;
            match wait_for_answer(&lines, &running) {
                Answer::Next => break,
                Answer::Repeat => {}
                Answer::Stop => break 'modes,
            }
        }
    }

    info!("Mode demo finished");
    Ok(())
}

/// Read stdin lines on a detached thread; the channel closes at EOF
fn spawn_line_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Block until a line arrives, stdin closes or Ctrl+C clears `running`
fn wait_for_answer(lines: &Receiver<String>, running: &AtomicBool) -> Answer {
    loop {
        if !running.load(Ordering::SeqCst) {
            return Answer::Stop;
        }
        match lines.recv_timeout(PROMPT_POLL) {
            Ok(line) if line.contains('N') => return Answer::Next,
            Ok(_) => return Answer::Repeat,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Answer::Stop,
        }
    }
}
