//! Packet encoding
//!
//! Every protocol packet is a zero-filled frame of
//! [`PACKET_DATA_LENGTH`] bytes with a handful of protocol-defined offsets
//! set. [`encode`] is the generic primitive over sparse `(offset, value)`
//! pairs; [`Command`] names each packet the sequencer sends and knows its
//! field offsets.

use gmk67_transport::protocol::{
    cmd, stream, EFFECT_PAGE_CHECK_CODE_H, EFFECT_PAGE_CHECK_CODE_L, LED_SPECIAL_EFFECT_PACKETS,
    PACKET_DATA_LENGTH, PACKET_HEADER,
};

use crate::error::KeyboardError;
use crate::led::{LightingMode, MAX_BRIGHTNESS, MAX_SPEED, MIN_SPEED};

/// One fixed-size frame, without report ID
pub type Packet = [u8; PACKET_DATA_LENGTH];

/// Field offsets within a packet
pub mod offset {
    /// Header byte (command packets) or mode byte (effect pages)
    pub const HEADER: usize = 0x00;
    /// Command byte (command packets) or mode option (effect pages)
    pub const COMMAND: usize = 0x01;
    /// Packet count / stream kind / random-color flag
    pub const ARG: usize = 0x08;
    pub const BRIGHTNESS: usize = 0x09;
    pub const SPEED: usize = 0x10;
    pub const EXTRA: usize = 0x11;
    pub const CHECK_CODE_L: usize = 0x14;
    pub const CHECK_CODE_H: usize = 0x15;
}

/// Build a zero-filled packet from sparse `(offset, value)` pairs.
///
/// Later pairs overwrite earlier ones at the same offset. An offset outside
/// the frame is a protocol violation.
pub fn encode(fields: &[(usize, u8)]) -> Result<Packet, KeyboardError> {
    let mut packet = [0u8; PACKET_DATA_LENGTH];
    for &(at, value) in fields {
        let slot = packet.get_mut(at).ok_or_else(|| {
            KeyboardError::ProtocolViolation(format!(
                "offset 0x{at:02X} outside {PACKET_DATA_LENGTH}-byte packet"
            ))
        })?;
        *slot = value;
    }
    Ok(packet)
}

/// Parameters of one effect page.
///
/// Pages always request random colors: per-mode color selection is not
/// wired up yet and `random_colors` is the extension point for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectParams {
    /// Mode byte at 0x00
    pub mode: LightingMode,
    /// Mode option at 0x01
    pub option: u8,
    /// Random-color flag at 0x08
    pub random_colors: bool,
    /// 0x09
    pub brightness: u8,
    /// 0x10
    pub speed: u8,
    /// 0x11
    pub extra: u8,
}

impl EffectParams {
    /// Page selecting a built-in effect at full brightness, slowest speed
    pub fn preset(mode: LightingMode) -> Self {
        Self {
            mode,
            option: 0x00,
            random_colors: true,
            brightness: MAX_BRIGHTNESS,
            speed: MIN_SPEED,
            extra: 0x01,
        }
    }

    /// Idle page that keeps a stored custom program from being
    /// overridden by a residual animation
    pub fn lights_off() -> Self {
        Self {
            mode: LightingMode::LightsOff,
            option: 0xFF,
            random_colors: true,
            brightness: MAX_BRIGHTNESS,
            speed: MIN_SPEED,
            extra: 0x00,
        }
    }

    /// Set brightness (clamped to [`MAX_BRIGHTNESS`])
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self
    }

    /// Set speed (clamped to [`MAX_SPEED`])
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed.min(MAX_SPEED);
        self
    }
}

/// Every packet the sequencer sends, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start running the stored effect
    EffectStart,
    /// Announce the effect-page write that follows
    WriteEffectArea,
    /// Enter or leave customization
    Customization(bool),
    /// Close the exchange
    CommunicationEnd,
    /// Header of a direct (live) color stream
    DirectStream,
    /// Header of a custom (stored) color program
    CustomStream,
    /// Effect-page parameters
    EffectPage(EffectParams),
}

impl Command {
    /// Sparse fields of this packet
    pub fn fields(&self) -> Vec<(usize, u8)> {
        use offset::*;
        match *self {
            Self::EffectStart => vec![(HEADER, PACKET_HEADER), (COMMAND, cmd::LED_EFFECT_START)],
            Self::WriteEffectArea => vec![
                (HEADER, PACKET_HEADER),
                (COMMAND, cmd::WRITE_LED_SPECIAL_EFFECT_AREA),
                (ARG, LED_SPECIAL_EFFECT_PACKETS),
            ],
            Self::Customization(on) => {
                let code = if on {
                    cmd::TURN_ON_CUSTOMIZATION
                } else {
                    cmd::TURN_OFF_CUSTOMIZATION
                };
                vec![(HEADER, PACKET_HEADER), (COMMAND, code)]
            }
            Self::CommunicationEnd => {
                vec![(HEADER, PACKET_HEADER), (COMMAND, cmd::COMMUNICATION_END)]
            }
            Self::DirectStream => vec![
                (HEADER, PACKET_HEADER),
                (COMMAND, LightingMode::Direct.as_u8()),
                (ARG, stream::DIRECT_FRAME),
            ],
            Self::CustomStream => vec![
                (HEADER, PACKET_HEADER),
                (COMMAND, LightingMode::Custom.as_u8()),
                (ARG, stream::CUSTOM_PROGRAM),
            ],
            Self::EffectPage(p) => {
                let mut fields = vec![
                    (HEADER, p.mode.as_u8()),
                    (ARG, u8::from(p.random_colors)),
                    (BRIGHTNESS, p.brightness),
                    (SPEED, p.speed),
                    (CHECK_CODE_L, EFFECT_PAGE_CHECK_CODE_L),
                    (CHECK_CODE_H, EFFECT_PAGE_CHECK_CODE_H),
                ];
                if p.option != 0 {
                    fields.push((COMMAND, p.option));
                }
                if p.extra != 0 {
                    fields.push((EXTRA, p.extra));
                }
                fields
            }
        }
    }

    /// Encode to a full packet
    pub fn encode(&self) -> Packet {
        // Offsets above are constants well inside the frame
        let mut packet = [0u8; PACKET_DATA_LENGTH];
        for (at, value) in self.fields() {
            packet[at] = value;
        }
        packet
    }

    /// Whether the device answers this packet with an acknowledgment
    /// the sequencer must read before sending the next one
    pub fn expects_ack(&self) -> bool {
        !matches!(
            self,
            Self::EffectStart | Self::DirectStream | Self::CustomStream
        )
    }
}
