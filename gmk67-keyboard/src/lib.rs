//! Lighting protocol for the GMK67 keyboard
//!
//! This crate builds the fixed-size packets of the GMK67 lighting protocol
//! and runs the handshakes that switch lighting modes, on top of any
//! [`Transport`].
//!
//! Every public operation of [`Gmk67Keyboard`] is a complete sequence:
//! each send is followed by its blocking acknowledgment read before the next
//! packet goes out. A sequence that fails half way is not resumed; device
//! state after a partial handshake is undefined and the caller must restart
//! the whole operation.

pub mod colors;
pub mod error;
pub mod layout;
pub mod led;
pub mod packet;
pub mod snapshot;

pub use colors::{encode_colors, partition, ColorMap};
pub use error::KeyboardError;
pub use layout::{Layout, Position, GMK67};
pub use led::{LightingMode, RgbColor};
pub use packet::{Command, EffectParams, Packet};
pub use snapshot::{SnapshotPublisher, SnapshotReader};

use std::sync::Arc;

use gmk67_transport::protocol::{device, PACKET_DATA_LENGTH};
use gmk67_transport::{HidDiscovery, PrinterConfig, ReportChannel, Transport, TransportDeviceInfo};
use tracing::{debug, info};

/// High-level lighting interface over a feature-report transport
///
/// Holds no session state: the device keeps its own mode between calls.
/// Only one request may be in flight per device; share a keyboard across
/// threads only behind the caller's own lock.
pub struct Gmk67Keyboard {
    channel: ReportChannel,
    layout: &'static Layout,
}

impl Gmk67Keyboard {
    /// Create a keyboard interface on an already-open transport
    pub fn new(transport: Arc<dyn Transport>, layout: &'static Layout) -> Self {
        Self {
            channel: ReportChannel::new(transport),
            layout,
        }
    }

    /// Open the first device matching `vid`/`pid`
    pub fn open(vid: u16, pid: u16) -> Result<Self, KeyboardError> {
        Self::open_with(HidDiscovery::new(), vid, pid)
    }

    /// Open with transport monitoring enabled
    pub fn open_monitored(vid: u16, pid: u16, config: PrinterConfig) -> Result<Self, KeyboardError> {
        Self::open_with(HidDiscovery::with_printer_config(config), vid, pid)
    }

    /// Open the stock GMK67
    pub fn open_default() -> Result<Self, KeyboardError> {
        Self::open(device::VENDOR_ID, device::PRODUCT_ID)
    }

    fn open_with(discovery: HidDiscovery, vid: u16, pid: u16) -> Result<Self, KeyboardError> {
        let transport = discovery.open(vid, pid)?;
        Ok(Self::new(transport, &GMK67))
    }

    /// Get device info
    pub fn device_info(&self) -> &TransportDeviceInfo {
        self.channel.device_info()
    }

    /// Layout used to encode color maps
    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    // === Packet exchange ===

    fn send(&self, data: &[u8]) -> Result<(), KeyboardError> {
        self.channel.send(data)?;
        Ok(())
    }

    fn read(&self) -> Result<(), KeyboardError> {
        // Acknowledgment content only paces the handshake
        self.channel.read()?;
        Ok(())
    }

    /// Send one command packet, then read its acknowledgment if it has one
    fn exchange(&self, command: Command) -> Result<(), KeyboardError> {
        debug!("-> {:?}", command);
        self.send(&command.encode())?;
        if command.expects_ack() {
            self.read()?;
        }
        Ok(())
    }

    /// Send a packet built from raw `(offset, value)` pairs, no read
    pub fn send_packet(&self, fields: &[(usize, u8)]) -> Result<(), KeyboardError> {
        let packet = packet::encode(fields)?;
        self.send(&packet)
    }

    // === Handshake steps ===

    /// Start running the stored effect. No acknowledgment.
    pub fn start_effect_command(&self) -> Result<(), KeyboardError> {
        self.exchange(Command::EffectStart)
    }

    /// Announce an effect-page write
    pub fn start_effect_page(&self) -> Result<(), KeyboardError> {
        self.exchange(Command::WriteEffectArea)
    }

    /// Enter or leave customization
    pub fn set_customization(&self, on: bool) -> Result<(), KeyboardError> {
        self.exchange(Command::Customization(on))
    }

    /// Close the exchange
    pub fn end_communication(&self) -> Result<(), KeyboardError> {
        self.exchange(Command::CommunicationEnd)
    }

    /// Write one effect page (page packet + acknowledgment)
    pub fn write_effect_page(&self, params: EffectParams) -> Result<(), KeyboardError> {
        self.exchange(Command::EffectPage(params))
    }

    /// Stream a full color buffer as raw frames (no header, no read)
    pub fn send_leds(&self, colors: &ColorMap) -> Result<(), KeyboardError> {
        let buffer = encode_colors(self.layout, colors)?;
        self.stream_frames(&buffer)
    }

    fn stream_frames(&self, buffer: &[u8]) -> Result<(), KeyboardError> {
        let frames = partition(buffer, PACKET_DATA_LENGTH)?;
        debug!("Streaming {} color frame(s)", frames.len());
        for frame in frames {
            self.send(frame)?;
        }
        Ok(())
    }

    /// Encode `colors` into a frame-aligned buffer before any packet goes out
    fn color_buffer(&self, colors: &ColorMap) -> Result<Vec<u8>, KeyboardError> {
        let buffer = encode_colors(self.layout, colors)?;
        partition(&buffer, PACKET_DATA_LENGTH)?;
        Ok(buffer)
    }

    // === Lighting modes ===

    /// Switch to a built-in effect
    pub fn update_mode(&self, mode: LightingMode) -> Result<(), KeyboardError> {
        self.apply_effect(EffectParams::preset(mode))
    }

    /// Program an effect page and start it
    pub fn apply_effect(&self, params: EffectParams) -> Result<(), KeyboardError> {
        info!("Setting lighting mode: {}", params.mode);
        self.set_customization(true)?;
        self.start_effect_page()?;
        self.write_effect_page(params)?;
        self.end_communication()?;
        self.start_effect_command()
    }

    /// Show one live frame. Nothing is stored on the device; call
    /// repeatedly (a few times per second) to animate.
    ///
    /// A color map that does not fit the layout is rejected before the
    /// handshake starts.
    pub fn send_direct(&self, colors: &ColorMap) -> Result<(), KeyboardError> {
        let buffer = self.color_buffer(colors)?;
        self.exchange(Command::DirectStream)?;
        self.stream_frames(&buffer)?;
        self.read()?;
        self.end_communication()
    }

    /// Store a per-key color program on the device.
    ///
    /// The trailing lights-off page replaces the idle effect so no residual
    /// animation overrides the program; the order of the steps matters.
    pub fn send_custom(&self, colors: &ColorMap) -> Result<(), KeyboardError> {
        let buffer = self.color_buffer(colors)?;
        info!("Writing custom color program ({} entries)", colors.len());
        self.set_customization(true)?;
        self.exchange(Command::CustomStream)?;
        self.stream_frames(&buffer)?;
        self.read()?;
        self.end_communication()?;
        self.start_effect_command()?;

        self.set_customization(true)?;
        self.start_effect_page()?;
        self.write_effect_page(EffectParams::lights_off())?;
        self.end_communication()?;
        self.start_effect_command()
    }
}

impl Drop for Gmk67Keyboard {
    fn drop(&mut self) {
        if let Err(e) = self.channel.close() {
            debug!("Error closing transport: {}", e);
        }
    }
}
