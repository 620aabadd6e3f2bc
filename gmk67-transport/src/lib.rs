//! Transport layer for GMK67 keyboard lighting control
//!
//! The keyboard is driven entirely through HID feature reports: every
//! request is one fixed-size report written to the device, every
//! acknowledgment one report read back. This crate provides:
//!
//! - the raw [`Transport`] contract and its hidapi backend
//! - device discovery and open by VID/PID
//! - [`ReportChannel`], which owns report-ID injection and frame sizing
//! - [`PrinterTransport`], a monitoring middleware

pub mod error;
pub mod printer;
pub mod protocol;
pub mod types;

mod channel;
mod discovery;
mod hid_wired;

pub use channel::ReportChannel;
pub use discovery::HidDiscovery;
pub use error::TransportError;
pub use hid_wired::HidWiredTransport;
pub use printer::{PacketFilter, PrinterConfig, PrinterTransport};
pub use types::{DiscoveredDevice, TransportDeviceInfo};

/// The raw feature-report primitive every backend implements
///
/// Implementations move whole reports and nothing else; framing lives in
/// [`ReportChannel`].
pub trait Transport: Send + Sync {
    /// Write one feature report. `report[0]` is the report ID.
    fn send_feature_report(&self, report: &[u8]) -> Result<(), TransportError>;

    /// Read one feature report of up to `len` bytes (report ID included)
    fn get_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Close the transport gracefully
    fn close(&self) -> Result<(), TransportError>;
}

/// List all connected GMK67 devices
pub fn list_devices() -> Result<Vec<DiscoveredDevice>, TransportError> {
    HidDiscovery::new().list_devices()
}
