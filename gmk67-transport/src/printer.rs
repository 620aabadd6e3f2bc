//! PrinterTransport middleware for monitoring/tracing transport operations
//!
//! This module provides a middleware that wraps any Transport implementation
//! and prints every feature report passing through it.
//!
//! # Example
//!
//! ```ignore
//! use gmk67_transport::{HidDiscovery, PrinterConfig, PrinterTransport};
//!
//! let transport = HidDiscovery::new().open(0x258A, 0x010C)?;
//! let monitored = PrinterTransport::wrap(transport, PrinterConfig::default());
//! // Now all reports will be printed
//! ```

use std::str::FromStr;
use std::sync::Arc;

use crossterm::style::Stylize;

use crate::protocol::{cmd, is_command_packet};
use crate::{Transport, TransportDeviceInfo, TransportError};

/// Packet filter for selective display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PacketFilter {
    #[default]
    All,
    /// Header-prefixed command packets and acknowledgments
    Commands,
    /// Raw color partitions and effect parameter pages
    Data,
    Cmd(u8),
}

impl FromStr for PacketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "commands" | "cmd" | "cmds" => Ok(Self::Commands),
            "data" | "colors" => Ok(Self::Data),
            s if s.starts_with("cmd=") || s.starts_with("0x") => {
                let hex_str = s.strip_prefix("cmd=").unwrap_or(s);
                let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
                u8::from_str_radix(hex_str, 16)
                    .map(Self::Cmd)
                    .map_err(|e| format!("Invalid command byte: {}", e))
            }
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Configuration for the PrinterTransport
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show raw hex dump alongside decoded output
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: PacketFilter,
}

impl PrinterConfig {
    /// Create config with hex output setting
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    /// Create config with filter
    pub fn with_filter(mut self, filter: PacketFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Transport middleware that prints all reports
pub struct PrinterTransport {
    inner: Arc<dyn Transport>,
    config: PrinterConfig,
}

impl PrinterTransport {
    /// Wrap a transport with printing middleware
    pub fn wrap(transport: Arc<dyn Transport>, config: PrinterConfig) -> Arc<dyn Transport> {
        Arc::new(Self {
            inner: transport,
            config,
        })
    }

    /// `payload` excludes the report ID
    fn should_show(&self, payload: &[u8]) -> bool {
        let is_command = is_command_packet(payload);
        match &self.config.filter {
            PacketFilter::All => true,
            PacketFilter::Commands => is_command,
            PacketFilter::Data => !is_command,
            PacketFilter::Cmd(c) => is_command && payload.get(1) == Some(c),
        }
    }

    fn print_outgoing(&self, report: &[u8]) {
        let payload = report.get(1..).unwrap_or_default();
        if !self.should_show(payload) {
            return;
        }

        if is_command_packet(payload) {
            let code = payload.get(1).copied().unwrap_or(0);
            eprintln!(
                "{} {}  0x{:02x} {}",
                ">>>".cyan(),
                "CMD".cyan().bold(),
                code,
                cmd::name(code).yellow(),
            );
        } else {
            let used = payload.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            eprintln!(
                "{} {}  {} bytes, {} non-zero",
                ">>>".cyan(),
                "DAT".cyan().bold(),
                payload.len(),
                used
            );
        }

        if self.config.show_hex {
            eprintln!("    {}  {:02x?}", "HEX".dim(), report);
        }
    }

    fn print_incoming(&self, report: &[u8]) {
        let payload = report.get(1..).unwrap_or_default();
        if !self.should_show(payload) {
            return;
        }

        eprintln!(
            "{} {}  {:02x?}",
            "<<<".green(),
            "ACK".green().bold(),
            &payload[..payload.len().min(8)]
        );

        if self.config.show_hex {
            eprintln!("    {}  {:02x?}", "HEX".dim(), report);
        }
    }
}

impl Transport for PrinterTransport {
    fn send_feature_report(&self, report: &[u8]) -> Result<(), TransportError> {
        self.print_outgoing(report);
        self.inner.send_feature_report(report)
    }

    fn get_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        let resp = self.inner.get_feature_report(report_id, len)?;
        self.print_incoming(&resp);
        Ok(resp)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }

    fn close(&self) -> Result<(), TransportError> {
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PACKET_HEADER;

    #[test]
    fn test_packet_filter_parse() {
        assert_eq!(PacketFilter::from_str("all").unwrap(), PacketFilter::All);
        assert_eq!(
            PacketFilter::from_str("commands").unwrap(),
            PacketFilter::Commands
        );
        assert_eq!(PacketFilter::from_str("colors").unwrap(), PacketFilter::Data);
        assert_eq!(
            PacketFilter::from_str("cmd=0x2a").unwrap(),
            PacketFilter::Cmd(0x2a)
        );
        assert_eq!(
            PacketFilter::from_str("0x02").unwrap(),
            PacketFilter::Cmd(0x02)
        );
        assert!(PacketFilter::from_str("bogus").is_err());
    }

    #[test]
    fn test_command_filter_matches_header_packets_only() {
        struct Null(TransportDeviceInfo);
        impl Transport for Null {
            fn send_feature_report(&self, _: &[u8]) -> Result<(), TransportError> {
                Ok(())
            }
            fn get_feature_report(&self, _: u8, _: usize) -> Result<Vec<u8>, TransportError> {
                Ok(Vec::new())
            }
            fn device_info(&self) -> &TransportDeviceInfo {
                &self.0
            }
            fn close(&self) -> Result<(), TransportError> {
                Ok(())
            }
        }

        let printer = PrinterTransport {
            inner: Arc::new(Null(TransportDeviceInfo {
                vid: 0,
                pid: 0,
                device_path: String::new(),
                interface_number: 0,
                serial: None,
                product_name: None,
            })),
            config: PrinterConfig::default().with_filter(PacketFilter::Cmd(cmd::COMMUNICATION_END)),
        };

        assert!(printer.should_show(&[PACKET_HEADER, cmd::COMMUNICATION_END]));
        assert!(!printer.should_show(&[PACKET_HEADER, cmd::LED_EFFECT_START]));
        assert!(!printer.should_show(&[0x01, 0xFF, 0x00, 0x00]));
    }
}
