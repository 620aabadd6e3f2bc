//! Request/response channel over a raw feature-report transport
//!
//! `ReportChannel` wraps a raw `Transport` (which only moves whole feature
//! reports) and owns the framing rules of the device:
//!
//! ```text
//! [HidWiredTransport / PrinterTransport]  ← implements Transport (raw I/O)
//!                |
//!          [ReportChannel]                ← report ID injection, fixed frame
//!                |
//!         [Gmk67Keyboard]                 ← command sequences
//! ```
//!
//! The device is half-duplex: one exchange at a time. The channel does not
//! lock; callers serialize access to a handle.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::protocol::{self, PACKET_DATA_LENGTH, REPORT_ID, REPORT_SIZE};
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// Framing layer on top of a raw transport
#[derive(Clone)]
pub struct ReportChannel {
    inner: Arc<dyn Transport>,
}

impl ReportChannel {
    /// Wrap a raw transport
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self { inner }
    }

    /// Send one frame.
    ///
    /// Prepends [`REPORT_ID`] and forwards at most [`PACKET_DATA_LENGTH`]
    /// bytes; anything beyond the fixed frame is dropped.
    pub fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        if data.len() > PACKET_DATA_LENGTH {
            debug!(
                "Truncating {}-byte frame to {} bytes",
                data.len(),
                PACKET_DATA_LENGTH
            );
        }
        let report = protocol::build_report(data);
        debug!("Sending report: {:02X?}", &report[..report.len().min(17)]);
        self.inner.send_feature_report(&report)
    }

    /// Blocking read of one acknowledgment frame (report ID + payload).
    ///
    /// The content is returned as-is; only its absence is an error.
    pub fn read(&self) -> Result<Vec<u8>, TransportError> {
        let resp = self.inner.get_feature_report(REPORT_ID, REPORT_SIZE)?;
        if resp.is_empty() {
            return Err(TransportError::EmptyResponse);
        }
        if resp.len() < REPORT_SIZE {
            warn!("Short acknowledgment: {} of {} bytes", resp.len(), REPORT_SIZE);
        }
        debug!("Got response: {:02X?}", &resp[..resp.len().min(17)]);
        Ok(resp)
    }

    /// Get device info
    pub fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }

    /// Close the underlying transport
    pub fn close(&self) -> Result<(), TransportError> {
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct LoopbackTransport {
        info: TransportDeviceInfo,
        sent: Mutex<Vec<Vec<u8>>>,
        reply: Vec<u8>,
    }

    impl LoopbackTransport {
        fn new(reply: Vec<u8>) -> Self {
            Self {
                info: TransportDeviceInfo {
                    vid: 0,
                    pid: 0,
                    device_path: "loopback".into(),
                    interface_number: 0,
                    serial: None,
                    product_name: None,
                },
                sent: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    impl Transport for LoopbackTransport {
        fn send_feature_report(&self, report: &[u8]) -> Result<(), TransportError> {
            self.sent.lock().push(report.to_vec());
            Ok(())
        }

        fn get_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
            assert_eq!(report_id, REPORT_ID);
            assert_eq!(len, REPORT_SIZE);
            Ok(self.reply.clone())
        }

        fn device_info(&self) -> &TransportDeviceInfo {
            &self.info
        }

        fn close(&self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn test_send_injects_report_id() {
        let raw = Arc::new(LoopbackTransport::new(vec![REPORT_ID; REPORT_SIZE]));
        let channel = ReportChannel::new(raw.clone());

        let frame = [0x11u8; PACKET_DATA_LENGTH];
        channel.send(&frame).unwrap();

        let sent = raw.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].len(), REPORT_SIZE);
        assert_eq!(sent[0][0], REPORT_ID);
        assert_eq!(&sent[0][1..], &frame[..]);
    }

    #[test]
    fn test_send_truncates_long_frames() {
        let raw = Arc::new(LoopbackTransport::new(vec![REPORT_ID; REPORT_SIZE]));
        let channel = ReportChannel::new(raw.clone());

        channel.send(&[0x22u8; PACKET_DATA_LENGTH * 2]).unwrap();
        assert_eq!(raw.sent.lock()[0].len(), REPORT_SIZE);
    }

    #[test]
    fn test_read_returns_ack_verbatim() {
        let mut ack = vec![0u8; REPORT_SIZE];
        ack[0] = REPORT_ID;
        ack[1] = 0x42;
        let channel = ReportChannel::new(Arc::new(LoopbackTransport::new(ack.clone())));
        assert_eq!(channel.read().unwrap(), ack);
    }

    #[test]
    fn test_empty_read_is_an_error() {
        let channel = ReportChannel::new(Arc::new(LoopbackTransport::new(Vec::new())));
        assert!(matches!(channel.read(), Err(TransportError::EmptyResponse)));
    }
}
