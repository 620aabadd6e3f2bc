//! Keyboard interface error types

use gmk67_transport::TransportError;
use thiserror::Error;

/// Errors from keyboard operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Transport layer error (I/O failure or device not found)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Caller passed an offset, position or size the protocol cannot encode
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),
}

impl KeyboardError {
    /// True when the device could not be found or opened
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::DeviceNotFound(_))
                | Self::Transport(TransportError::HidPermissionDenied(_))
        )
    }
}
