//! Protocol constants and utilities for GMK67 keyboard communication

/// Feature report ID prepended to every frame at the transport boundary
pub const REPORT_ID: u8 = 0x06;

/// Payload bytes per feature report (excluding report ID)
pub const PACKET_DATA_LENGTH: usize = 64;

/// Full feature report size (report ID + payload)
pub const REPORT_SIZE: usize = PACKET_DATA_LENGTH + 1;

/// Header byte at offset 0 of every command packet
pub const PACKET_HEADER: u8 = 0x04;

/// Number of parameter packets that follow a WRITE_LED_SPECIAL_EFFECT_AREA
pub const LED_SPECIAL_EFFECT_PACKETS: u8 = 0x01;

/// Validation bytes the firmware expects at 0x14/0x15 of an effect page.
///
/// A page without them is accepted on the wire and silently discarded.
pub const EFFECT_PAGE_CHECK_CODE_L: u8 = 0x55;
pub const EFFECT_PAGE_CHECK_CODE_H: u8 = 0xAA;

/// Command bytes (offset 0x01 of a command packet)
pub mod cmd {
    pub const LED_EFFECT_START: u8 = 0x01;
    pub const COMMUNICATION_END: u8 = 0x02;
    pub const TURN_ON_CUSTOMIZATION: u8 = 0x18;
    pub const TURN_OFF_CUSTOMIZATION: u8 = 0x19;
    pub const WRITE_LED_SPECIAL_EFFECT_AREA: u8 = 0x2A;
    /// Mode selectors that double as command bytes when streaming colors
    pub const CUSTOM_MODE: u8 = 0x14;
    pub const DIRECT_MODE: u8 = 0x15;

    /// Get human-readable name for command byte
    pub fn name(cmd: u8) -> &'static str {
        match cmd {
            LED_EFFECT_START => "LED_EFFECT_START",
            COMMUNICATION_END => "COMMUNICATION_END",
            TURN_ON_CUSTOMIZATION => "TURN_ON_CUSTOMIZATION",
            TURN_OFF_CUSTOMIZATION => "TURN_OFF_CUSTOMIZATION",
            WRITE_LED_SPECIAL_EFFECT_AREA => "WRITE_LED_SPECIAL_EFFECT_AREA",
            CUSTOM_MODE => "CUSTOM_MODE",
            DIRECT_MODE => "DIRECT_MODE",
            _ => "UNKNOWN",
        }
    }
}

/// Stream sub-command at offset 0x08 of the color stream headers
pub mod stream {
    /// Direct (live) frame follows
    pub const DIRECT_FRAME: u8 = 0x08;
    /// Custom (stored) program follows
    pub const CUSTOM_PROGRAM: u8 = 0x09;
}

/// USB identifiers of the GMK67
pub mod device {
    /// Vendor ID
    pub const VENDOR_ID: u16 = 0x258A;
    /// Wired keyboard product ID
    pub const PRODUCT_ID: u16 = 0x010C;

    /// HID usage page of the vendor feature interface
    pub const USAGE_PAGE: u16 = 0xFF00;
    /// Usage of the feature interface
    pub const USAGE_FEATURE: u16 = 0x01;
}

/// Pacing used by callers that stream frames
pub mod timing {
    /// Default interval between direct-mode frames (ms)
    pub const DIRECT_FRAME_INTERVAL_MS: u64 = 400;
    /// Lower bound for the direct-mode frame interval (ms)
    pub const MIN_FRAME_INTERVAL_MS: u64 = 50;
}

/// Build a feature report: report ID followed by at most
/// [`PACKET_DATA_LENGTH`] bytes of `data`.
///
/// Longer input is truncated to the device's fixed frame.
pub fn build_report(data: &[u8]) -> Vec<u8> {
    let len = std::cmp::min(data.len(), PACKET_DATA_LENGTH);
    let mut buf = Vec::with_capacity(len + 1);
    buf.push(REPORT_ID);
    buf.extend_from_slice(&data[..len]);
    buf
}

/// Returns true when `data` looks like a command packet (header at offset 0)
#[inline]
pub fn is_command_packet(data: &[u8]) -> bool {
    data.first() == Some(&PACKET_HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report_prepends_report_id() {
        let report = build_report(&[PACKET_HEADER, cmd::COMMUNICATION_END]);
        assert_eq!(report, vec![REPORT_ID, PACKET_HEADER, cmd::COMMUNICATION_END]);
    }

    #[test]
    fn test_build_report_truncates_oversized_frames() {
        let data = vec![0xEEu8; PACKET_DATA_LENGTH + 10];
        let report = build_report(&data);
        assert_eq!(report.len(), REPORT_SIZE);
        assert_eq!(report[0], REPORT_ID);
        assert!(report[1..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn test_cmd_names() {
        assert_eq!(cmd::name(cmd::WRITE_LED_SPECIAL_EFFECT_AREA), "WRITE_LED_SPECIAL_EFFECT_AREA");
        assert_eq!(cmd::name(0xEE), "UNKNOWN");
    }
}
