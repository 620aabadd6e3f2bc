//! Per-key color buffers
//!
//! A color buffer holds one 4-byte slot per layout position:
//! `[memory location, R, G, B]` at `position * 4`. Slots of positions that
//! are absent, or mapped to `None`, stay zero and the LED stays dark.

use std::collections::BTreeMap;

use crate::error::KeyboardError;
use crate::layout::{Layout, Position, BYTES_PER_POSITION};
use crate::led::RgbColor;

/// Color assignment per position; `None` leaves the key dark
pub type ColorMap = BTreeMap<Position, Option<RgbColor>>;

/// Encode a color map into a buffer covering every position of `layout`
pub fn encode_colors(layout: &Layout, colors: &ColorMap) -> Result<Vec<u8>, KeyboardError> {
    let mut buffer = vec![0u8; layout.color_buffer_size()];
    for (&position, color) in colors {
        let Some(color) = color else { continue };
        let location = layout.memory_location(position).ok_or_else(|| {
            KeyboardError::ProtocolViolation(format!(
                "position {position} outside {} layout ({} positions)",
                layout.name(),
                layout.position_count()
            ))
        })?;
        let at = position * BYTES_PER_POSITION;
        buffer[at..at + BYTES_PER_POSITION].copy_from_slice(&[location, color.r, color.g, color.b]);
    }
    Ok(buffer)
}

/// Split `buffer` into consecutive `packet_size` frames.
///
/// The buffer must be an exact multiple of the frame size.
pub fn partition(buffer: &[u8], packet_size: usize) -> Result<Vec<&[u8]>, KeyboardError> {
    if packet_size == 0 || buffer.len() % packet_size != 0 {
        return Err(KeyboardError::ProtocolViolation(format!(
            "{}-byte color buffer is not a whole number of {packet_size}-byte packets",
            buffer.len()
        )));
    }
    Ok(buffer.chunks_exact(packet_size).collect())
}

/// Map every populated key of `layout` to `color`
pub fn solid(layout: &Layout, color: RgbColor) -> ColorMap {
    layout.keys().map(|pos| (pos, Some(color))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GMK67;
    use gmk67_transport::protocol::PACKET_DATA_LENGTH;

    static EIGHTEEN: [u8; 18] = [
        0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E,
        0x1F, 0x20, 0x21,
    ];
    static EIGHTEEN_ROWS: [&[Position]; 1] = [&[0, 1, 2, 3, 4, 5, 6, 7, 8]];
    static EIGHTEEN_LAYOUT: Layout = Layout::new("test-18", &EIGHTEEN, &EIGHTEEN_ROWS);

    #[test]
    fn test_single_key_slot() {
        let mut colors = ColorMap::new();
        colors.insert(5, Some(RgbColor::new(255, 0, 0)));

        let buffer = encode_colors(&EIGHTEEN_LAYOUT, &colors).unwrap();
        assert_eq!(buffer.len(), 18 * 4);
        assert_eq!(&buffer[20..24], &[EIGHTEEN[5], 255, 0, 0]);
        assert!(buffer[..20].iter().all(|&b| b == 0));
        assert!(buffer[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_none_leaves_slot_zeroed() {
        let mut colors = ColorMap::new();
        colors.insert(2, None);
        colors.insert(3, Some(RgbColor::WHITE));

        let buffer = encode_colors(&EIGHTEEN_LAYOUT, &colors).unwrap();
        assert_eq!(&buffer[8..12], &[0, 0, 0, 0]);
        assert_eq!(&buffer[12..16], &[EIGHTEEN[3], 255, 255, 255]);
    }

    #[test]
    fn test_position_outside_layout_is_rejected() {
        let mut colors = ColorMap::new();
        colors.insert(18, Some(RgbColor::RED));
        let err = encode_colors(&EIGHTEEN_LAYOUT, &colors).unwrap_err();
        assert!(matches!(err, KeyboardError::ProtocolViolation(_)));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let colors = solid(&GMK67, RgbColor::new(1, 2, 3));
        assert_eq!(
            encode_colors(&GMK67, &colors).unwrap(),
            encode_colors(&GMK67, &colors).unwrap()
        );
    }

    #[test]
    fn test_partitions_concatenate_to_buffer() {
        let colors = solid(&GMK67, RgbColor::new(9, 8, 7));
        let buffer = encode_colors(&GMK67, &colors).unwrap();
        let parts = partition(&buffer, PACKET_DATA_LENGTH).unwrap();

        assert_eq!(parts.len(), GMK67.color_buffer_size() / PACKET_DATA_LENGTH);
        assert!(parts.iter().all(|p| p.len() == PACKET_DATA_LENGTH));
        assert_eq!(parts.concat(), buffer);
    }

    #[test]
    fn test_partition_rejects_remainder() {
        let buffer = vec![0u8; 72];
        assert!(partition(&buffer, PACKET_DATA_LENGTH).is_err());
        assert!(partition(&buffer, 0).is_err());
        assert_eq!(partition(&buffer, 8).unwrap().len(), 9);
    }

    #[test]
    fn test_solid_covers_only_populated_keys() {
        let colors = solid(&GMK67, RgbColor::BLUE);
        assert_eq!(colors.len(), 67);
        let buffer = encode_colors(&GMK67, &colors).unwrap();
        // Position 15 is an empty grid slot
        assert_eq!(&buffer[60..64], &[0, 0, 0, 0]);
        assert_eq!(&buffer[0..4], &[1, 0, 0, 255]);
    }
}
