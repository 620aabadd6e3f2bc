//! Integration tests for the CLI color builders.
//!
//! These run the builders through the keyboard crate's color encoder,
//! the same path `gmk67 direct` and `gmk67 custom` take.

use gmk67_driver::frames;
use gmk67_driver::DriverConfig;
use gmk67_keyboard::layout::BYTES_PER_POSITION;
use gmk67_keyboard::{encode_colors, partition, RgbColor, GMK67};
use gmk67_transport::protocol::PACKET_DATA_LENGTH;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn random_rows_encode_into_whole_frames() {
    let mut rng = StdRng::seed_from_u64(42);
    let colors = frames::random_rows(&GMK67, &mut rng);
    let buffer = encode_colors(&GMK67, &colors).unwrap();

    let parts = partition(&buffer, PACKET_DATA_LENGTH).unwrap();
    assert_eq!(parts.len(), 5);
    assert_eq!(parts.concat(), buffer);
}

#[test]
fn each_grid_row_fills_its_own_frame() {
    // 16 positions × 4 bytes = one 64-byte frame per grid row
    let mut rng = StdRng::seed_from_u64(1);
    let colors = frames::random_rows(&GMK67, &mut rng);
    let buffer = encode_colors(&GMK67, &colors).unwrap();
    let parts = partition(&buffer, PACKET_DATA_LENGTH).unwrap();

    for (row, keys) in GMK67.rows().iter().enumerate() {
        let frame = parts[row];
        let color = colors[&keys[0]].unwrap();
        for &pos in keys.iter() {
            let at = (pos % 16) * BYTES_PER_POSITION;
            assert_eq!(
                &frame[at + 1..at + 4],
                &[color.r, color.g, color.b],
                "row {row} position {pos}"
            );
        }
    }
}

#[test]
fn dark_frame_encodes_to_zeros() {
    let buffer = encode_colors(&GMK67, &frames::dark(&GMK67)).unwrap();
    assert!(buffer.iter().all(|&b| b == 0));
}

#[test]
fn rainbow_rows_differ_between_rows() {
    let colors = frames::rainbow_rows(&GMK67, 90.0);
    let firsts: Vec<RgbColor> = GMK67
        .rows()
        .iter()
        .map(|row| colors[&row[0]].unwrap())
        .collect();
    for pair in firsts.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn default_config_targets_stock_keyboard() {
    let config = DriverConfig::default();
    assert_eq!(config.vid, gmk67_transport::protocol::device::VENDOR_ID);
    assert_eq!(config.pid, gmk67_transport::protocol::device::PRODUCT_ID);
    assert_eq!(config.frame_interval_ms, 400);
}
