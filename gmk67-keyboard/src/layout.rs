//! Key positions and their LED memory locations
//!
//! A position is an index into the row-major key grid (`row * COLS + col`).
//! The firmware addresses LEDs by memory location, which is column-major
//! and starts at 1 so that an all-zero color slot never names a real LED.

/// Index into a [`Layout`]
pub type Position = usize;

/// Grid dimensions of the GMK67 matrix
pub const GMK67_ROWS: usize = 5;
pub const GMK67_COLS: usize = 16;

/// Number of positions in the GMK67 matrix (populated or not)
pub const GMK67_POSITIONS: usize = GMK67_ROWS * GMK67_COLS;

/// Bytes per position in a color buffer: location, R, G, B
pub const BYTES_PER_POSITION: usize = 4;

const fn gmk67_memory_locations() -> [u8; GMK67_POSITIONS] {
    let mut table = [0u8; GMK67_POSITIONS];
    let mut pos = 0;
    while pos < GMK67_POSITIONS {
        let row = pos / GMK67_COLS;
        let col = pos % GMK67_COLS;
        table[pos] = (col * GMK67_ROWS + row + 1) as u8;
        pos += 1;
    }
    table
}

/// Position → memory location for the GMK67
pub static GMK67_MEMORY_LOCATIONS: [u8; GMK67_POSITIONS] = gmk67_memory_locations();

/// Populated positions per physical row (67 keys)
pub static GMK67_KEY_ROWS: [&[Position]; GMK67_ROWS] = [
    // Esc 1 2 3 4 5 6 7 8 9 0 - = Backspace Del
    &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
    // Tab Q W E R T Y U I O P [ ] \ PgUp
    &[16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30],
    // Caps A S D F G H J K L ; ' Enter PgDn
    &[32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45],
    // LShift Z X C V B N M , . / RShift Up End
    &[48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61],
    // LCtrl Win LAlt Space RAlt Fn Left Down Right
    &[64, 65, 66, 70, 74, 75, 76, 77, 78],
];

/// The GMK67 layout
pub static GMK67: Layout = Layout::new("GMK67", &GMK67_MEMORY_LOCATIONS, &GMK67_KEY_ROWS);

/// A keyboard layout: memory-location table plus physical key rows
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    name: &'static str,
    memory_locations: &'static [u8],
    rows: &'static [&'static [Position]],
}

impl Layout {
    /// `memory_locations[position]` is the LED address of `position`
    pub const fn new(
        name: &'static str,
        memory_locations: &'static [u8],
        rows: &'static [&'static [Position]],
    ) -> Self {
        Self {
            name,
            memory_locations,
            rows,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of positions (populated or not)
    pub fn position_count(&self) -> usize {
        self.memory_locations.len()
    }

    /// Size of a color buffer covering every position
    pub fn color_buffer_size(&self) -> usize {
        self.position_count() * BYTES_PER_POSITION
    }

    /// LED memory location of `position`, if it is inside the layout
    pub fn memory_location(&self, position: Position) -> Option<u8> {
        self.memory_locations.get(position).copied()
    }

    /// Physical key rows
    pub fn rows(&self) -> &'static [&'static [Position]] {
        self.rows
    }

    /// Every populated position, row by row
    pub fn keys(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of populated keys
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk67_transport::protocol::PACKET_DATA_LENGTH;

    #[test]
    fn test_gmk67_has_67_keys() {
        assert_eq!(GMK67.key_count(), 67);
        assert_eq!(GMK67.position_count(), 80);
    }

    #[test]
    fn test_color_buffer_is_whole_frames() {
        assert_eq!(GMK67.color_buffer_size(), 320);
        assert_eq!(GMK67.color_buffer_size() % PACKET_DATA_LENGTH, 0);
    }

    #[test]
    fn test_key_rows_are_inside_the_grid() {
        for (row, keys) in GMK67.rows().iter().enumerate() {
            for &pos in keys.iter() {
                assert_eq!(pos / GMK67_COLS, row, "position {pos} in wrong row");
                assert!(GMK67.memory_location(pos).is_some());
            }
        }
    }

    #[test]
    fn test_memory_locations_are_column_major_and_unique() {
        assert_eq!(GMK67.memory_location(0), Some(1)); // Esc
        assert_eq!(GMK67.memory_location(16), Some(2)); // Tab
        assert_eq!(GMK67.memory_location(1), Some(6)); // 1
        assert_eq!(GMK67.memory_location(79), Some(80));
        assert_eq!(GMK67.memory_location(80), None);

        let mut seen = GMK67_MEMORY_LOCATIONS.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), GMK67_POSITIONS);
        assert!(!seen.contains(&0));
    }
}
