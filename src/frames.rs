//! Color map builders used by the CLI
//!
//! All builders assign colors per physical row of the layout.

use gmk67_keyboard::{ColorMap, Layout, RgbColor};
use rand::Rng;

/// A uniformly random color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> RgbColor {
    RgbColor::new(rng.gen(), rng.gen(), rng.gen())
}

/// One random color per row
pub fn random_rows<R: Rng + ?Sized>(layout: &Layout, rng: &mut R) -> ColorMap {
    let mut colors = ColorMap::new();
    for row in layout.rows() {
        let color = random_color(rng);
        colors.extend(row.iter().map(|&pos| (pos, Some(color))));
    }
    colors
}

/// Rows spread evenly around the hue circle, starting at `hue_offset` degrees
pub fn rainbow_rows(layout: &Layout, hue_offset: f32) -> ColorMap {
    let rows = layout.rows();
    let step = 360.0 / rows.len().max(1) as f32;
    let mut colors = ColorMap::new();
    for (i, row) in rows.iter().enumerate() {
        let color = RgbColor::from_hsv(hue_offset + step * i as f32, 1.0, 1.0);
        colors.extend(row.iter().map(|&pos| (pos, Some(color))));
    }
    colors
}

/// Every key of `layout` explicitly dark
pub fn dark(layout: &Layout) -> ColorMap {
    layout.keys().map(|pos| (pos, None)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk67_keyboard::GMK67;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_rows_share_one_color_per_row() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = random_rows(&GMK67, &mut rng);
        assert_eq!(colors.len(), GMK67.key_count());
        for row in GMK67.rows() {
            let first = colors[&row[0]];
            assert!(row.iter().all(|pos| colors[pos] == first));
        }
    }

    #[test]
    fn test_rainbow_first_row_is_offset_hue() {
        let colors = rainbow_rows(&GMK67, 0.0);
        assert_eq!(colors[&0], Some(RgbColor::RED));
    }

    #[test]
    fn test_dark_assigns_none_everywhere() {
        let colors = dark(&GMK67);
        assert_eq!(colors.len(), 67);
        assert!(colors.values().all(Option::is_none));
    }
}
