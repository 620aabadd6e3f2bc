//! LED and RGB lighting types and utilities

use std::fmt;
use std::str::FromStr;

use gmk67_transport::protocol::cmd;

/// Maximum brightness value (6 levels: 0-5)
pub const MAX_BRIGHTNESS: u8 = 5;

/// Slowest animation speed (wire value)
pub const MIN_SPEED: u8 = 0;

/// Fastest animation speed (wire value)
pub const MAX_SPEED: u8 = 5;

/// RGB color value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create color from HSV values (h: 0-360, s: 0-1, v: 0-1)
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.0) as i32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self {
            r: ((r + m) * 255.0).round() as u8,
            g: ((g + m) * 255.0).round() as u8,
            b: ((b + m) * 255.0).round() as u8,
        }
    }

    /// Black (LED off)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (all channels full)
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
}

impl FromStr for RgbColor {
    type Err = String;

    /// Parse `RRGGBB` or `#RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color '{s}': expected RRGGBB"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid color '{s}': {e}"))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lighting mode
///
/// Built-in effects are selected through an effect page (mode byte at
/// offset 0x00). `Direct` and `Custom` are streaming modes; their byte is
/// sent as the command of a color stream header instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LightingMode {
    LightsOff = 0x00,
    Static = 0x01,
    SingleOn = 0x02,
    SingleOff = 0x03,
    Glittering = 0x04,
    Falling = 0x05,
    Colourful = 0x06,
    Breath = 0x07,
    Spectrum = 0x08,
    Outward = 0x09,
    Scrolling = 0x0A,
    Rolling = 0x0B,
    Rotating = 0x0C,
    Explode = 0x0D,
    Launch = 0x0E,
    Ripples = 0x0F,
    Flowing = 0x10,
    Pulsating = 0x11,
    Tilt = 0x12,
    Shuttle = 0x13,
    Custom = cmd::CUSTOM_MODE,
    Direct = cmd::DIRECT_MODE,
}

impl LightingMode {
    /// Every mode, in wire order
    pub const ALL: [LightingMode; 22] = [
        Self::LightsOff,
        Self::Static,
        Self::SingleOn,
        Self::SingleOff,
        Self::Glittering,
        Self::Falling,
        Self::Colourful,
        Self::Breath,
        Self::Spectrum,
        Self::Outward,
        Self::Scrolling,
        Self::Rolling,
        Self::Rotating,
        Self::Explode,
        Self::Launch,
        Self::Ripples,
        Self::Flowing,
        Self::Pulsating,
        Self::Tilt,
        Self::Shuttle,
        Self::Custom,
        Self::Direct,
    ];

    /// Get mode from numeric value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| *m as u8 == value)
    }

    /// Wire value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// True for the streaming modes that carry per-key colors
    pub fn is_per_key(self) -> bool {
        matches!(self, Self::Custom | Self::Direct)
    }

    /// Get the display name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            Self::LightsOff => "Lights Off",
            Self::Static => "Static",
            Self::SingleOn => "Single On",
            Self::SingleOff => "Single Off",
            Self::Glittering => "Glittering",
            Self::Falling => "Falling",
            Self::Colourful => "Colourful",
            Self::Breath => "Breath",
            Self::Spectrum => "Spectrum",
            Self::Outward => "Outward",
            Self::Scrolling => "Scrolling",
            Self::Rolling => "Rolling",
            Self::Rotating => "Rotating",
            Self::Explode => "Explode",
            Self::Launch => "Launch",
            Self::Ripples => "Ripples",
            Self::Flowing => "Flowing",
            Self::Pulsating => "Pulsating",
            Self::Tilt => "Tilt",
            Self::Shuttle => "Shuttle",
            Self::Custom => "Custom",
            Self::Direct => "Direct",
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightingMode {
    type Err = String;

    /// Accepts a mode number (decimal or `0x` hex) or a name
    /// (case-insensitive, spaces/dashes/underscores ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x") {
            Some(hex) => u8::from_str_radix(hex, 16).ok(),
            None => s.parse::<u8>().ok(),
        };
        if let Some(value) = parsed {
            return Self::from_u8(value).ok_or_else(|| format!("Unknown mode number: {s}"));
        }

        let normalize = |name: &str| {
            name.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        };
        let wanted = normalize(s);
        match wanted.as_str() {
            "off" => return Ok(Self::LightsOff),
            "colorful" => return Ok(Self::Colourful),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| normalize(m.name()) == wanted)
            .ok_or_else(|| format!("Unknown mode: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hsv_primaries() {
        assert_eq!(RgbColor::from_hsv(0.0, 1.0, 1.0), RgbColor::RED);
        assert_eq!(RgbColor::from_hsv(120.0, 1.0, 1.0), RgbColor::GREEN);
        assert_eq!(RgbColor::from_hsv(240.0, 1.0, 1.0), RgbColor::BLUE);
        assert_eq!(RgbColor::from_hsv(0.0, 0.0, 1.0), RgbColor::WHITE);
        assert_eq!(RgbColor::from_hsv(0.0, 1.0, 0.0), RgbColor::BLACK);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("ff8000".parse::<RgbColor>().unwrap(), RgbColor::new(255, 128, 0));
        assert_eq!("#00FF00".parse::<RgbColor>().unwrap(), RgbColor::GREEN);
        assert!("fff".parse::<RgbColor>().is_err());
        assert!("gg0000".parse::<RgbColor>().is_err());
        assert_eq!(RgbColor::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn test_mode_round_trip_through_wire_value() {
        for mode in LightingMode::ALL {
            assert_eq!(LightingMode::from_u8(mode.as_u8()), Some(mode));
        }
        assert_eq!(LightingMode::from_u8(0xEE), None);
    }

    #[test]
    fn test_mode_values_are_unique() {
        let mut values: Vec<u8> = LightingMode::ALL.iter().map(|m| m.as_u8()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), LightingMode::ALL.len());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("breath".parse::<LightingMode>().unwrap(), LightingMode::Breath);
        assert_eq!("single-on".parse::<LightingMode>().unwrap(), LightingMode::SingleOn);
        assert_eq!("Lights Off".parse::<LightingMode>().unwrap(), LightingMode::LightsOff);
        assert_eq!("off".parse::<LightingMode>().unwrap(), LightingMode::LightsOff);
        assert_eq!("8".parse::<LightingMode>().unwrap(), LightingMode::Spectrum);
        assert_eq!("0x15".parse::<LightingMode>().unwrap(), LightingMode::Direct);
        assert!("disco".parse::<LightingMode>().is_err());
        assert!("200".parse::<LightingMode>().is_err());
    }

    #[test]
    fn test_streaming_modes_match_command_bytes() {
        assert_eq!(LightingMode::Custom.as_u8(), cmd::CUSTOM_MODE);
        assert_eq!(LightingMode::Direct.as_u8(), cmd::DIRECT_MODE);
        assert!(LightingMode::Direct.is_per_key());
        assert!(!LightingMode::Breath.is_per_key());
    }
}
