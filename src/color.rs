//! RGBA colors and their `#hex` notation.

/// A color with components between 0 and 1.
///
/// The default color is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    /// Parses `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// Returns None for anything else, including a missing `#` or non-hex digits.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;

        // shorthand forms repeat each nibble, so dividing by 15 is the same as x * 17 / 255
        let nibble = |shift: u32| f64::from((value >> shift) & 0xF) / 15.;
        let byte = |shift: u32| f64::from((value >> shift) & 0xFF) / 255.;

        match digits.len() {
            3 => Some(Color::new(nibble(8), nibble(4), nibble(0), 1.)),
            4 => Some(Color::new(nibble(12), nibble(8), nibble(4), nibble(0))),
            6 => Some(Color::new(byte(16), byte(8), byte(0), 1.)),
            8 => Some(Color::new(byte(24), byte(16), byte(8), byte(0))),
            _ => None,
        }
    }

    /// Formats the color as `#RRGGBB` or `#RRGGBBAA`.
    pub fn to_hex(&self, include_alpha: bool) -> String {
        let channel = |c: f64| (c.max(0.).min(1.) * 255.).round() as u8;
        if include_alpha {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                channel(self.a)
            )
        } else {
            format!(
                "#{:02X}{:02X}{:02X}",
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        }
    }
}
