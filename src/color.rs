// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Channel triple printed when a color string cannot be parsed.
pub const RGB_FALLBACK: &str = "0, 0, 0";

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_ratatui_color(self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }
}

/// Parse `#rrggbb` or `rrggbb` (either case) into its channels.
///
/// At most one leading `#` is accepted and exactly six hex digits must
/// follow; anything else yields `None`.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Convert a hex color to the `r, g, b` triple used inside CSS `rgba()`.
///
/// Never fails: unparseable input maps to [`RGB_FALLBACK`].
pub fn hex_to_rgb(hex: &str) -> String {
    match parse_hex(hex) {
        Some(Rgb { r, g, b }) => format!("{}, {}, {}", r, g, b),
        None => RGB_FALLBACK.to_string(),
    }
}

// ---------------------------------------------------------------------------
// HslColor
// ---------------------------------------------------------------------------

/// A color represented in the HSL (Hue, Saturation, Lightness) color space.
///
/// - `h`: hue in degrees, 0.0..360.0
/// - `s`: saturation as a percentage, 0.0..100.0
/// - `l`: lightness as a percentage, 0.0..100.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslColor {
    /// Create a new `HslColor`. Values are clamped to their valid ranges.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        Rgb::new(
            (hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0).round() as u8,
            (hue_to_rgb(p, q, h) * 255.0).round() as u8,
            (hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0).round() as u8,
        )
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let s = if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_hex(hex).map(Self::from_rgb)
    }

    pub fn to_ratatui_color(self) -> ratatui::style::Color {
        self.to_rgb().to_ratatui_color()
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Every output must be the fallback or three integers in 0..=255.
    fn assert_well_formed(out: &str) {
        let parts: Vec<&str> = out.split(", ").collect();
        assert_eq!(parts.len(), 3, "bad shape: {out:?}");
        for p in parts {
            let v: u32 = p.parse().expect("channel is an integer");
            assert!(v <= 255);
        }
    }

    #[test]
    fn hex_to_rgb_with_hash() {
        assert_eq!(hex_to_rgb("#ff0028"), "255, 0, 40");
    }

    #[test]
    fn hex_to_rgb_without_hash() {
        assert_eq!(hex_to_rgb("ff0028"), "255, 0, 40");
    }

    #[test]
    fn hex_to_rgb_case_insensitive() {
        assert_eq!(hex_to_rgb("#CE0F2D"), "206, 15, 45");
        assert_eq!(hex_to_rgb("#Ce0f2D"), "206, 15, 45");
    }

    #[test]
    fn hex_to_rgb_fallback() {
        assert_eq!(hex_to_rgb("notacolor"), "0, 0, 0");
        assert_eq!(hex_to_rgb(""), "0, 0, 0");
        assert_eq!(hex_to_rgb("#"), "0, 0, 0");
        assert_eq!(hex_to_rgb("#fff"), "0, 0, 0");
        assert_eq!(hex_to_rgb("#ff0028ff"), "0, 0, 0");
        assert_eq!(hex_to_rgb("##ff0028"), "0, 0, 0");
        assert_eq!(hex_to_rgb(" #ff0028"), "0, 0, 0");
        assert_eq!(hex_to_rgb("#ff0028\n"), "0, 0, 0");
    }

    #[test]
    fn hex_to_rgb_rejects_signs_and_non_ascii() {
        // from_str_radix alone would accept "+f"
        assert_eq!(hex_to_rgb("+f+f+f"), "0, 0, 0");
        assert_eq!(hex_to_rgb("ffé0f"), "0, 0, 0");
        assert_eq!(hex_to_rgb("ab\u{00e9}cd"), "0, 0, 0");
    }

    #[test]
    fn hex_to_rgb_total() {
        let inputs = [
            "", "#", "#000000", "ffffff", "#FFFFFF", "12345", "1234567", "gggggg", "#-12345",
            "🌈🌈", "#f48022", "   ", "0x1234", "#00ff00",
        ];
        for input in inputs {
            assert_well_formed(&hex_to_rgb(input));
        }
    }

    #[test]
    fn hex_to_rgb_idempotent() {
        for input in ["#111111", "junk", "f48022"] {
            assert_eq!(hex_to_rgb(input), hex_to_rgb(input));
        }
    }

    #[test]
    fn rgb_to_hex_lowercase() {
        assert_eq!(Rgb::new(255, 0, 40).to_hex(), "#ff0028");
        assert_eq!(parse_hex("#F48022").map(Rgb::to_hex).as_deref(), Some("#f48022"));
    }

    #[test]
    fn hsl_round_trip_rgb() {
        let c = HslColor::new(0.0, 100.0, 50.0);
        let rgb = c.to_rgb();
        assert_eq!(rgb, Rgb::new(255, 0, 0));
        let back = HslColor::from_rgb(rgb);
        assert!((back.h - 0.0).abs() < 1.0);
        assert!((back.s - 100.0).abs() < 1.0);
        assert!((back.l - 50.0).abs() < 1.0);
    }

    #[test]
    fn hsl_from_hex() {
        let parsed = HslColor::from_hex("#00ff00").unwrap();
        assert!((parsed.h - 120.0).abs() < 1.0);
        assert_eq!(parsed.to_hex(), "#00ff00");
        assert!(HslColor::from_hex("xyz").is_none());
    }

    #[test]
    fn hsl_preserves_default_palette() {
        for hex in ["#ff0028", "#ce0f2d", "#f48022", "#111111"] {
            assert_eq!(HslColor::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn hsl_clamping() {
        let c = HslColor::new(400.0, 150.0, -10.0);
        assert!((c.h - 40.0).abs() < 0.01);
        assert!((c.s - 100.0).abs() < 0.01);
        assert!((c.l - 0.0).abs() < 0.01);
    }
}
