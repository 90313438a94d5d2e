//! Chart colours.

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form used in SVG attributes.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Fill for cells without a value.
pub const MISSING: Rgb = Rgb(0xd9, 0xd9, 0xd9);

const COOLWARM: [Rgb; 5] = [
    Rgb(59, 76, 192),
    Rgb(141, 176, 254),
    Rgb(221, 221, 221),
    Rgb(244, 154, 123),
    Rgb(180, 4, 38),
];

const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// Diverging blue-to-red colour for `t` in `[0, 1]`.
pub fn coolwarm(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let scaled = t * (COOLWARM.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(COOLWARM.len() - 2);
    COOLWARM[idx].lerp(COOLWARM[idx + 1], scaled - idx as f64)
}

/// Colour of the `index`-th series in scatter and box plots.
pub fn series_color(index: usize) -> &'static str {
    TAB10[index % TAB10.len()]
}

/// Colour of the `index`-th bar or stack segment.
pub fn category_color(index: usize) -> &'static str {
    SET2[index % SET2.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(0.0), Rgb(59, 76, 192));
        assert_eq!(coolwarm(0.5), Rgb(221, 221, 221));
        assert_eq!(coolwarm(1.0), Rgb(180, 4, 38));
        assert_eq!(coolwarm(f64::NAN), Rgb(221, 221, 221));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb(31, 119, 180).hex(), "#1f77b4");
    }

    #[test]
    fn test_colors_cycle() {
        assert_eq!(series_color(10), series_color(0));
        assert_eq!(category_color(9), category_color(1));
    }
}
