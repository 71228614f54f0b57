//! Color types for the render surface

/// Color representation supporting ANSI and true color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Reset,
    Black,
    DarkGrey,
    Grey,
    White,
    Red,
    Green,
    Yellow,
    Cyan,
    /// True color RGB
    Rgb(u8, u8, u8),
}

impl Color {
    pub const SURFACE: Self = Color::Rgb(18, 20, 26);
    pub const PANEL_BORDER: Self = Color::Rgb(60, 66, 80);
    pub const PANEL_FOCUS: Self = Color::Rgb(61, 220, 132);
    pub const ACCENT: Self = Color::Rgb(120, 200, 255);
    pub const MUTED: Self = Color::Rgb(110, 115, 125);

    /// Build a color from normalized RGB factors (0.0 - 1.0).
    ///
    /// Out-of-range factors saturate.
    pub fn from_factors(r: f32, g: f32, b: f32) -> Color {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Scale brightness by a factor (used for alpha fades)
    pub fn dim(&self, factor: f32) -> Color {
        match self.to_rgb() {
            Some((r, g, b)) => {
                let f = factor.clamp(0.0, 1.0);
                Color::Rgb(
                    (r as f32 * f) as u8,
                    (g as f32 * f) as u8,
                    (b as f32 * f) as u8,
                )
            }
            None => *self,
        }
    }

    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb(r, g, b) => Some((*r, *g, *b)),
            Color::Black => Some((0, 0, 0)),
            Color::DarkGrey => Some((64, 64, 64)),
            Color::Grey => Some((128, 128, 128)),
            Color::White => Some((255, 255, 255)),
            Color::Red => Some((255, 0, 0)),
            Color::Green => Some((0, 255, 0)),
            Color::Yellow => Some((255, 255, 0)),
            Color::Cyan => Some((0, 255, 255)),
            Color::Reset => None,
        }
    }

    /// Convert to crossterm color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        use crossterm::style::Color as C;
        match self {
            Color::Reset => C::Reset,
            Color::Black => C::Black,
            Color::DarkGrey => C::DarkGrey,
            Color::Grey => C::Grey,
            Color::White => C::White,
            Color::Red => C::Red,
            Color::Green => C::Green,
            Color::Yellow => C::Yellow,
            Color::Cyan => C::Cyan,
            Color::Rgb(r, g, b) => C::Rgb { r: *r, g: *g, b: *b },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_factors_saturates() {
        assert_eq!(Color::from_factors(0.0, 1.0, 2.0), Color::Rgb(0, 255, 255));
        assert_eq!(Color::from_factors(-1.0, 0.5, 0.0), Color::Rgb(0, 128, 0));
    }

    #[test]
    fn test_dim_keeps_reset() {
        assert_eq!(Color::Reset.dim(0.5), Color::Reset);
        assert_eq!(Color::White.dim(0.5), Color::Rgb(127, 127, 127));
    }
}
