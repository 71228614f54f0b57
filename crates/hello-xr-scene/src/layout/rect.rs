//! Normalized screen rectangles

/// Rectangle in normalized surface coordinates (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const FULL: Self = Self { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Split into left and right parts; `ratio` is the left part's share
    pub fn split_horizontal(&self, ratio: f32, gap: f32) -> (Rect, Rect) {
        let ratio = ratio.clamp(0.0, 1.0);
        let left_w = (self.width - gap).max(0.0) * ratio;
        let right_w = (self.width - gap).max(0.0) - left_w;
        (
            Rect::new(self.x, self.y, left_w, self.height),
            Rect::new(self.x + left_w + gap, self.y, right_w, self.height),
        )
    }

    /// Split into top and bottom parts; `ratio` is the top part's share
    pub fn split_vertical(&self, ratio: f32, gap: f32) -> (Rect, Rect) {
        let ratio = ratio.clamp(0.0, 1.0);
        let top_h = (self.height - gap).max(0.0) * ratio;
        let bottom_h = (self.height - gap).max(0.0) - top_h;
        (
            Rect::new(self.x, self.y, self.width, top_h),
            Rect::new(self.x, self.y + top_h + gap, self.width, bottom_h),
        )
    }

    /// Shrink by a margin on every side
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_horizontal_keeps_total_width() {
        let (l, r) = Rect::FULL.split_horizontal(0.25, 0.02);
        assert!((l.width + r.width + 0.02 - 1.0).abs() < 1e-6);
        assert!((r.x - (l.width + 0.02)).abs() < 1e-6);
    }

    #[test]
    fn test_inset_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 0.1, 0.1).inset(0.2, 0.2);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }
}
