use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.max().x.min(other.max().x);
        let y1 = self.max().y.min(other.max().y);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }

    /// Shrinks every edge by `pad`; never produces a negative size.
    #[inline]
    pub fn shrink(self, pad: f32) -> Rect {
        Rect::new(
            self.origin.x + pad,
            self.origin.y + pad,
            (self.size.x - 2.0 * pad).max(0.0),
            (self.size.y - 2.0 * pad).max(0.0),
        )
    }

    /// Splits off a left column of width `w` (clamped to the rect).
    #[inline]
    pub fn split_left(self, w: f32) -> (Rect, Rect) {
        let w = w.clamp(0.0, self.size.x);
        (
            Rect::new(self.origin.x, self.origin.y, w, self.size.y),
            Rect::new(self.origin.x + w, self.origin.y, self.size.x - w, self.size.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(-0.1, 5.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlap() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i, Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_shared_edge_is_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 5.0, 5.0)).is_none());
    }

    // ── layout helpers ────────────────────────────────────────────────────

    #[test]
    fn shrink_never_goes_negative() {
        assert_eq!(r(0.0, 0.0, 20.0, 10.0).shrink(4.0), r(4.0, 4.0, 12.0, 2.0));
        assert!(r(0.0, 0.0, 4.0, 4.0).shrink(5.0).is_empty());
    }

    #[test]
    fn split_left_partitions_width() {
        let (left, right) = r(10.0, 0.0, 100.0, 20.0).split_left(30.0);
        assert_eq!(left, r(10.0, 0.0, 30.0, 20.0));
        assert_eq!(right, r(40.0, 0.0, 70.0, 20.0));

        let (all, none) = r(0.0, 0.0, 10.0, 10.0).split_left(50.0);
        assert_eq!(all.size.x, 10.0);
        assert!(none.is_empty());
    }
}
