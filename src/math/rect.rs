use super::Point2;

/// An axis-aligned rectangle in plan space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Rect2 {
    /// Creates a rectangle from an origin corner and its extents.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x0, x1) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
        let (y0, y1) = if height < 0.0 { (y + height, y) } else { (y, y + height) };
        Self {
            min: Point2::new(x0, y0),
            max: Point2::new(x1, y1),
        }
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the width along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height along Y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the smallest rectangle enclosing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn negative_extents_are_normalized() {
        let r = Rect2::from_origin_size(4.0, 4.0, -2.0, -1.0);
        assert_relative_eq!(r.min.x, 2.0);
        assert_relative_eq!(r.min.y, 3.0);
        assert_relative_eq!(r.width(), 2.0);
        assert_relative_eq!(r.height(), 1.0);
    }

    #[test]
    fn union_center() {
        let a = Rect2::from_origin_size(0.0, 0.0, 4.0, 3.0);
        let b = Rect2::from_origin_size(4.0, 0.0, 2.0, 5.0);
        let u = a.union(&b);
        let c = u.center();
        assert_relative_eq!(c.x, 3.0);
        assert_relative_eq!(c.y, 2.5);
    }
}
