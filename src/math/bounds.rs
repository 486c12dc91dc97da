use super::{Point2, Point3, Vector2};

/// Reference point on a 2D bounding box used as a placement anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxPoint {
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// An axis-aligned 2D bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb2 {
    /// Creates a box from two corners.
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing `points`, or `None` when empty.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }


    /// Box grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            Point2::new(self.min.x - margin, self.min.y - margin),
            Point2::new(self.max.x + margin, self.max.y + margin),
        )
    }

    /// Box translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Position of the requested reference point.
    #[must_use]
    pub fn point(&self, at: BoxPoint) -> Point2 {
        let c = self.center();
        match at {
            BoxPoint::TopLeft => Point2::new(self.min.x, self.max.y),
            BoxPoint::TopCenter => Point2::new(c.x, self.max.y),
            BoxPoint::TopRight => self.max,
            BoxPoint::LeftCenter => Point2::new(self.min.x, c.y),
            BoxPoint::Center => c,
            BoxPoint::RightCenter => Point2::new(self.max.x, c.y),
            BoxPoint::BottomLeft => self.min,
            BoxPoint::BottomCenter => Point2::new(c.x, self.min.y),
            BoxPoint::BottomRight => Point2::new(self.max.x, self.min.y),
        }
    }
}

/// An axis-aligned 3D bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb3 {
    /// Smallest box enclosing `points`, or `None` when empty.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> nalgebra::Vector3<f64> {
        self.max - self.min
    }

    /// Projection onto the XY plane.
    #[must_use]
    pub fn footprint(&self) -> Aabb2 {
        Aabb2::new(
            Point2::new(self.min.x, self.min.y),
            Point2::new(self.max.x, self.max.y),
        )
    }
}
