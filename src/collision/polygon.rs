use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

/// Closed interval produced by projecting a polygon onto an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn is_disjoint(self, other: Self) -> bool {
        self.max < other.min || other.max < self.min
    }

    /// Signed overlap length; `<= 0` means the intervals at most touch.
    #[inline]
    pub fn overlap(self, other: Self) -> f32 {
        (other.max - self.min).min(self.max - other.min)
    }
}

/// Convex polygon with cached edge normals, bounds and centroid.
///
/// Points can only change through whole-shape transforms, each of which
/// recomputes the cached geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    // sides[i] is the edge points[i] -> points[i + 1] rotated a quarter turn.
    sides: Vec<Vec2>,
    min: Vec2,
    max: Vec2,
    center: Vec2,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(PhysicsError::DegeneratePolygon {
                points: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PhysicsError::NonFinitePoint { index });
        }

        let mut polygon = Self {
            points,
            sides: Vec::new(),
            min: Vec2::ZERO,
            max: Vec2::ZERO,
            center: Vec2::ZERO,
        };
        polygon.recalculate();
        Ok(polygon)
    }

    /// Axis-aligned rectangle listed top-left, top-right, bottom-right, bottom-left.
    pub fn rect(min: Vec2, max: Vec2) -> Result<Self> {
        Self::new(vec![
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ])
    }

    /// Regular `sides`-gon inscribed in a circle of `radius` around the origin,
    /// first vertex at angle zero.
    pub fn regular(sides: usize, radius: f32) -> Result<Self> {
        let delta = 2.0 * core::f32::consts::PI / sides as f32;
        let points = (0..sides)
            .map(|i| {
                let angle = i as f32 * delta;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(points)
    }

    fn recalculate(&mut self) {
        let n = self.points.len();
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        let mut sum = Vec2::ZERO;

        self.sides.clear();
        for (i, &point) in self.points.iter().enumerate() {
            min = min.min(point);
            max = max.max(point);
            sum += point;

            let next = self.points[(i + 1) % n];
            self.sides.push((next - point).perp());
        }

        self.min = min;
        self.max = max;
        self.center = sum / n as f32;
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn sides(&self) -> &[Vec2] {
        &self.sides
    }

    /// Projects every point, shifted by `offset`, onto `axis`.
    pub fn project(&self, axis: Vec2, offset: Vec2) -> Interval {
        self.points.iter().fold(
            Interval::new(f32::MAX, f32::MIN),
            |interval, &point| {
                let d = (point + offset).dot(axis);
                Interval::new(interval.min.min(d), interval.max.max(d))
            },
        )
    }

    /// Cached bounding box shifted by `offset`, as `(min, max)`.
    #[inline]
    pub fn bounds(&self, offset: Vec2) -> (Vec2, Vec2) {
        (self.min + offset, self.max + offset)
    }

    #[inline]
    pub fn min(&self, offset: Vec2) -> Vec2 {
        self.min + offset
    }

    #[inline]
    pub fn max(&self, offset: Vec2) -> Vec2 {
        self.max + offset
    }

    /// Arithmetic mean of the points shifted by `offset`.
    #[inline]
    pub fn center(&self, offset: Vec2) -> Vec2 {
        self.center + offset
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
        self.recalculate();
    }

    pub fn subtract(&mut self, delta: Vec2) {
        self.translate(-delta);
    }

    /// Component-wise scale.
    pub fn scale(&mut self, factor: Vec2) {
        for p in &mut self.points {
            *p = p.mul_components(factor);
        }
        self.recalculate();
    }

    pub fn scale_by(&mut self, factor: f32) {
        self.scale(Vec2::splat(factor));
    }
}
