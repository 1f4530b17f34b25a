//! Picker shape geometry.
//!
//! A shape is an ordered list of point handles in item-local space.
//! Two handles encode a circle (center, then a point on the rim); three or
//! more encode a closed polygon running through the handles in order and
//! wrapping from the last handle back to the first.
//!
//! The path is never cached: `build_path` re-derives it from the handles
//! every time so there is no state to keep in sync while handles move.

use kurbo::{BezPath, Circle, Point, Rect, Shape, Vec2};
use smallvec::SmallVec;
use std::f64::consts::{PI, TAU};
use thiserror::Error;

/// Radius of the circle default handles are laid out on.
pub const UNIT_SCALE: f64 = 20.0;

/// Fewest handles a shape can have (the circle case).
pub const MIN_POINTS: usize = 2;

/// Handle count of a freshly created picker item.
pub const DEFAULT_POINT_COUNT: usize = 4;

/// Tolerance used when flattening a circle into a `BezPath`.
const CIRCLE_PATH_TOLERANCE: f64 = 0.1;

/// Handle storage; most picker shapes are quads or circles.
pub type Handles = SmallVec<[Point; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("a shape needs at least {MIN_POINTS} points, got {count}")]
    TooFewPoints { count: usize },

    #[error("handle index {index} is out of range for a shape with {count} handles")]
    HandleOutOfRange { index: usize, count: usize },
}

// ─── Path ────────────────────────────────────────────────────────────────

/// Outline derived from a `ShapeGeometry`.
#[derive(Debug, Clone)]
pub enum ShapePath {
    /// Closed polygon through every handle.
    Polygon(BezPath),
    /// Circle from the two-handle encoding.
    Circle(Circle),
}

impl ShapePath {
    /// Point containment. Polygons use kurbo's nonzero winding test; circles
    /// compare squared distance against squared radius.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            ShapePath::Polygon(path) => path.contains(pt),
            ShapePath::Circle(circle) => {
                (pt - circle.center).hypot2() <= circle.radius * circle.radius
            }
        }
    }

    pub fn bounding_box(&self) -> Rect {
        match self {
            ShapePath::Polygon(path) => path.bounding_box(),
            ShapePath::Circle(circle) => circle.bounding_box(),
        }
    }

    /// Flatten to a `BezPath` for drawing.
    pub fn to_bez_path(&self) -> BezPath {
        match self {
            ShapePath::Polygon(path) => path.clone(),
            ShapePath::Circle(circle) => circle.to_path(CIRCLE_PATH_TOLERANCE),
        }
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Ordered point handles of a picker shape, in item-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    points: Handles,
}

impl ShapeGeometry {
    /// Build a shape from explicit handle positions.
    ///
    /// # Errors
    /// Returns `TooFewPoints` when fewer than two points are given.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Result<Self, GeometryError> {
        let points: Handles = points.into_iter().collect();
        if points.len() < MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Build the default shape for `count` handles (see [`default_points`]).
    pub fn with_point_count(count: usize) -> Result<Self, GeometryError> {
        Ok(Self {
            points: default_points(count)?,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a geometry holds at least two handles.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True for the two-handle circle encoding.
    pub fn is_circle(&self) -> bool {
        self.points.len() == MIN_POINTS
    }

    /// Derive the outline from the current handles.
    pub fn build_path(&self) -> ShapePath {
        if self.points.len() > MIN_POINTS {
            let mut path = BezPath::new();
            path.move_to(self.points[0]);
            for pt in &self.points[1..] {
                path.line_to(*pt);
            }
            path.close_path();
            ShapePath::Polygon(path)
        } else {
            let center = self.points[0];
            let radius = center.distance(self.points[1]);
            ShapePath::Circle(Circle::new(center, radius))
        }
    }

    pub fn contains(&self, pt: Point) -> bool {
        self.build_path().contains(pt)
    }

    pub fn bounding_box(&self) -> Rect {
        self.build_path().bounding_box()
    }

    /// Negate the local x of every handle.
    pub fn mirror_x(&mut self) {
        for pt in &mut self.points {
            pt.x = -pt.x;
        }
    }

    /// Scale every handle about the item origin (not the centroid).
    pub fn scale(&mut self, x_factor: f64, y_factor: f64) {
        for pt in &mut self.points {
            pt.x *= x_factor;
            pt.y *= y_factor;
        }
    }

    /// Move handle `index` to `pt`.
    pub fn set_point(&mut self, index: usize, pt: Point) -> Result<(), GeometryError> {
        let count = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::HandleOutOfRange { index, count })?;
        *slot = pt;
        Ok(())
    }

    /// Offset handle `index` by `delta` (handle drag).
    pub fn translate_point(&mut self, index: usize, delta: Vec2) -> Result<(), GeometryError> {
        let count = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::HandleOutOfRange { index, count })?;
        *slot += delta;
        Ok(())
    }
}

impl Default for ShapeGeometry {
    fn default() -> Self {
        Self {
            points: ring(DEFAULT_POINT_COUNT),
        }
    }
}

/// Default handle layout for `count` points: evenly spaced on a circle of
/// radius [`UNIT_SCALE`], rotated by `π / count`.
///
/// The two-point case is reordered and its first handle replaced by the
/// midpoint of the pair so the result reads as (center, rim).
///
/// # Errors
/// Returns `TooFewPoints` when `count < 2`.
pub fn default_points(count: usize) -> Result<Handles, GeometryError> {
    if count < MIN_POINTS {
        return Err(GeometryError::TooFewPoints { count });
    }

    let mut points = ring(count);
    if count == MIN_POINTS {
        points.reverse();
        points[0] = points[0] + (points[1] - points[0]) / 2.0;
    }

    Ok(points)
}

fn ring(count: usize) -> Handles {
    let step = TAU / count as f64;
    let offset = PI / count as f64;
    (0..count)
        .map(|i| circle_point(i as f64 * step + offset))
        .collect()
}

fn circle_point(angle: f64) -> Point {
    Point::new(angle.sin() * UNIT_SCALE, angle.cos() * UNIT_SCALE)
}
