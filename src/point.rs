use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "PointNode", into = "PointNode")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Fractional coordinate, produced by scaling and turned back into a [`Point`] by rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

// Tagged form used in save trees.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum PointNode {
    Point { x: i32, y: i32 },
}

impl From<PointNode> for Point {
    fn from(node: PointNode) -> Self {
        let PointNode::Point { x, y } = node;
        Self { x, y }
    }
}

impl From<Point> for PointNode {
    fn from(p: Point) -> Self {
        PointNode::Point { x: p.x, y: p.y }
    }
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };
    pub const ONE: Point = Point { x: 1, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A point with both coordinates set to `v`.
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v }
    }

    pub fn scale(self, n: f64) -> PointF {
        PointF {
            x: f64::from(self.x) * n,
            y: f64::from(self.y) * n,
        }
    }

    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamp each axis into `[min, max]`. When `min > max` on an axis, `max` wins.
    pub fn clamp(self, min: Point, max: Point) -> Point {
        Point::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }

    pub fn abs(self) -> Point {
        Point::new(self.x.abs(), self.y.abs())
    }

    pub fn at_most(self, other: Point) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    pub fn at_least(self, other: Point) -> bool {
        self.x >= other.x && self.y >= other.y
    }

    /// Squared length, widened so large canvases cannot overflow.
    pub fn magnitude2(self) -> i64 {
        let x = i64::from(self.x);
        let y = i64::from(self.y);
        x * x + y * y
    }

    /// Keep only the dominant axis. Ties keep x.
    pub fn flatten(self) -> Point {
        if self.x.abs() >= self.y.abs() {
            Point::new(self.x, 0)
        } else {
            Point::new(0, self.y)
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round half toward positive infinity on each axis.
    pub fn round(self) -> Point {
        Point::new(round_half_up(self.x), round_half_up(self.y))
    }
}

fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Order-normalize two corners and clamp both into a buffer of `size`.
/// The returned max is inclusive.
pub fn bound_rect(p1: Point, p2: Point, size: Point) -> (Point, Point) {
    let last = size - Point::ONE;
    (
        p1.min(p2).clamp(Point::ZERO, last),
        p1.max(p2).clamp(Point::ZERO, last),
    )
}

/// Clip a source rectangle so that both the read from a buffer of
/// `source_size` and the write at `delta` into a buffer of `dest_size` stay
/// in bounds. Returns `(min, max_exclusive)` in source coordinates; the
/// result is empty when `max <= min` on either axis.
pub fn bound_transfer_rect(
    p1: Point,
    p2: Point,
    source_size: Point,
    delta: Point,
    dest_size: Point,
) -> (Point, Point) {
    let min = p1.min(p2).max(Point::ZERO).max(-delta);
    let max = (p1.max(p2) + Point::ONE)
        .min(source_size)
        .min(dest_size - delta);
    (min, max)
}
