use serde::{Deserialize, Serialize};

use super::common::{marquee, opposite, set_slot, square, two_points};
use super::{DrawMode, DrawTarget, Edit};
use crate::point::Point;

/// Rectangular region selection. Paints nothing outside the pending overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    #[serde(deserialize_with = "two_points")]
    points: Vec<Point>,
}

impl Select {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    pub fn start(&self) -> Point {
        self.points.first().copied().unwrap_or_default()
    }

    pub fn end(&self) -> Point {
        self.points.get(1).copied().unwrap_or_else(|| self.start())
    }
}

impl Edit for Select {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        let point = match (constrain, self.points.get(opposite(index))) {
            (true, Some(&anchor)) => square(anchor, point),
            _ => point,
        };
        set_slot(&mut self.points, index, point);
    }

    fn valid_commit(&self) -> bool {
        matches!(self.points[..], [start, end, ..] if start != end)
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        if !mode.is_pending() {
            return;
        }
        if let [start, end, ..] = self.points[..] {
            marquee(target.dest(), start, end, edit_id);
        }
    }
}
