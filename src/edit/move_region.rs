use serde::{Deserialize, Serialize};

use super::common::{fill_rect, five_points, marquee, opposite, set_slot, square};
use super::{DrawMode, DrawTarget, Edit};
use crate::color::Color;
use crate::point::{Point, bound_transfer_rect};

const SOURCE_START: usize = 0;
const SOURCE_END: usize = 1;
const DEST_START: usize = 2;
const DEST_END: usize = 3;
const DEST_CENTER: usize = 4;

/// Cut a rectangle out of the source and paste it `delta` away.
///
/// Handles: source corners (0, 1), destination corners (2, 3) and the
/// destination center (4). Destination handles always equal the matching
/// source handle plus `delta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    #[serde(deserialize_with = "five_points")]
    points: Vec<Point>,
    delta: Point,
}

impl Move {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end, start, end, center(start, end)],
            delta: Point::ZERO,
        }
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    fn source(&self) -> Option<(Point, Point)> {
        match self.points[..] {
            [start, end, ..] => Some((start, end)),
            _ => None,
        }
    }

    fn source_center(&self) -> Point {
        self.source().map_or(Point::ZERO, |(start, end)| center(start, end))
    }

    fn relink(&mut self) {
        let delta = self.delta;
        let moved_center = self.source_center() + delta;
        if let [start, end, dest_start, dest_end, dest_center] = &mut self.points[..] {
            *dest_start = *start + delta;
            *dest_end = *end + delta;
            *dest_center = moved_center;
        }
    }
}

fn center(p1: Point, p2: Point) -> Point {
    (p1 + p2).scale(0.5).round()
}

impl Edit for Move {
    fn name(&self) -> &'static str {
        "Move"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        if self.points.len() != 5 {
            set_slot(&mut self.points, index, point);
            return;
        }
        match index {
            SOURCE_START | SOURCE_END => {
                let point = if constrain {
                    square(self.points[opposite(index)], point)
                } else {
                    point
                };
                self.points[index] = point;
            }
            DEST_START | DEST_END => {
                let anchor = self.points[DEST_START + opposite(index - DEST_START)];
                let point = if constrain { square(anchor, point) } else { point };
                self.points[index - DEST_START] = point - self.delta;
            }
            DEST_CENTER => {
                let delta = point - self.source_center();
                self.delta = if constrain { delta.flatten() } else { delta };
            }
            _ => return,
        }
        self.relink();
    }

    fn valid_commit(&self) -> bool {
        matches!(self.source(), Some((start, end)) if start != end)
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let Some((start, end)) = self.source() else {
            return;
        };
        let source_size = target.source().size();
        let dest_size = target.dest().size();
        let (min, max) = bound_transfer_rect(start, end, source_size, self.delta, dest_size);

        // Stage every row before the first write; the rects may overlap.
        let mut rows: Vec<Vec<Color>> = Vec::new();
        if max.x > min.x && max.y > min.y {
            let source = target.source();
            let width = (max.x - min.x) as usize;
            for y in min.y..max.y {
                if let Some(index) = source.index_of(Point::new(min.x, y)) {
                    rows.push(source.get_line(index, index + width).to_vec());
                }
            }
        }

        let background = target.source().default_color();
        let dest = target.dest();
        fill_rect(dest, start, end, background, edit_id);
        for (row, y) in rows.iter().zip(min.y..) {
            if let Some(index) = dest.index_of(Point::new(min.x, y) + self.delta) {
                dest.set_line(index, row, edit_id);
            }
        }

        if mode.is_pending() {
            marquee(dest, start, end, edit_id);
            if let (Some(&dest_start), Some(&dest_end)) = (self.points.get(DEST_START), self.points.get(DEST_END)) {
                marquee(dest, dest_start, dest_end, edit_id);
            }
        }
    }
}
