use serde::{Deserialize, Serialize};

use super::common::{axis_align, draw_line, hline, normalize, opposite, set_slot, square, three_points, two_points};
use super::{DrawMode, DrawTarget, Edit, HasColor};
use crate::color::Color;
use crate::point::Point;

/// Grid cell size used until the spacing handle is dragged.
pub const DEFAULT_GRID_SPACING: i32 = 8;

/// Straight segment between two handles, optionally thick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(deserialize_with = "two_points")]
    points: Vec<Point>,
    color: Color,
    #[serde(default = "default_thickness")]
    thickness: i32,
}

fn default_thickness() -> i32 {
    1
}

impl Line {
    pub fn new(start: Point, end: Point, color: Color, thickness: i32) -> Self {
        Self {
            points: vec![start, end],
            color,
            thickness: thickness.max(1),
        }
    }

    pub fn thickness(&self) -> i32 {
        self.thickness
    }
}

impl Edit for Line {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        let point = match (constrain, self.points.get(opposite(index))) {
            (true, Some(&anchor)) => axis_align(anchor, point),
            _ => point,
        };
        set_slot(&mut self.points, index, point);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        if let [start, end, ..] = self.points[..] {
            draw_line(target.dest(), start, end, self.thickness, mode.paint(self.color), edit_id);
        }
    }
}

impl HasColor for Line {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// A [`Line`] that is always snapped to the horizontal or vertical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightLine {
    #[serde(deserialize_with = "two_points")]
    points: Vec<Point>,
    color: Color,
    #[serde(default = "default_thickness")]
    thickness: i32,
}

impl StraightLine {
    pub fn new(start: Point, end: Point, color: Color, thickness: i32) -> Self {
        Self {
            points: vec![start, axis_align(start, end)],
            color,
            thickness: thickness.max(1),
        }
    }
}

impl Edit for StraightLine {
    fn name(&self) -> &'static str {
        "StraightLine"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, _constrain: bool) {
        let point = match self.points.get(opposite(index)) {
            Some(&anchor) => axis_align(anchor, point),
            None => point,
        };
        set_slot(&mut self.points, index, point);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        if let [start, end, ..] = self.points[..] {
            draw_line(target.dest(), start, end, self.thickness, mode.paint(self.color), edit_id);
        }
    }
}

impl HasColor for StraightLine {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Evenly spaced horizontal and vertical lines filling a rectangle.
///
/// Handles: the two corners and a spacing handle whose offset from the first
/// corner is the cell size. Moving the first corner carries the spacing
/// handle along so the cell size is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    #[serde(deserialize_with = "three_points")]
    points: Vec<Point>,
    color: Color,
}

impl GridLine {
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            points: vec![start, end, start + Point::splat(DEFAULT_GRID_SPACING)],
            color,
        }
    }

    /// Cell size on each axis, at least one pixel.
    pub fn spacing(&self) -> Point {
        match self.points[..] {
            [start, _, handle, ..] => (handle - start).abs().max(Point::ONE),
            _ => Point::splat(DEFAULT_GRID_SPACING),
        }
    }
}

impl Edit for GridLine {
    fn name(&self) -> &'static str {
        "GridLine"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        if self.points.len() != 3 {
            set_slot(&mut self.points, index, point);
            return;
        }
        match index {
            0 => {
                let offset = self.points[2] - self.points[0];
                let point = if constrain { square(self.points[1], point) } else { point };
                self.points[0] = point;
                self.points[2] = point + offset;
            }
            1 => {
                let point = if constrain { square(self.points[0], point) } else { point };
                self.points[1] = point;
            }
            2 => {
                // Square cells when constrained.
                let point = if constrain { square(self.points[0], point) } else { point };
                self.points[2] = point;
            }
            _ => {}
        }
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let [start, end, ..] = self.points[..] else {
            return;
        };
        let color = mode.paint(self.color);
        let spacing = self.spacing();
        let (min, max) = normalize(start, end);
        let dest = target.dest();
        let (width, height) = (dest.width(), dest.height());
        for y in grid_steps(min.y, max.y, spacing.y, height) {
            hline(dest, y, min.x, max.x, color, edit_id);
        }
        let (top, bottom) = (min.y.max(0), max.y.min(height - 1));
        for x in grid_steps(min.x, max.x, spacing.x, width) {
            for y in top..=bottom {
                dest.set(Point::new(x, y), color, edit_id);
            }
        }
    }
}

/// Grid coordinates `min, min + step, ..` up to `max` that land in `0..len`.
fn grid_steps(min: i32, max: i32, step: i32, len: i32) -> impl Iterator<Item = i32> {
    let step = step.max(1);
    let first = if min >= 0 { min } else { min + (step - 1 - min) / step * step };
    (first..=max.min(len - 1)).step_by(step as usize)
}

impl HasColor for GridLine {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
