use serde::{Deserialize, Serialize};

use super::common::{draw_line, one_point, set_slot};
use super::{DrawMode, DrawTarget, Edit, HasColor};
use crate::color::Color;
use crate::point::Point;

/// Free-hand polyline. Its single handle is the pen head; every move of the
/// head appends a sample to the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    #[serde(deserialize_with = "one_point")]
    points: Vec<Point>,
    path: Vec<Point>,
    color: Color,
    thickness: i32,
}

impl Pen {
    pub fn new(start: Point, color: Color, thickness: i32) -> Self {
        Self {
            points: vec![start],
            path: vec![start],
            color,
            thickness: thickness.max(1),
        }
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }
}

impl Edit for Pen {
    fn name(&self) -> &'static str {
        "Pen"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        if index != 0 {
            return;
        }
        let point = match (constrain, self.path.last()) {
            (true, Some(&last)) => last + (point - last).flatten(),
            _ => point,
        };
        set_slot(&mut self.points, 0, point);
        if self.path.last() != Some(&point) {
            self.path.push(point);
        }
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let color = mode.paint(self.color);
        let dest = target.dest();
        match self.path[..] {
            [] => {}
            [only] => draw_line(dest, only, only, self.thickness, color, edit_id),
            _ => {
                for pair in self.path.windows(2) {
                    draw_line(dest, pair[0], pair[1], self.thickness, color, edit_id);
                }
            }
        }
    }
}

impl HasColor for Pen {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
