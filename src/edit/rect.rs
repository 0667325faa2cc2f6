use serde::{Deserialize, Serialize};

use super::common::{fill_rect, marquee, opposite, outline_rect, set_slot, square, two_points};
use super::{DrawMode, DrawTarget, Edit, HasColor};
use crate::color::Color;
use crate::point::Point;

fn set_corner(points: &mut [Point], index: usize, point: Point, constrain: bool) {
    let point = match (constrain, points.get(opposite(index))) {
        (true, Some(&anchor)) => square(anchor, point),
        _ => point,
    };
    set_slot(points, index, point);
}

/// One-pixel rectangle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(deserialize_with = "two_points")]
    points: Vec<Point>,
    color: Color,
}

impl Rect {
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            points: vec![start, end],
            color,
        }
    }
}

impl Edit for Rect {
    fn name(&self) -> &'static str {
        "Rect"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        set_corner(&mut self.points, index, point, constrain);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        if let [start, end, ..] = self.points[..] {
            outline_rect(target.dest(), start, end, mode.paint(self.color), edit_id);
        }
    }
}

impl HasColor for Rect {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Solid rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRect {
    #[serde(deserialize_with = "two_points")]
    points: Vec<Point>,
    color: Color,
}

impl FillRect {
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            points: vec![start, end],
            color,
        }
    }
}

impl Edit for FillRect {
    fn name(&self) -> &'static str {
        "FillRect"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        set_corner(&mut self.points, index, point, constrain);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        if let [start, end, ..] = self.points[..] {
            fill_rect(target.dest(), start, end, mode.paint(self.color), edit_id);
        }
    }
}

impl HasColor for FillRect {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Erase a rectangle back to the source background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clear {
    #[serde(deserialize_with = "two_points")]
    points: Vec<Point>,
}

impl Clear {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
        }
    }
}

impl Edit for Clear {
    fn name(&self) -> &'static str {
        "Clear"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        set_corner(&mut self.points, index, point, constrain);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let [start, end, ..] = self.points[..] else {
            return;
        };
        let background = target.source().default_color();
        let dest = target.dest();
        fill_rect(dest, start, end, mode.paint(background), edit_id);
        if mode.is_pending() {
            marquee(dest, start, end, edit_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::PixelBuffer;

    #[test]
    fn test_inverted_corners_are_normalized() {
        let mut pixels = PixelBuffer::new(6, 6, Color::WHITE, false);
        let rect = FillRect::new(Point::new(4, 3), Point::new(1, 1), Color::RED);
        rect.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 0);
        assert_eq!(pixels.get(Point::new(1, 1)), Color::RED);
        assert_eq!(pixels.get(Point::new(4, 3)), Color::RED);
        assert_eq!(pixels.get(Point::new(5, 3)), Color::WHITE);
    }

    #[test]
    fn test_outline_leaves_interior() {
        let mut pixels = PixelBuffer::new(6, 6, Color::WHITE, false);
        let rect = Rect::new(Point::new(1, 1), Point::new(4, 4), Color::BLUE);
        rect.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 0);
        assert_eq!(pixels.get(Point::new(1, 3)), Color::BLUE);
        assert_eq!(pixels.get(Point::new(4, 4)), Color::BLUE);
        assert_eq!(pixels.get(Point::new(2, 2)), Color::WHITE);
    }

    #[test]
    fn test_constrain_makes_square() {
        let mut rect = Rect::new(Point::new(0, 0), Point::new(0, 0), Color::BLUE);
        rect.set_point(1, Point::new(3, 7), true);
        assert_eq!(rect.points()[1], Point::new(7, 7));
    }
}
