use serde::{Deserialize, Serialize};

use super::common::{fill_rect, marquee, one_point, set_slot};
use super::{DrawMode, DrawTarget, Edit};
use crate::clipboard::PasteData;
use crate::color::Color;
use crate::point::Point;

/// Clipboard image stamped with its top-left corner at the handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paste {
    #[serde(deserialize_with = "one_point")]
    points: Vec<Point>,
    data: PasteData,
}

impl Paste {
    pub fn new(position: Point, data: PasteData) -> Self {
        Self {
            points: vec![position],
            data,
        }
    }

    pub fn data(&self) -> &PasteData {
        &self.data
    }

    fn far_corner(&self, origin: Point) -> Point {
        origin + self.data.size() - Point::ONE
    }
}

impl Edit for Paste {
    fn name(&self) -> &'static str {
        "Paste"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, _constrain: bool) {
        set_slot(&mut self.points, index, point);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let Some(&origin) = self.points.first() else {
            return;
        };
        if self.data.width() == 0 || self.data.height() == 0 {
            return;
        }
        let dest = target.dest();
        if mode == DrawMode::Preview {
            fill_rect(dest, origin, self.far_corner(origin), Color::GHOST, edit_id);
            return;
        }

        // Columns of the image that land inside the destination.
        let first = (-origin.x).max(0);
        let last = self.data.width().min(dest.width() - origin.x);
        if first < last {
            for y in 0..self.data.height() {
                let Some(index) = dest.index_of(Point::new(origin.x + first, origin.y + y)) else {
                    continue;
                };
                let row = self.data.row(y);
                dest.set_line(index, &row[first as usize..last as usize], edit_id);
            }
        }

        if mode.is_pending() {
            marquee(dest, origin, self.far_corner(origin), edit_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::PixelBuffer;

    fn checker() -> PasteData {
        let mut bytes = Vec::new();
        for color in [Color::RED, Color::BLUE, Color::GREEN, Color::BLACK] {
            bytes.extend_from_slice(&color.to_rgba());
        }
        PasteData::new(2, 2, bytes).unwrap()
    }

    #[test]
    fn test_paste_clips_left_edge() {
        let mut pixels = PixelBuffer::new(4, 4, Color::WHITE, false);
        let paste = Paste::new(Point::new(-1, 2), checker());
        paste.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 0);
        assert_eq!(pixels.get(Point::new(0, 2)), Color::BLUE);
        assert_eq!(pixels.get(Point::new(0, 3)), Color::BLACK);
        assert_eq!(pixels.get(Point::new(1, 2)), Color::WHITE);
    }
}
