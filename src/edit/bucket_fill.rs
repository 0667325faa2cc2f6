use serde::{Deserialize, Serialize};

use super::common::{hline, one_point, set_slot};
use super::{DrawMode, DrawTarget, Edit, HasColor};
use crate::color::Color;
use crate::pixels::PixelBuffer;
use crate::point::Point;

/// Flood fill of the 4-connected region of the seed's source color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketFill {
    #[serde(deserialize_with = "one_point")]
    points: Vec<Point>,
    color: Color,
}

impl BucketFill {
    pub fn new(seed: Point, color: Color) -> Self {
        Self {
            points: vec![seed],
            color,
        }
    }
}

impl Edit for BucketFill {
    fn name(&self) -> &'static str {
        "BucketFill"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, _constrain: bool) {
        set_slot(&mut self.points, index, point);
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let Some(&seed) = self.points.first() else {
            return;
        };
        let spans = flood_fill(target, seed, self.color, mode.paint(self.color), edit_id);
        if spans > 0 {
            log::debug!("Bucket fill at ({}, {}) wrote {} spans", seed.x, seed.y, spans);
        }
    }
}

impl HasColor for BucketFill {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Horizontal run waiting to be painted, with the rows still to scan from it.
#[derive(Debug, Clone, Copy)]
struct Span {
    left: i32,
    right: i32,
    y: i32,
    scan_up: bool,
    scan_down: bool,
}

/// Span fill seeded at `seed`. Colors are always read from the target's
/// source and spans are written to its dest, so the fill can be previewed
/// against a buffer it does not modify. Returns the number of spans written.
pub(crate) fn flood_fill(
    target: &mut DrawTarget<'_>,
    seed: Point,
    fill: Color,
    paint: Color,
    owner: usize,
) -> usize {
    // Restrict to the area both buffers cover so every discovered span is writable.
    let limit = target.source().size().min(target.dest().size());
    if !within(seed, limit) {
        return 0;
    }
    let wanted = target.source().get(seed);
    if wanted == fill {
        return 0;
    }

    let (left, right) = extend_run(target.source(), seed, wanted, limit);
    let mut stack = vec![Span {
        left,
        right,
        y: seed.y,
        scan_up: true,
        scan_down: true,
    }];
    let mut written = 0;

    while let Some(span) = stack.pop() {
        if target.dest().get(Point::new(span.left, span.y)) == paint {
            continue;
        }
        hline(target.dest(), span.y, span.left, span.right, paint, owner);
        written += 1;
        if span.scan_up {
            scan_row(target.source(), &span, span.y - 1, true, wanted, limit, &mut stack);
        }
        if span.scan_down {
            scan_row(target.source(), &span, span.y + 1, false, wanted, limit, &mut stack);
        }
    }
    written
}

fn within(p: Point, limit: Point) -> bool {
    p.x >= 0 && p.y >= 0 && p.x < limit.x && p.y < limit.y
}

/// Widen the single pixel `p` to the maximal run of `wanted` on its row.
fn extend_run(source: &PixelBuffer, p: Point, wanted: Color, limit: Point) -> (i32, i32) {
    let mut left = p.x;
    while left > 0 && source.get(Point::new(left - 1, p.y)) == wanted {
        left -= 1;
    }
    let mut right = p.x;
    while right + 1 < limit.x && source.get(Point::new(right + 1, p.y)) == wanted {
        right += 1;
    }
    (left, right)
}

/// Push every run of `wanted` on row `y` that overlaps `parent` in x. A child
/// scans back toward the parent's row only where it reaches past the parent.
fn scan_row(
    source: &PixelBuffer,
    parent: &Span,
    y: i32,
    upward: bool,
    wanted: Color,
    limit: Point,
    stack: &mut Vec<Span>,
) {
    if y < 0 || y >= limit.y {
        return;
    }
    let mut x = parent.left;
    while x <= parent.right {
        if source.get(Point::new(x, y)) != wanted {
            x += 1;
            continue;
        }
        let (left, right) = extend_run(source, Point::new(x, y), wanted, limit);
        let wider = left < parent.left || right > parent.right;
        stack.push(Span {
            left,
            right,
            y,
            scan_up: upward || wider,
            scan_down: !upward || wider,
        });
        x = right + 1;
    }
}
