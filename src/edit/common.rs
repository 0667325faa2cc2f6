use serde::de::{self, Deserialize, Deserializer};

use crate::color::Color;
use crate::pixels::PixelBuffer;
use crate::point::Point;

/// Colors cycled along interactive marquees so they show on any background.
pub(crate) const MARQUEE_COLORS: [Color; 2] = [Color::WHITE, Color::BLACK];

/// Decode a control-point list that must hold exactly `count` points.
fn exact_points<'de, D: Deserializer<'de>>(deserializer: D, count: usize) -> Result<Vec<Point>, D::Error> {
    let points = Vec::<Point>::deserialize(deserializer)?;
    if points.len() != count {
        return Err(de::Error::custom(format!(
            "expected {} control points, found {}",
            count,
            points.len()
        )));
    }
    Ok(points)
}

pub(crate) fn one_point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
    exact_points(deserializer, 1)
}

pub(crate) fn two_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
    exact_points(deserializer, 2)
}

pub(crate) fn three_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
    exact_points(deserializer, 3)
}

pub(crate) fn five_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
    exact_points(deserializer, 5)
}

/// Order-normalize two corners into `(min, max)`, both inclusive.
pub(crate) fn normalize(p1: Point, p2: Point) -> (Point, Point) {
    (p1.min(p2), p1.max(p2))
}

/// Visit every point on the outline of the box spanned by `start` and `end`
/// as four independent spans: top, bottom, left, right.
pub(crate) fn outline_points(start: Point, end: Point, mut handler: impl FnMut(Point, usize)) {
    let (min, max) = normalize(start, end);
    let mut i = 0;
    for x in min.x..=max.x {
        handler(Point::new(x, min.y), i);
        i += 1;
    }
    for x in min.x..=max.x {
        handler(Point::new(x, max.y), i);
        i += 1;
    }
    for y in min.y..=max.y {
        handler(Point::new(min.x, y), i);
        i += 1;
    }
    for y in min.y..=max.y {
        handler(Point::new(max.x, y), i);
        i += 1;
    }
}

/// Horizontal run from `x0` to `x1` inclusive on row `y`, clipped to the buffer.
pub(crate) fn hline(dest: &mut PixelBuffer, y: i32, x0: i32, x1: i32, color: Color, owner: usize) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    if y < 0 || y >= dest.height() {
        return;
    }
    let x0 = x0.max(0);
    let x1 = x1.min(dest.width() - 1);
    if x1 < x0 {
        return;
    }
    if let Some(index) = dest.index_of(Point::new(x0, y)) {
        let line = vec![color; (x1 - x0 + 1) as usize];
        dest.set_line(index, &line, owner);
    }
}

/// Solid box, one bulk write per scanline.
pub(crate) fn fill_rect(dest: &mut PixelBuffer, p1: Point, p2: Point, color: Color, owner: usize) {
    let (min, max) = normalize(p1, p2);
    let min = min.max(Point::ZERO);
    let max = max.min(dest.size() - Point::ONE);
    if max.x < min.x || max.y < min.y {
        return;
    }
    let line = vec![color; (max.x - min.x + 1) as usize];
    for y in min.y..=max.y {
        if let Some(index) = dest.index_of(Point::new(min.x, y)) {
            dest.set_line(index, &line, owner);
        }
    }
}

/// One-pixel box outline.
pub(crate) fn outline_rect(dest: &mut PixelBuffer, p1: Point, p2: Point, color: Color, owner: usize) {
    let (min, max) = normalize(p1, p2);
    hline(dest, min.y, min.x, max.x, color, owner);
    hline(dest, max.y, min.x, max.x, color, owner);
    for y in min.y..=max.y {
        dest.set(Point::new(min.x, y), color, owner);
        dest.set(Point::new(max.x, y), color, owner);
    }
}

/// Dashed selection outline used by interactive overlays.
pub(crate) fn marquee(dest: &mut PixelBuffer, p1: Point, p2: Point, owner: usize) {
    outline_points(p1, p2, |point, i| {
        dest.set(point, MARQUEE_COLORS[i % MARQUEE_COLORS.len()], owner)
    });
}

/// Filled square of side `thickness` centered on `center`.
pub(crate) fn stamp(dest: &mut PixelBuffer, center: Point, thickness: i32, color: Color, owner: usize) {
    if thickness <= 1 {
        dest.set(center, color, owner);
        return;
    }
    let back = Point::splat((thickness - 1) / 2);
    let forward = Point::splat(thickness / 2);
    fill_rect(dest, center - back, center + forward, color, owner);
}

/// Sample `max(|dx|, |dy|) + 1` rounded points from `from` to `to`, stamping each.
pub(crate) fn draw_line(
    dest: &mut PixelBuffer,
    from: Point,
    to: Point,
    thickness: i32,
    color: Color,
    owner: usize,
) {
    let delta = to - from;
    let steps = delta.x.abs().max(delta.y.abs());
    if steps == 0 {
        stamp(dest, from, thickness, color, owner);
        return;
    }
    for i in 0..=steps {
        let p = from + delta.scale(f64::from(i) / f64::from(steps)).round();
        stamp(dest, p, thickness, color, owner);
    }
}

/// Snap `point` so the box it spans with `anchor` is square, keeping its quadrant.
pub(crate) fn square(anchor: Point, point: Point) -> Point {
    let delta = point - anchor;
    let side = delta.x.abs().max(delta.y.abs());
    let sx = if delta.x < 0 { -1 } else { 1 };
    let sy = if delta.y < 0 { -1 } else { 1 };
    anchor + Point::new(sx * side, sy * side)
}

/// Snap `point` onto the horizontal or vertical through `anchor`.
pub(crate) fn axis_align(anchor: Point, point: Point) -> Point {
    anchor + (point - anchor).flatten()
}

/// Store `point` at `index` if the slot exists.
pub(crate) fn set_slot(points: &mut [Point], index: usize, point: Point) -> bool {
    match points.get_mut(index) {
        Some(slot) => {
            *slot = point;
            true
        }
        None => false,
    }
}

/// The other corner of a two-point edit.
pub(crate) fn opposite(index: usize) -> usize {
    if index == 0 { 1 } else { 0 }
}
