use crate::color::Color;
use crate::point::Point;

/// Owner byte for pixels no edit has claimed.
pub const UNOWNED: u8 = 255;

/// Inclusive rectangle of pixels changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub min: Point,
    pub max: Point,
}

impl DirtyRect {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn union(self, other: DirtyRect) -> DirtyRect {
        DirtyRect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.at_least(self.min) && p.at_most(self.max)
    }

    /// Width and height, counting both edges.
    pub fn size(&self) -> Point {
        self.max - self.min + Point::ONE
    }

    /// Intersect with a buffer of `size`. `None` when nothing is left.
    pub fn clip(self, size: Point) -> Option<DirtyRect> {
        let min = self.min.max(Point::ZERO);
        let max = self.max.min(size - Point::ONE);
        (min.x <= max.x && min.y <= max.y).then_some(DirtyRect { min, max })
    }
}

/// Dense row-major raster of [`Color`] with dirty-rect and owner tracking.
///
/// No operation here fails: reads outside the buffer return the background
/// color and writes outside it are dropped. Every coordinate handed to a
/// mutator still extends the dirty rect, so the rect may reach past the
/// buffer edge until it is clipped by [`PixelBuffer::take_dirty`].
#[derive(Clone)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    default_color: Color,
    pixels: Vec<Color>,
    owners: Option<Vec<u8>>,
    dirty: Option<DirtyRect>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("default_color", &self.default_color)
            .field("tracks_owners", &self.owners.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PixelBuffer {
    /// Create a buffer filled with `default_color`. Negative sizes are treated as empty.
    pub fn new(width: i32, height: i32, default_color: Color, track_owners: bool) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            default_color,
            pixels: vec![default_color; len],
            owners: track_owners.then(|| vec![UNOWNED; len]),
            dirty: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn tracks_owners(&self) -> bool {
        self.owners.is_some()
    }

    pub fn is_in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Row-major index of an in-bounds point.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.is_in_bounds(p)
            .then(|| p.x as usize + p.y as usize * self.width as usize)
    }

    pub fn point_of(&self, index: usize) -> Point {
        if self.width == 0 {
            return Point::ZERO;
        }
        let width = self.width as usize;
        Point::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, p: Point) -> Color {
        match self.index_of(p) {
            Some(index) => self.pixels[index],
            None => self.default_color,
        }
    }

    /// Raw packed value at `index`, or the background for indices past the end.
    pub fn get32(&self, index: usize) -> u32 {
        self.pixels.get(index).unwrap_or(&self.default_color).0
    }

    /// Borrow the run `[start, end)`, clamped to the buffer.
    pub fn get_line(&self, start: usize, end: usize) -> &[Color] {
        let end = end.min(self.pixels.len());
        let start = start.min(end);
        &self.pixels[start..end]
    }

    pub fn colors(&self) -> &[Color] {
        &self.pixels
    }

    /// Copy out the buffer as tightly packed RGBA8 bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }

    pub fn set(&mut self, p: Point, color: Color, owner: usize) {
        if let Some(index) = self.index_of(p) {
            self.pixels[index] = color;
            if let Some(owners) = &mut self.owners {
                owners[index] = owner_byte(owner);
            }
        }
        self.set_dirty(p, p);
    }

    /// Bulk write of `line` starting at `index`. The run is truncated at the
    /// end of the buffer; rows are not wrapped by the caller's intent, so
    /// callers pass runs that stay within one row.
    pub fn set_line(&mut self, index: usize, line: &[Color], owner: usize) {
        if line.is_empty() || index >= self.pixels.len() {
            return;
        }
        let end = (index + line.len()).min(self.pixels.len());
        self.pixels[index..end].copy_from_slice(&line[..end - index]);
        if let Some(owners) = &mut self.owners {
            owners[index..end].fill(owner_byte(owner));
        }
        let first = self.point_of(index);
        let last = self.point_of(end - 1);
        if first.y == last.y {
            self.set_dirty(first, last);
        } else {
            self.set_dirty(Point::new(0, first.y), Point::new(self.width - 1, last.y));
        }
    }

    /// Extend the dirty rect to cover `[min, max]`.
    pub fn set_dirty(&mut self, min: Point, max: Point) {
        let rect = DirtyRect::new(min, max);
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(rect),
            None => rect,
        });
    }

    pub fn dirty(&self) -> Option<DirtyRect> {
        self.dirty
    }

    /// Hand the pending dirt, clipped to the buffer, to whoever blits it and reset.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take().and_then(|dirty| dirty.clip(self.size()))
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.default_color);
        if let Some(owners) = &mut self.owners {
            owners.fill(UNOWNED);
        }
        self.dirty = None;
    }

    /// Highest owner id stamped inside the box spanned by `p1` and `p2`.
    pub fn get_owner(&self, p1: Point, p2: Point) -> Option<usize> {
        let owners = self.owners.as_ref()?;
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (min, max) = (p1.min(p2), p1.max(p2));
        if max.x < 0 || max.y < 0 || min.x >= self.width || min.y >= self.height {
            return None;
        }
        let last = self.size() - Point::ONE;
        let min = min.clamp(Point::ZERO, last);
        let max = max.clamp(Point::ZERO, last);
        let width = self.width as usize;
        let mut found: Option<u8> = None;
        for y in min.y..=max.y {
            let row = y as usize * width;
            for &owner in &owners[row + min.x as usize..=row + max.x as usize] {
                if owner != UNOWNED && found.is_none_or(|f| owner > f) {
                    found = Some(owner);
                }
            }
        }
        found.map(usize::from)
    }

    /// Every pixel index currently stamped with `owner`.
    pub fn get_owned_by(&self, owner: usize) -> Vec<usize> {
        let Some(owners) = &self.owners else {
            return Vec::new();
        };
        let owner = owner_byte(owner);
        if owner == UNOWNED {
            return Vec::new();
        }
        owners
            .iter()
            .enumerate()
            .filter_map(|(i, &o)| (o == owner).then_some(i))
            .collect()
    }
}

fn owner_byte(owner: usize) -> u8 {
    u8::try_from(owner).unwrap_or(UNOWNED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_silent() {
        let mut pixels = PixelBuffer::new(4, 4, Color::WHITE, true);
        pixels.set(Point::new(-1, 2), Color::RED, 0);
        pixels.set(Point::new(4, 4), Color::RED, 0);
        assert_eq!(pixels.get(Point::new(-1, 2)), Color::WHITE);
        assert!(pixels.colors().iter().all(|&c| c == Color::WHITE));
        let dirty = pixels.dirty().unwrap();
        assert!(dirty.contains(Point::new(-1, 2)));
        assert!(dirty.contains(Point::new(4, 4)));
        assert_eq!(pixels.take_dirty(), Some(DirtyRect::new(Point::new(0, 2), Point::new(3, 3))));
        assert_eq!(pixels.dirty(), None);
    }

    #[test]
    fn test_large_owner_ids_are_unowned() {
        let mut pixels = PixelBuffer::new(2, 1, Color::WHITE, true);
        pixels.set(Point::new(0, 0), Color::RED, 300);
        assert_eq!(pixels.get_owner(Point::ZERO, Point::new(1, 0)), None);
        assert!(pixels.get_owned_by(300).is_empty());
    }
}
