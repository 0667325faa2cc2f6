//! Per-frame raster flush of an [`EditStack`] into the committed buffer and
//! the pending overlay.

use crate::color::Color;
use crate::config::EditorConfig;
use crate::edit::{BlockRasterizer, DrawMode, DrawTarget, Edit, EditType, Select, TextRasterizer};
use crate::history::{DirtyLevel, EditStack};
use crate::pixels::{DirtyRect, PixelBuffer};
use crate::point::Point;

/// Regions a display surface must re-blit after a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameDamage {
    /// The level that was consumed
    pub level: DirtyLevel,
    /// Changed part of the committed buffer
    pub committed: Option<DirtyRect>,
    /// Changed part of the overlay, including what the previous overlay covered
    pub overlay: Option<DirtyRect>,
    /// Set after a full replay of the history
    pub full: bool,
}

impl FrameDamage {
    pub fn is_empty(&self) -> bool {
        self.committed.is_none() && self.overlay.is_none()
    }
}

/// Owns the committed raster and the overlay the pending edit is drawn into.
pub struct Renderer {
    /// Committed edits, stamped with their history index
    pixels: PixelBuffer,
    /// Pending edit and its handles, redrawn from scratch each dirty frame
    overlay: PixelBuffer,
    /// Handle grab size; handle boxes are drawn at half and a quarter of it
    control_size: i32,
    /// Extent the overlay covered after the previous flush
    last_overlay: Option<DirtyRect>,
    /// Number of committed edits currently in `pixels`
    drawn: usize,
    text: Box<dyn TextRasterizer>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("pixels", &self.pixels)
            .field("overlay", &self.overlay)
            .field("control_size", &self.control_size)
            .field("last_overlay", &self.last_overlay)
            .field("drawn", &self.drawn)
            .finish()
    }
}

impl Renderer {
    pub fn new(width: i32, height: i32, canvas_color: Color, overlay_color: Color, control_size: i32) -> Self {
        Self {
            pixels: PixelBuffer::new(width, height, canvas_color, true),
            overlay: PixelBuffer::new(width, height, overlay_color, false),
            control_size: control_size.max(0),
            last_overlay: None,
            drawn: 0,
            text: Box::new(BlockRasterizer),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.canvas_width,
            config.canvas_height,
            config.canvas_color,
            config.overlay_color,
            config.control_size,
        )
    }

    pub fn with_text_rasterizer(mut self, text: Box<dyn TextRasterizer>) -> Self {
        self.text = text;
        self
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn overlay(&self) -> &PixelBuffer {
        &self.overlay
    }

    pub fn control_size(&self) -> i32 {
        self.control_size
    }

    /// Consume the stack's dirty level and do at least that much raster work.
    pub fn flush(&mut self, stack: &mut EditStack) -> FrameDamage {
        let level = stack.consume_dirty();
        if level != DirtyLevel::None {
            log::debug!("Flushing at {:?}", level);
        }
        let mut full = false;

        let edits = stack.edits();
        // Several commits may land between two frames; catch up on all of them.
        let replay = level == DirtyLevel::AllEdits
            || (level == DirtyLevel::LastEdit && self.drawn > edits.len());
        if replay {
            self.pixels.clear();
            self.draw_committed(edits, 0);
            let last = self.pixels.size() - Point::ONE;
            self.pixels.set_dirty(Point::ZERO, last);
            full = true;
            log::debug!("Replayed {} edits", edits.len());
        } else if level == DirtyLevel::LastEdit {
            self.draw_committed(edits, self.drawn);
        }

        let overlay = if level.needs_overlay() {
            self.redraw_overlay(stack)
        } else {
            None
        };

        FrameDamage {
            level,
            committed: self.pixels.take_dirty(),
            overlay,
            full,
        }
    }

    fn draw_committed(&mut self, edits: &[EditType], from: usize) {
        for (index, edit) in edits.iter().enumerate().skip(from) {
            let mut target = DrawTarget::new(&mut self.pixels).with_text(&*self.text);
            edit.draw(&mut target, DrawMode::Normal, index);
        }
        self.drawn = edits.len();
    }

    fn redraw_overlay(&mut self, stack: &EditStack) -> Option<DirtyRect> {
        self.overlay.clear();
        if let Some(pending) = stack.pending_edit() {
            let owner = stack.edits().len();
            let mut target = DrawTarget::with_source(&mut self.overlay, &self.pixels).with_text(&*self.text);
            pending.draw(&mut target, DrawMode::Pending, owner);

            let handle = Point::splat(self.control_size / 2);
            for &point in pending.points() {
                Select::new(point - handle, point + handle).draw(&mut target, DrawMode::Pending, owner);
            }
            if let Some(&active) = pending.points().get(stack.control_point()) {
                let handle = Point::splat(self.control_size / 4);
                Select::new(active - handle, active + handle).draw(&mut target, DrawMode::Pending, owner);
            }
        }
        let current = self.overlay.take_dirty();
        let damage = match (current, self.last_overlay) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, b) => a.or(b),
        };
        self.last_overlay = current;
        damage
    }

    /// Right-click reselect: jump to the newest edit owning a pixel in the
    /// box, or back to the end of history when none does.
    pub fn select_at(&self, stack: &mut EditStack, p1: Point, p2: Point) -> Option<usize> {
        match self.pixels.get_owner(p1, p2) {
            Some(owner) => {
                stack.select_edit(owner);
                Some(owner)
            }
            None => {
                stack.select_last_edit();
                None
            }
        }
    }

    /// Pixels last painted by committed edit `index`.
    pub fn footprint(&self, index: usize) -> Vec<Point> {
        self.pixels
            .get_owned_by(index)
            .into_iter()
            .map(|i| self.pixels.point_of(i))
            .collect()
    }

    /// Color picker.
    pub fn pick_color(&self, point: Point) -> Color {
        self.pixels.get(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::FillRect;

    #[test]
    fn test_pending_only_touches_overlay() {
        let mut renderer = Renderer::new(10, 10, Color::WHITE, Color::CLEAR, 2);
        let mut stack = EditStack::new();
        stack.start_new_edit(Some(FillRect::new(Point::new(1, 1), Point::new(3, 3), Color::RED).into()));
        let damage = renderer.flush(&mut stack);
        assert_eq!(damage.level, DirtyLevel::PendingEdit);
        assert_eq!(damage.committed, None);
        assert!(damage.overlay.is_some());
        assert_eq!(renderer.overlay().get(Point::new(2, 2)), Color::RED);
        assert_eq!(renderer.pixels().get(Point::new(2, 2)), Color::WHITE);
        assert!(renderer.flush(&mut stack).is_empty());
    }
}
