use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::common::{hline, one_point, set_slot};
use super::{DrawMode, DrawTarget, Edit, HasColor};
use crate::color::Color;
use crate::point::Point;
use crate::text_editor::TextEditor;

/// Coverage above this is painted, anything at or below it is skipped.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Text size used when nothing else is configured.
pub const DEFAULT_TEXT_SIZE: i32 = 12;

/// Row-major glyph coverage mask produced by a [`TextRasterizer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphCoverage {
    pub width: i32,
    pub height: i32,
    pub alpha: Vec<u8>,
}

impl GlyphCoverage {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(x + y * self.width) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, alpha: u8) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.alpha[(x + y * self.width) as usize] = alpha;
        }
    }
}

/// Text shaping collaborator.
pub trait TextRasterizer {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str, size: i32) -> i32;

    /// Coverage mask for `text`, `size` pixels tall, origin at the top left.
    fn rasterize(&self, text: &str, size: i32) -> GlyphCoverage;
}

/// Monospace rasterizer that draws each visible grapheme as a solid block.
/// Deterministic, so it is what tests and headless replays use.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRasterizer;

impl BlockRasterizer {
    fn cell_width(size: i32) -> i32 {
        (size * 3 / 5).max(1)
    }
}

impl TextRasterizer for BlockRasterizer {
    fn measure(&self, text: &str, size: i32) -> i32 {
        text.graphemes(true).count() as i32 * Self::cell_width(size)
    }

    fn rasterize(&self, text: &str, size: i32) -> GlyphCoverage {
        let cell = Self::cell_width(size);
        let mut coverage = GlyphCoverage::new(self.measure(text, size), size);
        for (i, grapheme) in text.graphemes(true).enumerate() {
            if grapheme.trim().is_empty() {
                continue;
            }
            let left = i as i32 * cell;
            let inset = if cell >= 3 { 1 } else { 0 };
            for y in inset..size - inset {
                for x in left + inset..left + cell - inset {
                    coverage.set(x, y, u8::MAX);
                }
            }
        }
        coverage
    }
}

/// Editable text anchored at its top-left handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    #[serde(deserialize_with = "one_point")]
    points: Vec<Point>,
    size: i32,
    color: Color,
    editor: TextEditor,
}

impl TextEdit {
    pub fn new(position: Point, size: i32, color: Color) -> Self {
        Self {
            points: vec![position],
            size: size.max(1),
            color,
            editor: TextEditor::default(),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }
}

impl Edit for TextEdit {
    fn name(&self) -> &'static str {
        "TextEdit"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_point(&mut self, index: usize, point: Point, _constrain: bool) {
        set_slot(&mut self.points, index, point);
    }

    fn valid_commit(&self) -> bool {
        !self.editor.text().is_empty()
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        let Some(&origin) = self.points.first() else {
            return;
        };
        let color = mode.paint(self.color);
        let text = self.editor.text();
        let coverage = target.text().rasterize(text, self.size);

        let (caret, anchor) = if mode.is_pending() {
            let rasterizer = target.text();
            let prefix = |end: usize| text.get(..end).unwrap_or(text);
            (
                rasterizer.measure(prefix(self.editor.cursor()), self.size),
                rasterizer.measure(prefix(self.editor.selection_start()), self.size),
            )
        } else {
            (0, 0)
        };

        let dest = target.dest();
        for y in 0..coverage.height {
            for x in 0..coverage.width {
                if coverage.get(x, y) > ALPHA_THRESHOLD {
                    dest.set(origin + Point::new(x, y), color, edit_id);
                }
            }
        }

        if mode.is_pending() {
            let caret_x = origin.x + caret;
            for y in origin.y..origin.y + self.size {
                dest.set(Point::new(caret_x, y), color, edit_id);
            }
            if caret != anchor {
                let underline = origin.y + self.size;
                hline(dest, underline, origin.x + anchor, caret_x, color, edit_id);
            }
        }
    }
}

impl HasColor for TextEdit {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
