//! Parametric drawing commands.
//!
//! Every edit is a handful of control points plus a `draw` that is a pure
//! function of those points and the buffers it is handed. Edits never fail:
//! degenerate, inverted or off-canvas geometry is normalized and clipped.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::pixels::PixelBuffer;
use crate::point::Point;

pub(crate) mod common;
pub mod bucket_fill;
pub mod factory;
pub mod line;
pub mod move_region;
pub mod paste;
pub mod pen;
pub mod rect;
pub mod select;
pub mod text;

pub use bucket_fill::BucketFill;
pub use factory::{Tool, ToolContext, create_edit, create_paste, retarget};
pub use line::{GridLine, Line, StraightLine};
pub use move_region::Move;
pub use paste::Paste;
pub use pen::Pen;
pub use rect::{Clear, FillRect, Rect};
pub use select::Select;
pub use text::{BlockRasterizer, GlyphCoverage, TextEdit, TextRasterizer};

/// How an edit is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Final raster into the committed buffer.
    #[default]
    Normal,
    /// Interactive overlay: marquees, carets and guides are added.
    Pending,
    /// Ghost pass: the edit's own color is replaced by [`Color::GHOST`].
    Preview,
}

impl DrawMode {
    /// The color actually painted for an edit whose color is `color`.
    pub fn paint(self, color: Color) -> Color {
        match self {
            DrawMode::Preview => Color::GHOST,
            _ => color,
        }
    }

    pub fn is_pending(self) -> bool {
        self == DrawMode::Pending
    }
}

/// Buffers and collaborators an edit draws with.
///
/// Writes go to `dest`. Reads of "what is already there" go to the source,
/// which is `dest` itself unless a separate buffer was supplied, so an
/// overlay can be drawn against the committed raster without touching it.
pub struct DrawTarget<'a> {
    dest: &'a mut PixelBuffer,
    source: Option<&'a PixelBuffer>,
    text: &'a dyn TextRasterizer,
}

impl<'a> DrawTarget<'a> {
    pub fn new(dest: &'a mut PixelBuffer) -> Self {
        Self {
            dest,
            source: None,
            text: &BlockRasterizer,
        }
    }

    pub fn with_source(dest: &'a mut PixelBuffer, source: &'a PixelBuffer) -> Self {
        Self {
            dest,
            source: Some(source),
            text: &BlockRasterizer,
        }
    }

    pub fn with_text(mut self, text: &'a dyn TextRasterizer) -> Self {
        self.text = text;
        self
    }

    pub fn dest(&mut self) -> &mut PixelBuffer {
        &mut *self.dest
    }

    pub fn source(&self) -> &PixelBuffer {
        match self.source {
            Some(source) => source,
            None => &*self.dest,
        }
    }

    /// True when reads and writes hit the same buffer.
    pub fn is_in_place(&self) -> bool {
        self.source.is_none()
    }

    pub fn text(&self) -> &dyn TextRasterizer {
        self.text
    }
}

/// Common contract of every edit variant.
pub trait Edit {
    /// Display name, also the save-tree tag.
    fn name(&self) -> &'static str;

    /// Current control points. Index 0 is the primary handle.
    fn points(&self) -> &[Point];

    /// Move one control point. With `constrain`, the variant snaps the point
    /// (axis alignment, square aspect, linked handles). Out-of-range indices
    /// are ignored.
    fn set_point(&mut self, index: usize, point: Point, constrain: bool);

    /// Whether the edit is worth keeping in history.
    fn valid_commit(&self) -> bool {
        true
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize);
}

/// Edits whose paint color can be changed after creation.
pub trait HasColor {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

/// Closed set of edit variants, tagged by name in save trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditType {
    Select(Select),
    Move(Move),
    Line(Line),
    StraightLine(StraightLine),
    GridLine(GridLine),
    Rect(Rect),
    FillRect(FillRect),
    Clear(Clear),
    TextEdit(TextEdit),
    BucketFill(BucketFill),
    Paste(Paste),
    Pen(Pen),
}

impl EditType {
    fn as_edit(&self) -> &dyn Edit {
        match self {
            EditType::Select(e) => e,
            EditType::Move(e) => e,
            EditType::Line(e) => e,
            EditType::StraightLine(e) => e,
            EditType::GridLine(e) => e,
            EditType::Rect(e) => e,
            EditType::FillRect(e) => e,
            EditType::Clear(e) => e,
            EditType::TextEdit(e) => e,
            EditType::BucketFill(e) => e,
            EditType::Paste(e) => e,
            EditType::Pen(e) => e,
        }
    }

    fn as_edit_mut(&mut self) -> &mut dyn Edit {
        match self {
            EditType::Select(e) => e,
            EditType::Move(e) => e,
            EditType::Line(e) => e,
            EditType::StraightLine(e) => e,
            EditType::GridLine(e) => e,
            EditType::Rect(e) => e,
            EditType::FillRect(e) => e,
            EditType::Clear(e) => e,
            EditType::TextEdit(e) => e,
            EditType::BucketFill(e) => e,
            EditType::Paste(e) => e,
            EditType::Pen(e) => e,
        }
    }

    pub fn as_colored(&self) -> Option<&dyn HasColor> {
        match self {
            EditType::Line(e) => Some(e),
            EditType::StraightLine(e) => Some(e),
            EditType::GridLine(e) => Some(e),
            EditType::Rect(e) => Some(e),
            EditType::FillRect(e) => Some(e),
            EditType::TextEdit(e) => Some(e),
            EditType::BucketFill(e) => Some(e),
            EditType::Pen(e) => Some(e),
            EditType::Select(_) | EditType::Move(_) | EditType::Clear(_) | EditType::Paste(_) => {
                None
            }
        }
    }

    pub fn as_colored_mut(&mut self) -> Option<&mut dyn HasColor> {
        match self {
            EditType::Line(e) => Some(e),
            EditType::StraightLine(e) => Some(e),
            EditType::GridLine(e) => Some(e),
            EditType::Rect(e) => Some(e),
            EditType::FillRect(e) => Some(e),
            EditType::TextEdit(e) => Some(e),
            EditType::BucketFill(e) => Some(e),
            EditType::Pen(e) => Some(e),
            EditType::Select(_) | EditType::Move(_) | EditType::Clear(_) | EditType::Paste(_) => {
                None
            }
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextEdit> {
        match self {
            EditType::TextEdit(e) => Some(e),
            _ => None,
        }
    }

    /// Source and destination corners of a region edit, if this is one.
    pub fn region(&self) -> Option<(Point, Point)> {
        match self {
            EditType::Select(e) => match e.points() {
                &[start, end, ..] => Some((start, end)),
                _ => None,
            },
            EditType::Move(e) => match e.points() {
                &[_, _, start, end, ..] => Some((start, end)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Edit for EditType {
    fn name(&self) -> &'static str {
        self.as_edit().name()
    }

    fn points(&self) -> &[Point] {
        self.as_edit().points()
    }

    fn set_point(&mut self, index: usize, point: Point, constrain: bool) {
        self.as_edit_mut().set_point(index, point, constrain)
    }

    fn valid_commit(&self) -> bool {
        self.as_edit().valid_commit()
    }

    fn draw(&self, target: &mut DrawTarget<'_>, mode: DrawMode, edit_id: usize) {
        self.as_edit().draw(target, mode, edit_id)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EditType {
                fn from(edit: $variant) -> Self {
                    EditType::$variant(edit)
                }
            }
        )*
    };
}

impl_from_variant!(
    Select,
    Move,
    Line,
    StraightLine,
    GridLine,
    Rect,
    FillRect,
    Clear,
    TextEdit,
    BucketFill,
    Paste,
    Pen,
);
