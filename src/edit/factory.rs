//! Construction of edits from tool gestures.

use super::text::DEFAULT_TEXT_SIZE;
use super::{
    BucketFill, Clear, EditType, FillRect, GridLine, Line, Move, Paste, Pen, Rect, Select,
    StraightLine, TextEdit,
};
use crate::clipboard::PasteData;
use crate::color::Color;
use crate::config::EditorConfig;
use crate::point::Point;

/// Tools an input layer can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Select,
    Move,
    Line,
    StraightLine,
    GridLine,
    Rect,
    FillRect,
    Clear,
    Text,
    ColorPicker,
    BucketFill,
    Paste,
    Pen,
}

impl Tool {
    pub const ALL: [Tool; 13] = [
        Tool::Select,
        Tool::Move,
        Tool::Line,
        Tool::StraightLine,
        Tool::GridLine,
        Tool::Rect,
        Tool::FillRect,
        Tool::Clear,
        Tool::Text,
        Tool::ColorPicker,
        Tool::BucketFill,
        Tool::Paste,
        Tool::Pen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Move => "Move",
            Tool::Line => "Line",
            Tool::StraightLine => "Straight line",
            Tool::GridLine => "Grid",
            Tool::Rect => "Rectangle",
            Tool::FillRect => "Filled rectangle",
            Tool::Clear => "Clear",
            Tool::Text => "Text",
            Tool::ColorPicker => "Color picker",
            Tool::BucketFill => "Bucket fill",
            Tool::Paste => "Paste",
            Tool::Pen => "Pen",
        }
    }

    /// Tools that act on the region of a pending selection.
    pub fn is_region_tool(self) -> bool {
        matches!(self, Tool::Select | Tool::Move | Tool::GridLine | Tool::Clear)
    }
}

/// Session-wide drawing settings handed to every new edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolContext {
    pub color: Color,
    pub thickness: i32,
    pub text_size: i32,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl ToolContext {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            color: Color::BLACK,
            thickness: config.default_thickness.max(1),
            text_size: config.default_text_size.max(1),
        }
    }
}

/// Start an edit for `tool` at `point`. Tools that do not produce edits on
/// their own (the color picker, and paste which needs clipboard data) yield `None`.
pub fn create_edit(tool: Tool, point: Point, ctx: &ToolContext) -> Option<EditType> {
    let edit: EditType = match tool {
        Tool::Select => Select::new(point, point).into(),
        Tool::Move => Move::new(point, point).into(),
        Tool::Line => Line::new(point, point, ctx.color, ctx.thickness).into(),
        Tool::StraightLine => StraightLine::new(point, point, ctx.color, ctx.thickness).into(),
        Tool::GridLine => GridLine::new(point, point, ctx.color).into(),
        Tool::Rect => Rect::new(point, point, ctx.color).into(),
        Tool::FillRect => FillRect::new(point, point, ctx.color).into(),
        Tool::Clear => Clear::new(point, point).into(),
        Tool::Text => TextEdit::new(point, ctx.text_size, ctx.color).into(),
        Tool::BucketFill => BucketFill::new(point, ctx.color).into(),
        Tool::Pen => Pen::new(point, ctx.color, ctx.thickness).into(),
        Tool::ColorPicker | Tool::Paste => return None,
    };
    Some(edit)
}

pub fn create_paste(point: Point, data: PasteData) -> EditType {
    Paste::new(point, data).into()
}

/// Re-create `pending` as a `tool` edit over the same region, so switching
/// from a selection to Move, GridLine or Clear keeps the marquee.
pub fn retarget(tool: Tool, pending: Option<&EditType>, ctx: &ToolContext) -> Option<EditType> {
    let (start, end) = pending?.region()?;
    let edit: EditType = match tool {
        Tool::Select => Select::new(start, end).into(),
        Tool::Move => Move::new(start, end).into(),
        Tool::GridLine => GridLine::new(start, end, ctx.color).into(),
        Tool::Clear => Clear::new(start, end).into(),
        _ => return None,
    };
    Some(edit)
}
