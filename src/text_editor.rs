//! Single-line text editing state with caret, selection and grouped undo.
//!
//! Offsets are byte indices into the text and always sit on grapheme
//! cluster boundaries, so a caret never splits a user-perceived character.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Caret movement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    WordLeft,
    WordRight,
    LineLeft,
    LineRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct TextState {
    text: String,
    cursor: usize,
    selection_start: usize,
}

// Consecutive operations of the same kind share one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Type,
    Delete,
    Cursor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TextEditorNode", into = "TextEditorNode")]
pub struct TextEditor {
    state: TextState,
    last_kind: EditKind,
    undo_stack: Vec<TextState>,
    redo_stack: Vec<TextState>,
}

// Saved as its plain text; loading replays the text as one insert.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum TextEditorNode {
    TextEditor { wrapped: String },
}

impl From<TextEditorNode> for TextEditor {
    fn from(node: TextEditorNode) -> Self {
        let TextEditorNode::TextEditor { wrapped } = node;
        let mut editor = TextEditor::default();
        editor.type_text(&wrapped);
        editor
    }
}

impl From<TextEditor> for TextEditorNode {
    fn from(editor: TextEditor) -> Self {
        TextEditorNode::TextEditor {
            wrapped: editor.state.text,
        }
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self {
            state: TextState::default(),
            last_kind: EditKind::Cursor,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl PartialEq for TextEditor {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl TextEditor {
    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn selection_start(&self) -> usize {
        self.state.selection_start
    }

    pub fn has_selection(&self) -> bool {
        self.state.cursor != self.state.selection_start
    }

    pub fn selected_text(&self) -> &str {
        let (start, end) = self.selection_range();
        &self.state.text[start..end]
    }

    /// Insert `text` at the caret, replacing any selection.
    pub fn type_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.begin(EditKind::Type);
        self.remove_selection();
        let cursor = self.state.cursor;
        self.state.text.insert_str(cursor, text);
        self.state.cursor = cursor + text.len();
        self.state.selection_start = self.state.cursor;
    }

    /// Delete the selection, or the span between the caret and `direction`.
    pub fn delete(&mut self, direction: Direction) {
        self.begin(EditKind::Delete);
        if self.has_selection() {
            self.remove_selection();
            return;
        }
        let next = self.find_next_cursor(direction);
        let (from, to) = (self.state.cursor.min(next), self.state.cursor.max(next));
        self.state.text.replace_range(from..to, "");
        self.state.cursor = from;
        self.state.selection_start = from;
    }

    pub fn delete_selection(&mut self) {
        self.begin(EditKind::Delete);
        self.remove_selection();
    }

    /// Move the caret. With `select`, the selection anchor stays put.
    pub fn move_cursor(&mut self, direction: Direction, select: bool) {
        self.last_kind = EditKind::Cursor;
        self.state.cursor = self.find_next_cursor(direction);
        if !select {
            self.state.selection_start = self.state.cursor;
        }
    }

    pub fn undo(&mut self) {
        if let Some(previous) = self.undo_stack.pop() {
            self.redo_stack.push(std::mem::replace(&mut self.state, previous));
            self.last_kind = EditKind::Cursor;
        }
    }

    pub fn redo(&mut self) {
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(std::mem::replace(&mut self.state, next));
            self.last_kind = EditKind::Cursor;
        }
    }

    fn begin(&mut self, kind: EditKind) {
        if self.last_kind != kind {
            self.undo_stack.push(self.state.clone());
            self.redo_stack.clear();
        }
        self.last_kind = kind;
    }

    fn selection_range(&self) -> (usize, usize) {
        let (a, b) = (self.state.cursor, self.state.selection_start);
        (a.min(b), a.max(b))
    }

    fn remove_selection(&mut self) {
        if !self.has_selection() {
            return;
        }
        let (start, end) = self.selection_range();
        self.state.text.replace_range(start..end, "");
        self.state.cursor = start;
        self.state.selection_start = start;
    }

    fn find_next_cursor(&self, direction: Direction) -> usize {
        let text = &self.state.text;
        let cursor = self.state.cursor;
        match direction {
            Direction::Left => text[..cursor]
                .grapheme_indices(true)
                .next_back()
                .map_or(0, |(i, _)| i),
            Direction::Right => text[cursor..]
                .graphemes(true)
                .next()
                .map_or(text.len(), |g| cursor + g.len()),
            Direction::WordLeft => text[..cursor]
                .trim_end()
                .rfind(' ')
                .map_or(0, |i| i + 1),
            Direction::WordRight => {
                let rest = text[cursor..].trim_start();
                match rest.find(' ') {
                    Some(i) => text.len() - rest.len() + i,
                    None => text.len(),
                }
            }
            Direction::LineLeft => 0,
            Direction::LineRight => text.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_coalesces_into_one_undo() {
        let mut editor = TextEditor::default();
        editor.type_text("hello");
        editor.type_text(" world");
        assert_eq!(editor.text(), "hello world");
        editor.undo();
        assert_eq!(editor.text(), "");
        editor.redo();
        assert_eq!(editor.text(), "hello world");
    }

    #[test]
    fn test_cursor_move_breaks_group() {
        let mut editor = TextEditor::default();
        editor.type_text("ab");
        editor.move_cursor(Direction::Left, false);
        editor.type_text("X");
        assert_eq!(editor.text(), "aXb");
        editor.undo();
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn test_word_navigation() {
        let mut editor = TextEditor::default();
        editor.type_text("one two  three");
        editor.move_cursor(Direction::WordLeft, false);
        assert_eq!(editor.cursor(), 9);
        editor.move_cursor(Direction::WordLeft, false);
        assert_eq!(editor.cursor(), 4);
        editor.move_cursor(Direction::WordRight, false);
        assert_eq!(editor.cursor(), 7);
        editor.move_cursor(Direction::LineLeft, true);
        assert_eq!(editor.selected_text(), "one two");
    }

    #[test]
    fn test_delete_respects_graphemes() {
        let mut editor = TextEditor::default();
        editor.type_text("ae\u{301}");
        editor.delete(Direction::Left);
        assert_eq!(editor.text(), "a");
        editor.delete(Direction::Right);
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut editor = TextEditor::default();
        editor.type_text("cat");
        editor.move_cursor(Direction::LineLeft, true);
        editor.type_text("dog");
        assert_eq!(editor.text(), "dog");
        assert_eq!(editor.cursor(), 3);
    }
}
