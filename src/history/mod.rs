//! Edit history: committed edits, the pending edit, the preserved forward
//! branch and the redo list.

mod dirty;

pub use dirty::DirtyLevel;

use crate::color::Color;
use crate::edit::{Edit, EditType, HasColor};
use crate::point::Point;
use crate::text_editor::TextEditor;

/// Where an entry of [`EditStack::edit_list`] lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSlot {
    Committed,
    Pending,
    Post,
}

/// One row of a history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEntry {
    /// Position accepted by [`EditStack::select_edit`] and [`EditStack::remove_edit`].
    pub index: usize,
    pub name: &'static str,
    pub slot: EditSlot,
}

/// Manages the history of edits and the dirty signal for the render loop.
#[derive(Debug, Clone, Default)]
pub struct EditStack {
    /// Committed edits, oldest first
    edits: Vec<EditType>,
    /// The edit currently being manipulated
    pending_edit: Option<EditType>,
    /// Edits ahead of the history cursor after rewinding
    post_edits: Vec<EditType>,
    /// Edits explicitly undone, most recent first
    redo_edits: Vec<EditType>,
    /// Control point of the pending edit being dragged
    control_point: usize,
    dirty: DirtyLevel,
}

impl EditStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stack from restored lists. The whole raster must be replayed.
    pub fn from_parts(
        edits: Vec<EditType>,
        pending_edit: Option<EditType>,
        post_edits: Vec<EditType>,
        redo_edits: Vec<EditType>,
    ) -> Self {
        Self {
            edits,
            pending_edit,
            post_edits,
            redo_edits,
            control_point: 0,
            dirty: DirtyLevel::AllEdits,
        }
    }

    pub fn edits(&self) -> &[EditType] {
        &self.edits
    }

    pub fn pending_edit(&self) -> Option<&EditType> {
        self.pending_edit.as_ref()
    }

    pub fn post_edits(&self) -> &[EditType] {
        &self.post_edits
    }

    pub fn redo_edits(&self) -> &[EditType] {
        &self.redo_edits
    }

    pub fn control_point(&self) -> usize {
        self.control_point
    }

    pub fn dirty(&self) -> DirtyLevel {
        self.dirty
    }

    pub fn raise_dirty(&mut self, level: DirtyLevel) {
        self.dirty = self.dirty.max(level);
    }

    /// Hand the accumulated level to the render loop and reset it.
    pub fn consume_dirty(&mut self) -> DirtyLevel {
        std::mem::take(&mut self.dirty)
    }

    /// Color of the pending edit, if it has one.
    pub fn pending_color(&self) -> Option<Color> {
        self.pending_edit
            .as_ref()
            .and_then(EditType::as_colored)
            .map(|edit| edit.color())
    }

    /// Nearest handle of the pending edit within `control_size` on both axes.
    pub fn find_control_point(&self, point: Point, control_size: i32) -> Option<usize> {
        let pending = self.pending_edit.as_ref()?;
        let (index, delta) = pending
            .points()
            .iter()
            .map(|&p| p - point)
            .enumerate()
            .min_by_key(|(_, delta)| delta.magnitude2())?;
        let reach = Point::splat(control_size);
        (delta.at_most(reach) && delta.at_least(-reach)).then_some(index)
    }

    pub fn set_control_point(&mut self, index: usize) {
        if self.pending_edit.is_none() {
            return;
        }
        self.control_point = index;
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    /// Cycle the active handle forward, or backward with `previous`.
    pub fn set_next_control_point(&mut self, previous: bool) {
        let Some(pending) = &self.pending_edit else {
            return;
        };
        let count = pending.points().len();
        if count == 0 {
            return;
        }
        self.control_point = if previous {
            (self.control_point + count - 1) % count
        } else {
            (self.control_point + 1) % count
        };
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    pub fn move_control_point_to(&mut self, point: Point, constrain: bool) {
        let Some(pending) = &mut self.pending_edit else {
            return;
        };
        pending.set_point(self.control_point, point, constrain);
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    pub fn move_control_point_by(&mut self, delta: Point) {
        let Some(pending) = &mut self.pending_edit else {
            return;
        };
        if let Some(&current) = pending.points().get(self.control_point) {
            pending.set_point(self.control_point, current + delta, false);
        }
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    pub fn set_color(&mut self, color: Color) {
        let Some(pending) = &mut self.pending_edit else {
            return;
        };
        if let Some(colored) = pending.as_colored_mut() {
            colored.set_color(color);
        }
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    /// Run `f` against the pending text edit's editor. Returns false when
    /// the pending edit is not text.
    pub fn edit_text(&mut self, f: impl FnOnce(&mut TextEditor)) -> bool {
        let Some(text) = self.pending_edit.as_mut().and_then(EditType::as_text_mut) else {
            return false;
        };
        f(text.editor_mut());
        self.raise_dirty(DirtyLevel::PendingEdit);
        true
    }

    fn pending_is_valid(&self) -> bool {
        self.pending_edit.as_ref().is_some_and(|edit| edit.valid_commit())
    }

    /// Move a valid pending edit onto the committed list. An invalid one stays put.
    fn commit_pending_edit(&mut self) {
        if !self.pending_is_valid() {
            return;
        }
        if let Some(edit) = self.pending_edit.take() {
            self.edits.push(edit);
            self.raise_dirty(DirtyLevel::LastEdit);
        }
    }

    /// Commit the pending edit if valid and install `edit` in its place.
    /// An invalid pending edit is discarded.
    pub fn start_new_edit(&mut self, edit: Option<EditType>) {
        self.commit_pending_edit();
        self.pending_edit = edit;
        self.control_point = 0;
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    /// Discard a valid pending edit into the front of the redo list.
    pub fn undo_pending_edit(&mut self) {
        if !self.pending_is_valid() {
            return;
        }
        if let Some(edit) = self.pending_edit.take() {
            self.redo_edits.insert(0, edit);
            self.raise_dirty(DirtyLevel::PendingEdit);
        }
    }

    /// Undo the pending edit if it is valid, otherwise reopen the last
    /// committed edit as pending.
    pub fn undo_edit(&mut self) {
        if self.pending_is_valid() {
            self.undo_pending_edit();
        } else if let Some(edit) = self.edits.pop() {
            self.pending_edit = Some(edit);
            self.control_point = 0;
            self.raise_dirty(DirtyLevel::AllEdits);
        }
    }

    /// Commit the pending edit and reopen redo entry `index` as pending.
    pub fn redo_edit(&mut self, index: usize) {
        if index >= self.redo_edits.len() {
            return;
        }
        self.commit_pending_edit();
        self.pending_edit = Some(self.redo_edits.remove(index));
        self.control_point = 0;
        self.raise_dirty(DirtyLevel::PendingEdit);
    }

    /// Rewind so that entry `index` of `edits ++ [pending] ++ post_edits`
    /// becomes the pending edit. Later edits are kept in `post_edits`.
    /// An invalid pending edit is discarded, so entries after it shift down.
    pub fn select_edit(&mut self, index: usize) {
        if index == self.edits.len() && self.pending_edit.is_some() {
            return;
        }
        let total = self.edits.len() + usize::from(self.pending_edit.is_some()) + self.post_edits.len();
        if index >= total {
            return;
        }
        let mut index = index;
        if self.pending_edit.is_some() && !self.pending_is_valid() {
            self.pending_edit = None;
            if index > self.edits.len() {
                index -= 1;
            }
        }
        self.commit_pending_edit();
        let mut combined = std::mem::take(&mut self.edits);
        combined.append(&mut self.post_edits);
        let mut rest = combined.split_off(index);
        self.edits = combined;
        self.pending_edit = if rest.is_empty() { None } else { Some(rest.remove(0)) };
        self.post_edits = rest;
        self.control_point = 0;
        self.raise_dirty(DirtyLevel::AllEdits);
        log::debug!(
            "Selected edit {} of {} ({} ahead)",
            index,
            total,
            self.post_edits.len()
        );
    }

    /// Step the history cursor one edit back, or forward into `post_edits`.
    pub fn select_next_edit(&mut self, previous: bool) {
        if previous {
            if self.edits.is_empty() {
                return;
            }
            self.select_edit(self.edits.len() - 1);
        } else {
            if self.post_edits.is_empty() {
                return;
            }
            self.select_edit(self.edits.len() + usize::from(self.pending_edit.is_some()));
        }
    }

    /// Fold `post_edits` back into history and reopen the newest edit.
    pub fn select_last_edit(&mut self) {
        if self.post_edits.is_empty() && (self.pending_edit.is_some() || self.edits.is_empty()) {
            return;
        }
        self.commit_pending_edit();
        self.edits.append(&mut self.post_edits);
        self.pending_edit = self.edits.pop();
        self.control_point = 0;
        self.raise_dirty(DirtyLevel::AllEdits);
    }

    /// Delete entry `index` of `edits ++ [pending] ++ post_edits`.
    pub fn remove_edit(&mut self, index: usize) {
        self.commit_pending_edit();
        if index < self.edits.len() {
            self.edits.remove(index);
            self.raise_dirty(DirtyLevel::AllEdits);
            return;
        }
        let offset = self.edits.len() + usize::from(self.pending_edit.is_some());
        match index.checked_sub(offset) {
            Some(post) if post < self.post_edits.len() => {
                self.post_edits.remove(post);
                self.raise_dirty(DirtyLevel::PendingEdit);
            }
            _ if index == self.edits.len() && self.pending_edit.is_some() => {
                self.pending_edit = None;
                self.control_point = 0;
                self.raise_dirty(DirtyLevel::PendingEdit);
            }
            _ => {}
        }
    }

    /// Summary of every edit in history order.
    pub fn edit_list(&self) -> Vec<EditEntry> {
        let committed = self.edits.iter().map(|edit| (edit, EditSlot::Committed));
        let pending = self.pending_edit.iter().map(|edit| (edit, EditSlot::Pending));
        let post = self.post_edits.iter().map(|edit| (edit, EditSlot::Post));
        committed
            .chain(pending)
            .chain(post)
            .enumerate()
            .map(|(index, (edit, slot))| EditEntry {
                index,
                name: edit.name(),
                slot,
            })
            .collect()
    }
}
