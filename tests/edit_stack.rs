use raster_paint::edit::{FillRect, Select, TextEdit};
use raster_paint::history::EditSlot;
use raster_paint::{Color, DirtyLevel, EditStack, EditType, Point};

fn fill(x: i32) -> EditType {
    FillRect::new(Point::new(x, 0), Point::new(x, 1), Color::RED).into()
}

/// Stack with `n` committed edits and nothing pending.
fn committed(n: i32) -> EditStack {
    let mut stack = EditStack::new();
    for x in 0..n {
        stack.start_new_edit(Some(fill(x)));
    }
    stack.start_new_edit(None);
    stack.consume_dirty();
    stack
}

fn accounted(stack: &EditStack) -> usize {
    stack.edits().len() + stack.redo_edits().len() + usize::from(stack.pending_edit().is_some())
}

#[test]
fn test_start_new_edit_commits_previous() {
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(fill(0)));
    assert_eq!(stack.consume_dirty(), DirtyLevel::PendingEdit);
    stack.start_new_edit(Some(fill(1)));
    assert_eq!(stack.edits(), &[fill(0)]);
    assert_eq!(stack.pending_edit(), Some(&fill(1)));
    assert_eq!(stack.consume_dirty(), DirtyLevel::LastEdit);
}

#[test]
fn test_undo_alternates_between_pending_and_history() {
    let mut stack = committed(3);

    stack.undo_edit();
    assert_eq!(stack.pending_edit(), Some(&fill(2)));
    assert_eq!(stack.edits().len(), 2);
    assert_eq!(stack.consume_dirty(), DirtyLevel::AllEdits);

    stack.undo_edit();
    assert_eq!(stack.pending_edit(), None);
    assert_eq!(stack.redo_edits(), &[fill(2)]);
    assert_eq!(stack.consume_dirty(), DirtyLevel::PendingEdit);

    stack.undo_edit();
    stack.undo_edit();
    assert_eq!(stack.edits(), &[fill(0)]);
    // Most recently undone first
    assert_eq!(stack.redo_edits(), &[fill(1), fill(2)]);
}

#[test]
fn test_undo_never_loses_edits() {
    let mut stack = committed(4);
    for _ in 0..12 {
        stack.undo_edit();
        assert_eq!(accounted(&stack), 4);
    }
    assert!(stack.edits().is_empty());
    assert!(stack.pending_edit().is_none());
    assert_eq!(stack.redo_edits().len(), 4);

    // Nothing left to undo
    stack.consume_dirty();
    stack.undo_edit();
    assert_eq!(stack.consume_dirty(), DirtyLevel::None);
}

#[test]
fn test_redo_restores_in_order() {
    let mut stack = committed(3);
    for _ in 0..4 {
        stack.undo_edit();
    }
    assert_eq!(stack.redo_edits(), &[fill(1), fill(2)]);
    stack.consume_dirty();

    stack.redo_edit(0);
    assert_eq!(stack.pending_edit(), Some(&fill(1)));
    assert_eq!(stack.consume_dirty(), DirtyLevel::PendingEdit);

    stack.redo_edit(0);
    assert_eq!(stack.edits(), &[fill(0), fill(1)]);
    assert_eq!(stack.pending_edit(), Some(&fill(2)));
    assert_eq!(stack.consume_dirty(), DirtyLevel::LastEdit);

    // Out of range is ignored
    stack.redo_edit(0);
    assert_eq!(stack.consume_dirty(), DirtyLevel::None);
}

#[test]
fn test_invalid_pending_is_not_undone() {
    let mut stack = committed(1);
    stack.start_new_edit(Some(Select::new(Point::ZERO, Point::ZERO).into()));
    stack.undo_edit();
    // The empty selection is replaced by the reopened edit
    assert_eq!(stack.pending_edit(), Some(&fill(0)));
    assert!(stack.redo_edits().is_empty());
}

#[test]
fn test_select_edit_rewinds_and_keeps_branch() {
    let mut stack = committed(5);
    stack.select_edit(2);
    assert_eq!(stack.edits(), &[fill(0), fill(1)]);
    assert_eq!(stack.pending_edit(), Some(&fill(2)));
    assert_eq!(stack.post_edits(), &[fill(3), fill(4)]);
    assert_eq!(stack.consume_dirty(), DirtyLevel::AllEdits);

    let slots: Vec<EditSlot> = stack.edit_list().iter().map(|e| e.slot).collect();
    assert_eq!(
        slots,
        vec![
            EditSlot::Committed,
            EditSlot::Committed,
            EditSlot::Pending,
            EditSlot::Post,
            EditSlot::Post,
        ]
    );
}

#[test]
fn test_select_edit_noops() {
    let mut stack = committed(3);
    stack.select_edit(1);
    stack.consume_dirty();

    // Already the pending edit
    stack.select_edit(1);
    assert_eq!(stack.consume_dirty(), DirtyLevel::None);
    // Past the end of the listing
    stack.select_edit(3);
    assert_eq!(stack.consume_dirty(), DirtyLevel::None);
    assert_eq!(stack.pending_edit(), Some(&fill(1)));
}

#[test]
fn test_branch_recovered_without_new_edit() {
    let mut stack = committed(5);
    stack.select_edit(2);
    stack.start_new_edit(None);
    stack.select_last_edit();
    assert_eq!(stack.edits(), &[fill(0), fill(1), fill(2), fill(3)]);
    assert_eq!(stack.pending_edit(), Some(&fill(4)));
    assert!(stack.post_edits().is_empty());
}

#[test]
fn test_branch_recovered_after_new_edit() {
    let mut stack = committed(5);
    stack.select_edit(2);
    stack.start_new_edit(Some(fill(9)));
    stack.select_last_edit();
    assert_eq!(stack.edits(), &[fill(0), fill(1), fill(2), fill(9), fill(3)]);
    assert_eq!(stack.pending_edit(), Some(&fill(4)));
}

#[test]
fn test_select_next_edit_walks_history() {
    let mut stack = committed(5);
    stack.select_next_edit(true);
    assert_eq!(stack.pending_edit(), Some(&fill(4)));
    stack.select_next_edit(true);
    assert_eq!(stack.pending_edit(), Some(&fill(3)));
    assert_eq!(stack.post_edits(), &[fill(4)]);

    stack.select_next_edit(false);
    assert_eq!(stack.pending_edit(), Some(&fill(4)));
    assert!(stack.post_edits().is_empty());

    // Nothing ahead
    stack.consume_dirty();
    stack.select_next_edit(false);
    assert_eq!(stack.consume_dirty(), DirtyLevel::None);
}

#[test]
fn test_control_point_cycle_and_drag() {
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(FillRect::new(Point::ZERO, Point::new(4, 4), Color::RED).into()));
    stack.set_next_control_point(false);
    assert_eq!(stack.control_point(), 1);
    stack.set_next_control_point(false);
    assert_eq!(stack.control_point(), 0);
    stack.set_next_control_point(true);
    assert_eq!(stack.control_point(), 1);

    stack.move_control_point_by(Point::new(2, 1));
    stack.move_control_point_to(Point::new(10, 3), true);
    let expected: EditType = FillRect::new(Point::ZERO, Point::new(10, 10), Color::RED).into();
    assert_eq!(stack.pending_edit(), Some(&expected));
}

#[test]
fn test_color_and_text_go_to_pending() {
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(TextEdit::new(Point::new(1, 1), 12, Color::BLACK).into()));
    assert!(stack.edit_text(|editor| editor.type_text("hello")));
    stack.set_color(Color::BLUE);
    assert_eq!(stack.pending_color(), Some(Color::BLUE));

    stack.start_new_edit(Some(fill(0)));
    assert_eq!(stack.edits().len(), 1);
    assert!(!stack.edit_text(|editor| editor.type_text("ignored")));
}

#[test]
fn test_select_counts_invalid_pending_slot() {
    let mut stack = committed(4);
    stack.select_edit(1);
    stack.start_new_edit(Some(Select::new(Point::ZERO, Point::ZERO).into()));
    assert_eq!(stack.edits(), &[fill(0), fill(1)]);

    let list = stack.edit_list();
    assert_eq!(list[2].slot, EditSlot::Pending);
    assert_eq!(list[3].slot, EditSlot::Post);

    // Selecting the pending slot itself changes nothing
    stack.select_edit(2);
    assert_eq!(stack.pending_edit(), Some(&EditType::from(Select::new(Point::ZERO, Point::ZERO))));

    stack.select_edit(3);
    assert_eq!(stack.edits(), &[fill(0), fill(1)]);
    assert_eq!(stack.pending_edit(), Some(&fill(2)));
    assert_eq!(stack.post_edits(), &[fill(3)]);
}

#[test]
fn test_step_forward_past_invalid_pending() {
    let mut stack = committed(3);
    stack.select_edit(0);
    stack.start_new_edit(Some(Select::new(Point::ZERO, Point::ZERO).into()));
    stack.select_next_edit(false);
    assert_eq!(stack.edits(), &[fill(0)]);
    assert_eq!(stack.pending_edit(), Some(&fill(1)));
    assert_eq!(stack.post_edits(), &[fill(2)]);
}
