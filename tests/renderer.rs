use raster_paint::edit::{FillRect, Line, Select};
use raster_paint::{Color, DirtyLevel, DirtyRect, EditStack, EditorConfig, Point, Renderer};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn renderer() -> Renderer {
    Renderer::new(20, 20, Color::WHITE, Color::CLEAR, 4)
}

#[test]
fn test_commit_draws_last_edit_with_its_index() {
    init();
    let mut renderer = renderer();
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(FillRect::new(Point::new(1, 1), Point::new(3, 3), Color::RED).into()));
    stack.start_new_edit(Some(FillRect::new(Point::new(10, 10), Point::new(12, 12), Color::BLUE).into()));
    stack.start_new_edit(None);

    // Both commits land before the first frame
    let damage = renderer.flush(&mut stack);
    assert_eq!(damage.level, DirtyLevel::LastEdit);
    assert!(!damage.full);
    assert_eq!(damage.committed, Some(DirtyRect::new(Point::new(1, 1), Point::new(12, 12))));
    assert_eq!(renderer.pixels().get(Point::new(11, 11)), Color::BLUE);
    assert_eq!(renderer.pixels().get(Point::new(2, 2)), Color::RED);
    assert_eq!(renderer.footprint(0).len(), 9);
    assert_eq!(renderer.footprint(1).len(), 9);

    stack.start_new_edit(Some(FillRect::new(Point::new(15, 1), Point::new(16, 2), Color::GREEN).into()));
    stack.start_new_edit(None);
    let damage = renderer.flush(&mut stack);
    assert_eq!(damage.committed, Some(DirtyRect::new(Point::new(15, 1), Point::new(16, 2))));
    assert_eq!(renderer.footprint(2).len(), 4);
}

#[test]
fn test_full_replay_assigns_history_owners() {
    init();
    let mut renderer = renderer();
    let mut stack = EditStack::from_parts(
        vec![
            FillRect::new(Point::new(0, 0), Point::new(9, 9), Color::RED).into(),
            FillRect::new(Point::new(5, 5), Point::new(14, 14), Color::BLUE).into(),
        ],
        None,
        Vec::new(),
        Vec::new(),
    );
    let damage = renderer.flush(&mut stack);
    assert_eq!(damage.level, DirtyLevel::AllEdits);
    assert!(damage.full);
    assert_eq!(damage.committed.map(|r| r.size()), Some(Point::new(20, 20)));

    assert_eq!(renderer.pixels().get_owner(Point::new(1, 1), Point::new(1, 1)), Some(0));
    assert_eq!(renderer.pixels().get_owner(Point::new(0, 0), Point::new(6, 6)), Some(1));
    assert_eq!(renderer.footprint(0).len(), 100 - 25);
    assert_eq!(renderer.pick_color(Point::new(7, 7)), Color::BLUE);
    assert_eq!(renderer.pick_color(Point::new(19, 19)), Color::WHITE);
}

#[test]
fn test_undo_replays_without_reopened_edit() {
    init();
    let mut renderer = renderer();
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(FillRect::new(Point::new(1, 1), Point::new(9, 9), Color::RED).into()));
    stack.start_new_edit(None);
    renderer.flush(&mut stack);
    assert_eq!(renderer.pixels().get(Point::new(5, 5)), Color::RED);

    stack.undo_edit();
    let damage = renderer.flush(&mut stack);
    assert!(damage.full);
    assert_eq!(renderer.pixels().get(Point::new(5, 5)), Color::WHITE);
    // The reopened edit now lives in the overlay
    assert_eq!(renderer.overlay().get(Point::new(5, 5)), Color::RED);
}

#[test]
fn test_overlay_damage_covers_previous_frame() {
    init();
    let mut renderer = renderer();
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(Line::new(Point::new(2, 2), Point::new(4, 2), Color::BLACK, 1).into()));
    let first = renderer.flush(&mut stack).overlay.unwrap();

    stack.set_control_point(0);
    stack.move_control_point_to(Point::new(15, 15), false);
    let second = renderer.flush(&mut stack).overlay.unwrap();
    assert!(second.contains(first.min));
    assert!(second.contains(first.max));
    assert_eq!(renderer.overlay().get(Point::new(3, 2)), Color::CLEAR);

    // Removing the pending edit still reports where it was
    stack.start_new_edit(Some(Select::new(Point::ZERO, Point::ZERO).into()));
    stack.start_new_edit(None);
    let damage = renderer.flush(&mut stack);
    assert!(damage.overlay.is_some());
}

#[test]
fn test_handles_are_drawn_around_points() {
    init();
    let mut renderer = renderer();
    let mut stack = EditStack::new();
    stack.start_new_edit(Some(Select::new(Point::new(10, 10), Point::new(10, 10)).into()));
    renderer.flush(&mut stack);
    // Handle box of half-size 2 around the point
    assert_ne!(renderer.overlay().get(Point::new(8, 8)), Color::CLEAR);
    assert_ne!(renderer.overlay().get(Point::new(12, 8)), Color::CLEAR);
    // Smaller box around the active handle
    assert_ne!(renderer.overlay().get(Point::new(9, 9)), Color::CLEAR);
    assert_eq!(renderer.overlay().get(Point::new(10, 13)), Color::CLEAR);
    assert_eq!(renderer.pixels().get(Point::new(9, 9)), Color::WHITE);
}

#[test]
fn test_select_at_reopens_owner() {
    init();
    let mut renderer = renderer();
    let mut stack = EditStack::from_parts(
        vec![
            FillRect::new(Point::new(0, 0), Point::new(3, 3), Color::RED).into(),
            FillRect::new(Point::new(10, 10), Point::new(13, 13), Color::BLUE).into(),
            FillRect::new(Point::new(16, 0), Point::new(19, 3), Color::GREEN).into(),
        ],
        None,
        Vec::new(),
        Vec::new(),
    );
    renderer.flush(&mut stack);

    assert_eq!(renderer.select_at(&mut stack, Point::new(11, 11), Point::new(11, 11)), Some(1));
    assert_eq!(stack.edits().len(), 1);
    assert_eq!(stack.post_edits().len(), 1);
    renderer.flush(&mut stack);

    // Empty spot: back to the newest edit
    assert_eq!(renderer.select_at(&mut stack, Point::new(6, 18), Point::new(6, 18)), None);
    assert_eq!(stack.edits().len(), 2);
    assert!(stack.post_edits().is_empty());
    assert!(stack.pending_edit().is_some());
}

#[test]
fn test_from_config() {
    let config = EditorConfig {
        canvas_width: 32,
        canvas_height: 16,
        ..EditorConfig::default()
    };
    let renderer = Renderer::from_config(&config);
    assert_eq!(renderer.pixels().size(), Point::new(32, 16));
    assert_eq!(renderer.overlay().default_color(), Color::CLEAR);
    assert_eq!(renderer.control_size(), 15);
}
