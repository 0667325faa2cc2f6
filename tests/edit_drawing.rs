use raster_paint::edit::{Clear, FillRect, Line, Move, Rect};
use raster_paint::{Color, DrawMode, DrawTarget, Edit, PixelBuffer, Point};

fn canvas(width: i32, height: i32) -> PixelBuffer {
    PixelBuffer::new(width, height, Color::WHITE, true)
}

fn painted(pixels: &PixelBuffer, color: Color) -> Vec<Point> {
    (0..pixels.height())
        .flat_map(|y| (0..pixels.width()).map(move |x| Point::new(x, y)))
        .filter(|&p| pixels.get(p) == color)
        .collect()
}

#[test]
fn test_horizontal_line_is_inclusive() {
    let mut pixels = canvas(8, 3);
    let line = Line::new(Point::new(1, 1), Point::new(5, 1), Color::BLACK, 1);
    line.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 0);
    let expected: Vec<Point> = (1..=5).map(|x| Point::new(x, 1)).collect();
    assert_eq!(painted(&pixels, Color::BLACK), expected);
}

#[test]
fn test_diagonal_line_steps_once_per_pixel() {
    let mut pixels = canvas(5, 5);
    let line = Line::new(Point::new(0, 0), Point::new(3, 3), Color::BLACK, 1);
    line.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 0);
    let expected: Vec<Point> = (0..=3).map(|i| Point::new(i, i)).collect();
    assert_eq!(painted(&pixels, Color::BLACK), expected);
}

#[test]
fn test_line_stamps_owner() {
    let mut pixels = canvas(6, 6);
    let line = Line::new(Point::new(0, 2), Point::new(5, 2), Color::BLACK, 1);
    line.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 4);
    assert_eq!(pixels.get_owner(Point::new(2, 0), Point::new(2, 5)), Some(4));
    assert_eq!(pixels.get_owned_by(4).len(), 6);
}

#[test]
fn test_rect_outline_and_fill() {
    let mut pixels = canvas(6, 6);
    Rect::new(Point::new(1, 1), Point::new(4, 4), Color::RED).draw(
        &mut DrawTarget::new(&mut pixels),
        DrawMode::Normal,
        0,
    );
    assert_eq!(painted(&pixels, Color::RED).len(), 12);
    assert_eq!(pixels.get(Point::new(2, 2)), Color::WHITE);

    FillRect::new(Point::new(4, 4), Point::new(1, 1), Color::BLUE).draw(
        &mut DrawTarget::new(&mut pixels),
        DrawMode::Normal,
        1,
    );
    assert_eq!(painted(&pixels, Color::BLUE).len(), 16);
    assert!(painted(&pixels, Color::RED).is_empty());
}

#[test]
fn test_clear_restores_background() {
    let mut pixels = canvas(6, 6);
    FillRect::new(Point::new(0, 0), Point::new(5, 5), Color::RED).draw(
        &mut DrawTarget::new(&mut pixels),
        DrawMode::Normal,
        0,
    );
    Clear::new(Point::new(1, 1), Point::new(2, 2)).draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 1);
    assert_eq!(painted(&pixels, Color::WHITE).len(), 4);
    assert_eq!(pixels.get(Point::new(3, 3)), Color::RED);
}

#[test]
fn test_overlapping_move_is_exact() {
    let mut pixels = canvas(8, 1);
    let shade = |x: i32| Color::from_rgba(10 * x as u8, 0, 0, 255);
    for x in 0..8 {
        pixels.set(Point::new(x, 0), shade(x), 0);
    }

    let mut edit = Move::new(Point::new(0, 0), Point::new(3, 0));
    // Source center is (2, 0); drag it two pixels right.
    edit.set_point(4, Point::new(4, 0), false);
    assert_eq!(edit.delta(), Point::new(2, 0));
    edit.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 1);

    assert_eq!(pixels.get(Point::new(0, 0)), Color::WHITE);
    assert_eq!(pixels.get(Point::new(1, 0)), Color::WHITE);
    for x in 0..4 {
        assert_eq!(pixels.get(Point::new(x + 2, 0)), shade(x));
    }
    assert_eq!(pixels.get(Point::new(6, 0)), shade(6));
    assert_eq!(pixels.get(Point::new(7, 0)), shade(7));
}

#[test]
fn test_move_off_canvas_only_clears() {
    let mut pixels = canvas(4, 4);
    FillRect::new(Point::new(0, 0), Point::new(1, 1), Color::RED).draw(
        &mut DrawTarget::new(&mut pixels),
        DrawMode::Normal,
        0,
    );
    let mut edit = Move::new(Point::new(0, 0), Point::new(1, 1));
    edit.set_point(4, Point::new(50, 50), false);
    edit.draw(&mut DrawTarget::new(&mut pixels), DrawMode::Normal, 1);
    assert!(painted(&pixels, Color::RED).is_empty());
}

#[test]
fn test_pending_move_leaves_source_untouched() {
    let mut source = canvas(6, 6);
    FillRect::new(Point::new(0, 0), Point::new(1, 1), Color::RED).draw(
        &mut DrawTarget::new(&mut source),
        DrawMode::Normal,
        0,
    );
    let mut overlay = PixelBuffer::new(6, 6, Color::CLEAR, false);
    let mut edit = Move::new(Point::new(0, 0), Point::new(1, 1));
    edit.set_point(4, Point::new(4, 4), false);
    edit.draw(&mut DrawTarget::with_source(&mut overlay, &source), DrawMode::Normal, 1);

    assert_eq!(source.get(Point::new(0, 0)), Color::RED);
    assert_eq!(overlay.get(Point::new(0, 0)), Color::WHITE);
    assert_eq!(overlay.get(Point::new(3, 3)), Color::RED);
    assert_eq!(overlay.get(Point::new(4, 4)), Color::RED);
}
