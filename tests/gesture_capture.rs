use doodle_pad::{DrawingSurface, GestureState, InputEvent, SurfaceConfig, SurfaceError};
use egui::{Pos2, pos2};
use image::Rgba;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

// Surface at density 1 so brush sizes are already in pixels
fn create_test_surface() -> DrawingSurface {
    DrawingSurface::new(&SurfaceConfig::default())
}

fn draw(surface: &mut DrawingSurface, points: &[(f32, f32)]) {
    let (x, y) = points[0];
    surface.on_pointer_down(x, y);
    for &(x, y) in &points[1..] {
        surface.on_pointer_move(x, y);
    }
    surface.on_pointer_up();
}

#[test]
fn test_red_stroke_example() {
    let mut surface = create_test_surface();

    surface.set_color("#FF0000").unwrap();
    surface.on_pointer_down(10.0, 10.0);
    surface.on_pointer_move(20.0, 10.0);
    surface.on_pointer_move(20.0, 20.0);
    surface.on_pointer_up();

    assert_eq!(surface.strokes().len(), 1);
    let stroke = &surface.strokes()[0];
    assert_eq!(stroke.color(), RED);
    assert_eq!(stroke.points(), &[pos2(10.0, 10.0), pos2(20.0, 10.0), pos2(20.0, 20.0)]);
    assert_eq!(stroke.thickness(), 20.0);

    surface.undo();
    assert!(surface.strokes().is_empty());
}

#[test]
fn test_gesture_adds_n_plus_one_points_in_order() {
    let mut surface = create_test_surface();
    let points: Vec<(f32, f32)> = (0..25).map(|i| (i as f32 * 3.0, (i % 4) as f32)).collect();

    draw(&mut surface, &points);

    assert_eq!(surface.strokes().len(), 1);
    let expected: Vec<Pos2> = points.iter().map(|&(x, y)| pos2(x, y)).collect();
    assert_eq!(surface.strokes()[0].points(), expected.as_slice());
}

#[test]
fn test_repeated_points_are_kept() {
    let mut surface = create_test_surface();
    draw(&mut surface, &[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
    assert_eq!(surface.strokes()[0].points().len(), 3);
}

#[test]
fn test_tap_produces_single_point_stroke() {
    let mut surface = create_test_surface();
    surface.on_pointer_down(7.0, 8.0);
    surface.on_pointer_up();

    assert_eq!(surface.strokes().len(), 1);
    assert_eq!(surface.strokes()[0].points(), &[pos2(7.0, 8.0)]);
}

#[test]
fn test_state_machine_transitions() {
    let mut surface = create_test_surface();
    assert_eq!(surface.gesture_state(), GestureState::Idle);
    assert!(surface.active_stroke().is_none());

    assert!(surface.on_pointer_down(1.0, 1.0));
    assert_eq!(surface.gesture_state(), GestureState::Drawing);
    assert_eq!(surface.active_stroke().map(|s| s.points().len()), Some(1));
    assert!(surface.strokes().is_empty());

    assert!(surface.on_pointer_move(2.0, 2.0));
    assert!(surface.on_pointer_up());
    assert_eq!(surface.gesture_state(), GestureState::Idle);
    assert!(surface.active_stroke().is_none());
}

#[test]
fn test_events_while_idle_are_ignored() {
    let mut surface = create_test_surface();
    assert!(!surface.on_pointer_move(3.0, 3.0));
    assert!(!surface.on_pointer_up());
    assert!(!surface.on_pointer_cancel());
    assert!(surface.strokes().is_empty());
    assert!(!surface.take_redraw_request());
}

#[test]
fn test_second_pointer_down_is_ignored() {
    let mut surface = create_test_surface();
    surface.on_pointer_down(1.0, 1.0);
    assert!(!surface.on_pointer_down(50.0, 50.0));
    assert!(!surface.handle_event(InputEvent::SecondaryPointer { position: pos2(60.0, 60.0) }));
    surface.on_pointer_move(2.0, 1.0);
    surface.on_pointer_up();

    assert_eq!(surface.strokes().len(), 1);
    assert_eq!(surface.strokes()[0].points(), &[pos2(1.0, 1.0), pos2(2.0, 1.0)]);
}

#[test]
fn test_cancel_commits_like_up() {
    let mut surface = create_test_surface();
    surface.handle_event(InputEvent::PointerDown { position: pos2(1.0, 2.0) });
    surface.handle_event(InputEvent::PointerMove { position: pos2(3.0, 4.0) });
    assert!(surface.handle_event(InputEvent::PointerCancel));

    assert_eq!(surface.gesture_state(), GestureState::Idle);
    assert_eq!(surface.strokes()[0].points(), &[pos2(1.0, 2.0), pos2(3.0, 4.0)]);
}

#[test]
fn test_every_transition_requests_redraw() {
    let mut surface = create_test_surface();
    assert!(!surface.take_redraw_request());

    surface.on_pointer_down(0.0, 0.0);
    assert!(surface.take_redraw_request());
    assert!(!surface.take_redraw_request());

    surface.on_pointer_move(1.0, 0.0);
    assert!(surface.take_redraw_request());

    surface.on_pointer_up();
    assert!(surface.take_redraw_request());

    surface.undo();
    assert!(surface.take_redraw_request());
}

#[test]
fn test_brush_is_snapshotted_at_pointer_down() {
    let mut surface = create_test_surface();
    surface.on_pointer_down(0.0, 0.0);
    surface.set_color("blue").unwrap();
    surface.set_thickness(5.0);
    surface.on_pointer_move(10.0, 0.0);

    let active = surface.active_stroke().unwrap();
    assert_eq!(active.color(), BLACK);
    assert_eq!(active.thickness(), 20.0);

    surface.on_pointer_up();
    assert_eq!(surface.strokes()[0].color(), BLACK);

    draw(&mut surface, &[(0.0, 0.0)]);
    assert_eq!(surface.strokes()[1].color(), BLUE);
    assert_eq!(surface.strokes()[1].thickness(), 5.0);
}

#[test]
fn test_brush_changes_never_touch_committed_strokes() {
    let mut surface = create_test_surface();
    surface.set_color("#00FF00").unwrap();
    draw(&mut surface, &[(0.0, 0.0), (4.0, 4.0)]);

    surface.set_color("#123456").unwrap();
    surface.set_thickness(1.0);

    assert_eq!(surface.strokes()[0].color(), Rgba([0, 255, 0, 255]));
    assert_eq!(surface.strokes()[0].thickness(), 20.0);
}

#[test]
fn test_invalid_color_is_reported_and_ignored() {
    let mut surface = create_test_surface();
    surface.set_color("#FF0000").unwrap();

    let result = surface.set_color("not-a-color");
    assert!(matches!(result, Err(SurfaceError::Parse(_))));
    assert_eq!(surface.brush().color(), RED);
}

#[test]
fn test_translucent_color_reaches_the_stroke_unchanged() {
    let mut surface = create_test_surface();
    surface.set_color("#01123456").unwrap();
    draw(&mut surface, &[(1.0, 1.0)]);
    assert_eq!(surface.strokes()[0].color(), Rgba([0x12, 0x34, 0x56, 0x01]));
}

#[test]
fn test_thickness_uses_density_and_clamps() {
    let config = SurfaceConfig {
        density: 2.0,
        ..SurfaceConfig::default()
    };
    let mut surface = DrawingSurface::new(&config);
    assert_eq!(surface.brush().thickness(), 40.0);

    surface.set_thickness(10.0);
    assert_eq!(surface.brush().thickness(), 20.0);

    surface.set_density(3.0);
    surface.set_thickness(10.0);
    assert_eq!(surface.brush().thickness(), 30.0);

    surface.set_thickness(0.0);
    assert_eq!(surface.brush().thickness(), 1.0);
    surface.set_thickness(-5.0);
    assert_eq!(surface.brush().thickness(), 1.0);
}
