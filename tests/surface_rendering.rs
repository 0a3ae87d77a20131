use doodle_pad::{DrawingSurface, SurfaceError};
use image::{Rgba, RgbaImage};
use std::borrow::Cow;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn sized_surface(width: u32, height: u32) -> DrawingSurface {
    let mut surface = DrawingSurface::default();
    surface.resize(width, height);
    surface
}

#[test]
fn test_empty_surface_renders_transparent() {
    let surface = sized_surface(16, 16);
    let frame = surface.render_frame();
    assert_eq!(frame.dimensions(), (16, 16));
    assert!(frame.pixels().all(|p| *p == CLEAR));

    // Unsized surfaces still render
    let frame = DrawingSurface::default().render_frame();
    assert_eq!(frame.dimensions(), (1, 1));
}

#[test]
fn test_tap_renders_visible_dot() {
    let mut surface = sized_surface(50, 50);
    surface.on_pointer_down(10.0, 10.0);
    surface.on_pointer_up();

    let frame = surface.render_frame();
    assert_eq!(frame.get_pixel(10, 10), &BLACK);
    assert_eq!(frame.get_pixel(45, 45), &CLEAR);
}

#[test]
fn test_stroke_path_is_painted() {
    let mut surface = sized_surface(60, 60);
    surface.set_thickness(4.0);
    surface.on_pointer_down(10.0, 10.0);
    surface.on_pointer_move(50.0, 10.0);
    surface.on_pointer_move(50.0, 50.0);
    surface.on_pointer_up();

    let frame = surface.render_frame();
    assert_eq!(frame.get_pixel(30, 10), &BLACK);
    assert_eq!(frame.get_pixel(50, 30), &BLACK);
    assert_eq!(frame.get_pixel(30, 30), &CLEAR);
}

#[test]
fn test_active_stroke_draws_on_top() {
    let mut surface = sized_surface(40, 40);
    surface.on_pointer_down(20.0, 20.0);
    surface.on_pointer_up();

    surface.set_color("red").unwrap();
    surface.on_pointer_down(20.0, 20.0);
    surface.on_pointer_move(21.0, 20.0);

    let frame = surface.render_frame();
    assert_eq!(frame.get_pixel(20, 20), &RED);
    assert_eq!(surface.strokes().len(), 1);
}

#[test]
fn test_render_is_idempotent() {
    let mut surface = sized_surface(30, 30);
    surface.on_pointer_down(5.0, 5.0);
    surface.on_pointer_move(25.0, 25.0);
    surface.on_pointer_up();

    let mut target = RgbaImage::from_pixel(30, 30, RED);
    surface.render(&mut target);
    let first = target.clone();
    surface.render(&mut target);
    assert_eq!(first, target);
    assert_eq!(surface.strokes().len(), 1);
}

#[test]
fn test_background_image_fills_beneath_strokes() {
    let mut surface = sized_surface(40, 40);
    surface.set_background_image(RgbaImage::from_pixel(10, 10, GREEN));
    surface.set_thickness(6.0);
    surface.on_pointer_down(20.0, 20.0);
    surface.on_pointer_up();

    let frame = surface.render_frame();
    assert_eq!(frame.get_pixel(0, 0), &GREEN);
    assert_eq!(frame.get_pixel(39, 39), &GREEN);
    assert_eq!(frame.get_pixel(20, 20), &BLACK);

    surface.clear_background_image();
    assert_eq!(surface.render_frame().get_pixel(0, 0), &CLEAR);
}

#[test]
fn test_background_is_fitted_once_per_surface_size() {
    let mut surface = sized_surface(30, 20);
    surface.set_background_image(RgbaImage::from_pixel(3, 2, GREEN));
    let background = surface.background_image().unwrap();
    assert!(matches!(background.scaled_to(30, 20), Cow::Borrowed(_)));

    surface.resize(60, 40);
    let background = surface.background_image().unwrap();
    assert!(matches!(background.scaled_to(60, 40), Cow::Borrowed(_)));
    assert_eq!(surface.render_frame().get_pixel(59, 39), &GREEN);
}

#[test]
fn test_flatten_is_white_behind_drawing() {
    let mut surface = sized_surface(32, 32);
    surface.on_pointer_down(16.0, 16.0);
    surface.on_pointer_up();

    let output = surface.flatten(32, 32).unwrap();
    assert_eq!(output.dimensions(), (32, 32));
    assert_eq!(output.get_pixel(16, 16), &BLACK);
    assert_eq!(output.get_pixel(0, 0), &WHITE);
}

#[test]
fn test_flatten_twice_is_bit_identical() {
    let mut surface = sized_surface(48, 32);
    surface.set_color("#80FF0000").unwrap();
    surface.on_pointer_down(3.0, 3.0);
    surface.on_pointer_move(40.0, 20.0);
    surface.on_pointer_up();
    surface.on_pointer_down(10.0, 30.0);

    let first = surface.flatten(48, 32).unwrap();
    let second = surface.flatten(48, 32).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!(surface.strokes().len(), 1);
    assert!(surface.active_stroke().is_some());
}

#[test]
fn test_flatten_uses_container_background() {
    let mut surface = sized_surface(8, 8);
    surface.set_container_background(Some(Rgba([10, 20, 30, 255])));
    let output = surface.flatten(8, 8).unwrap();
    assert_eq!(output.get_pixel(4, 4), &Rgba([10, 20, 30, 255]));
}

#[test]
fn test_flatten_scales_to_requested_bounds() {
    let mut surface = sized_surface(20, 20);
    surface.on_pointer_down(10.0, 10.0);
    surface.on_pointer_up();

    let output = surface.flatten(40, 40).unwrap();
    assert_eq!(output.dimensions(), (40, 40));
    let centre = output.get_pixel(20, 20);
    assert!(centre[0] < 8 && centre[1] < 8 && centre[2] < 8, "centre was {:?}", centre);
    assert_eq!(centre[3], 255);
}

#[test]
fn test_flatten_rejects_zero_dimensions() {
    let surface = sized_surface(8, 8);
    assert_eq!(
        surface.flatten(0, 8),
        Err(SurfaceError::InvalidDimensions { width: 0, height: 8 })
    );
    assert!(matches!(surface.flatten(8, 0), Err(SurfaceError::InvalidDimensions { .. })));
}
