use egui::{Context, Pos2, Rect};

/// Pointer events as the drawing surface understands them.
///
/// Positions are in surface pixels, relative to the top-left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2 },
    PointerMove { position: Pos2 },
    PointerUp,
    /// The platform aborted the gesture; handled like `PointerUp`
    PointerCancel,
    /// A further finger touched while a gesture is active
    SecondaryPointer { position: Pos2 },
}

/// One frame's worth of primary pointer state, in screen points
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    pub multi_touch: bool,
}

impl PointerSample {
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|input| Self {
            position: input.pointer.latest_pos(),
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
            multi_touch: input.multi_touch().is_some(),
        })
    }
}

/// Handles converting raw egui input into surface [`InputEvent`]s
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    pixels_per_point: f32,
    last_pointer_pos: Option<Pos2>,
    gesture_active: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            canvas_rect,
            pixels_per_point,
            last_pointer_pos: None,
            gesture_active: false,
        }
    }

    /// Update the canvas rectangle and scale (e.g. if window is resized)
    pub fn set_canvas(&mut self, canvas_rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = canvas_rect;
        self.pixels_per_point = pixels_per_point;
    }

    /// Screen point to surface pixel
    pub fn to_surface(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        self.process_sample(PointerSample::from_context(ctx))
    }

    /// Translate a pointer sample. Gestures only start inside the canvas but
    /// keep tracking the pointer once started.
    pub fn process_sample(&mut self, sample: PointerSample) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if sample.multi_touch {
            if let Some(pos) = sample.position {
                events.push(InputEvent::SecondaryPointer {
                    position: self.to_surface(pos),
                });
            }
            return events;
        }

        if sample.pressed && !self.gesture_active {
            if let Some(pos) = sample.position.filter(|pos| self.canvas_rect.contains(*pos)) {
                events.push(InputEvent::PointerDown {
                    position: self.to_surface(pos),
                });
                self.gesture_active = true;
                self.last_pointer_pos = Some(pos);
            }
        } else if self.gesture_active && sample.down {
            if let Some(pos) = sample.position {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        position: self.to_surface(pos),
                    });
                    self.last_pointer_pos = Some(pos);
                }
            }
        }

        if self.gesture_active {
            if sample.released {
                events.push(InputEvent::PointerUp);
                self.end_gesture();
            } else if !sample.down && !sample.pressed {
                // Button state vanished without a release, e.g. focus lost
                events.push(InputEvent::PointerCancel);
                self.end_gesture();
            }
        }

        events
    }

    fn end_gesture(&mut self) {
        self.gesture_active = false;
        self.last_pointer_pos = None;
    }
}
