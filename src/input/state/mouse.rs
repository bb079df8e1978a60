use crate::canvas::{HostCanvas, InteractionMode};
use crate::input::events::MouseButton;
use crate::util::Point;
use log::trace;

use super::InputState;

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `x` - Pointer X in screen coordinates
    /// * `y` - Pointer Y in screen coordinates
    ///
    /// # Behavior
    /// - Free drawing: starts a brush stroke
    /// - Selection: grabs the topmost object under the pointer
    /// - Drawing: a press on an object selects it and drags it, like the select
    ///   tool. A press on empty space clears the selection, then the builder
    ///   starts a shape (it stays idle while anything is selected)
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            trace!("Ignoring {button:?} press");
            return;
        }
        let pointer = self.canvas.to_scene(Point::new(x, y));
        self.pointer_down = true;

        match self.canvas.mode() {
            InteractionMode::FreeDrawing => self.canvas.brush_down(pointer),
            InteractionMode::Selection => self.canvas.begin_transform(pointer),
            InteractionMode::Drawing => {
                match self.canvas.hit_test(pointer) {
                    Some(_) => self.canvas.begin_transform(pointer),
                    None => {
                        if self.canvas.active_object().is_some() {
                            self.canvas.discard_active_object();
                            let cursor = self.tool_cursor();
                            self.canvas.set_cursor(cursor);
                        }
                    }
                }
                self.builder.on_gesture_start(
                    &mut self.canvas,
                    pointer,
                    self.tool,
                    self.style,
                    &self.text,
                );
            }
        }
    }

    /// Processes pointer motion. Only drags (primary button held) have an effect.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        if !self.pointer_down {
            return;
        }
        let pointer = self.canvas.to_scene(Point::new(x, y));

        match self.canvas.mode() {
            InteractionMode::FreeDrawing => self.canvas.brush_move(pointer),
            InteractionMode::Selection => self.canvas.update_transform(pointer),
            InteractionMode::Drawing if self.canvas.is_transforming() => {
                self.canvas.update_transform(pointer)
            }
            InteractionMode::Drawing => self.builder.on_gesture_update(&mut self.canvas, pointer),
        }
    }

    /// Processes a mouse button release event.
    ///
    /// Brush strokes and object drags take the release position as their
    /// last point. A shape being drawn keeps the size of the last motion. The
    /// builder is told the gesture ended in every mode, so a gesture-completed
    /// event always follows a release.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }
        let pointer = self.canvas.to_scene(Point::new(x, y));
        let was_down = std::mem::replace(&mut self.pointer_down, false);

        match self.canvas.mode() {
            InteractionMode::FreeDrawing => {
                if was_down {
                    self.canvas.brush_move(pointer);
                }
                self.canvas.brush_up();
            }
            // Both are no-ops unless an object was grabbed on press
            InteractionMode::Selection | InteractionMode::Drawing => {
                if was_down {
                    self.canvas.update_transform(pointer);
                }
                self.canvas.end_transform();
            }
        }

        self.builder.on_gesture_end(&mut self.canvas);
    }
}
