//! The canvas seam used by the shape builder.

use crate::draw::Shape;
use std::fmt;

/// Identifier of an object registered on a canvas.
///
/// Ids increase monotonically and are never reused within one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer cursor requested from the embedding surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Auto,
    Crosshair,
    Text,
}

/// How the canvas interprets pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Pointer gestures go to the shape builder
    #[default]
    Drawing,
    /// Pointer gestures select and move existing objects
    Selection,
    /// Pointer gestures go to the free-drawing brush
    FreeDrawing,
}

/// Operations the drag shape builder needs from the canvas it draws on.
pub trait HostCanvas {
    /// Registers a shape and returns its id.
    fn add(&mut self, shape: Shape) -> ObjectId;

    /// Removes an object, returning it if it was present.
    fn remove(&mut self, id: ObjectId) -> Option<Shape>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut Shape>;

    /// Currently selected object, if any.
    fn active_object(&self) -> Option<ObjectId>;

    fn set_active_object(&mut self, id: Option<ObjectId>);

    /// Schedules a repaint of the surface.
    fn request_render(&mut self);

    fn set_cursor(&mut self, cursor: Cursor);

    /// Signals the end of a pointer gesture to listeners.
    fn gesture_completed(&mut self);
}
