//! The drawing surface: object registry, selection, viewport and brushes.
//!
//! [`HostCanvas`] is the narrow interface the drag shape builder works
//! against; [`Canvas`] is the full implementation used by the input layer,
//! the CLI and the tests.

pub mod brush;
pub mod events;
pub mod host;
pub mod scene;

pub use brush::{Brush, EraserBrush, PencilBrush};
pub use events::{CanvasEvent, EventBus, SubscriptionId};
pub use host::{Cursor, HostCanvas, InteractionMode, ObjectId};
pub use scene::Canvas;
