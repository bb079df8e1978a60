//! Input handling and tool state machine.
//!
//! This module translates front-end keyboard and mouse events into drawing
//! actions. It holds the active tool and style, the drag-to-shape builder, and
//! the keybinding map used for selection editing and tool shortcuts.

pub mod builder;
pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use builder::{DragSession, DragShapeBuilder};
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::InputState;
pub use tool::Tool;
