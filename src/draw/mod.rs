//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types of the board:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`ShapeStyle`]: stroke/fill/opacity attributes carried by each shape
//! - [`Shape`]: vector objects (rectangles, circles, lines, arrows, text, ...)
//! - [`marker`]: the directional arrowhead painter
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod dirty;
pub mod font;
pub mod marker;
pub mod render;
pub mod shape;
pub mod style;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use font::FontDescriptor;
pub use marker::{CustomPaintable, DirectionalMarker, MarkerGeometry, PaintOverrides};
pub use render::{render_background, render_freehand_borrowed, render_shape, render_shapes};
pub use shape::{Shape, ShapeKind, ShapeType, TextOptions};
pub use style::{ShapeStyle, StyleOverrides};

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
