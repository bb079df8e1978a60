//! Library exports for the drawboard subsystems.
//!
//! Exposes the canvas, shape model, drag-to-shape builder and arrowhead
//! renderer together with configuration and scene export so that front ends
//! (the `drawboard` binary, an embedding window) share one implementation.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod input;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
