//! Scene export and import.
//!
//! Converts a canvas snapshot into versioned JSON, writes it to disk with
//! locking and optional gzip compression, and reads it back for restoring.

mod options;
mod snapshot;

pub use options::{DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, ExportOptions};
pub use snapshot::{
    CURRENT_VERSION, SceneError, SceneSnapshot, compress_snapshot, decompress_snapshot,
    load_scene, save_scene,
};
