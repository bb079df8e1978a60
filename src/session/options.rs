use crate::config::{CompressionMode, ExportConfig};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB
const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Runtime options derived from configuration for scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    /// Largest payload written or accepted on load
    pub max_file_size_bytes: u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            compression: config.compress,
            auto_compress_threshold_bytes: config.auto_compress_threshold_kb.saturating_mul(1024),
            max_file_size_bytes: config.max_file_size_mb.saturating_mul(1024 * 1024),
        }
    }

    /// Returns a copy using the given compression mode.
    pub fn with_compression(self, compression: CompressionMode) -> Self {
        Self {
            compression,
            ..self
        }
    }

    /// Whether a JSON payload of `len` bytes gets gzip-compressed.
    pub fn should_compress(&self, len: u64) -> bool {
        match self.compression {
            CompressionMode::Off => false,
            CompressionMode::On => true,
            CompressionMode::Auto => len >= self.auto_compress_threshold_bytes,
        }
    }
}
