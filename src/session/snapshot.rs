use super::options::ExportOptions;
use crate::draw::{Color, Shape};
use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CURRENT_VERSION: u32 = 1;

/// Captured canvas state suitable for serialisation or restoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub background: Color,
    pub zoom: f64,
    #[serde(default)]
    pub pan: (f64, f64),
    pub objects: Vec<Shape>,
}

/// Failures specific to scene files.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unsupported scene file version {found} (expected {})", CURRENT_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("scene data is {size} bytes which exceeds the limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Serialize, Deserialize)]
struct SceneFile {
    version: u32,
    saved_at: String,
    #[serde(flatten)]
    scene: SceneSnapshot,
}

/// Serialises a snapshot to versioned JSON and gzip-compresses it.
pub fn compress_snapshot(snapshot: &SceneSnapshot) -> Result<Vec<u8>> {
    let json = encode(snapshot)?;
    compress_bytes(&json)
}

/// Parses scene bytes, plain or gzip-compressed.
pub fn decompress_snapshot(bytes: &[u8]) -> Result<SceneSnapshot> {
    let json = if is_gzip(bytes) {
        let mut decoder = GzDecoder::new(bytes);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress scene data")?;
        out
    } else {
        bytes.to_vec()
    };

    let file: SceneFile = serde_json::from_slice(&json).context("failed to parse scene json")?;
    if file.version != CURRENT_VERSION {
        return Err(SceneError::UnsupportedVersion {
            found: file.version,
        }
        .into());
    }
    Ok(file.scene)
}

/// Writes a snapshot to `path`, returning whether it was compressed.
///
/// The payload goes to a temporary file first and is renamed over the target
/// while an exclusive lock is held on `<path>.lock`.
pub fn save_scene(path: &Path, snapshot: &SceneSnapshot, options: &ExportOptions) -> Result<bool> {
    let mut bytes = encode(snapshot)?;
    let size = bytes.len() as u64;
    if size > options.max_file_size_bytes {
        return Err(SceneError::TooLarge {
            size,
            limit: options.max_file_size_bytes,
        }
        .into());
    }

    let compressed = options.should_compress(size);
    if compressed {
        bytes = compress_bytes(&bytes)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create scene directory {}", parent.display()))?;
    }

    let lock_path = lock_path(path);
    let lock_file = open_lock(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock scene file {}", lock_path.display()))?;

    let result = write_atomically(path, &bytes);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock scene file {}: {}",
            lock_path.display(),
            err
        )
    });
    result?;

    info!(
        "Scene saved to {} ({} objects, {} bytes, compression={})",
        path.display(),
        snapshot.objects.len(),
        bytes.len(),
        compressed
    );
    Ok(compressed)
}

/// Reads a snapshot from `path` under a shared lock.
pub fn load_scene(path: &Path, options: &ExportOptions) -> Result<SceneSnapshot> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat scene file {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        return Err(SceneError::TooLarge {
            size: metadata.len(),
            limit: options.max_file_size_bytes,
        })
        .with_context(|| format!("refusing to load {}", path.display()));
    }

    let lock_path = lock_path(path);
    let lock_file = open_lock(&lock_path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let mut bytes = Vec::new();
    let read = File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .with_context(|| format!("failed to read scene file {}", path.display()));

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock scene file {}: {}",
            lock_path.display(),
            err
        )
    });
    read?;

    let snapshot =
        decompress_snapshot(&bytes).with_context(|| format!("invalid scene {}", path.display()))?;
    info!(
        "Loaded scene from {} ({} objects)",
        path.display(),
        snapshot.objects.len()
    );
    Ok(snapshot)
}

fn encode(snapshot: &SceneSnapshot) -> Result<Vec<u8>> {
    let file = SceneFile {
        version: CURRENT_VERSION,
        saved_at: Utc::now().to_rfc3339(),
        scene: snapshot.clone(),
    };
    serde_json::to_vec_pretty(&file).context("failed to serialise scene")
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path);
    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .with_context(|| format!("failed to open temporary file {}", tmp_path.display()))?;

    let result = write_and_rename(&mut tmp_file, &tmp_path, path, bytes);
    if result.is_err() {
        drop(tmp_file);
        if let Err(err) = fs::remove_file(&tmp_path) {
            warn!(
                "Failed to remove temporary scene file {}: {}",
                tmp_path.display(),
                err
            );
        }
    }
    result
}

fn write_and_rename(tmp_file: &mut File, tmp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    tmp_file
        .write_all(bytes)
        .context("failed to write scene payload")?;
    tmp_file
        .sync_all()
        .context("failed to sync temporary scene file")?;

    fs::rename(tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;
    debug!("Renamed {} -> {}", tmp_path.display(), path.display());
    Ok(())
}

fn open_lock(lock_path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open scene lock file {}", lock_path.display()))
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress scene payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed scene payload")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn lock_path(path: &Path) -> PathBuf {
    with_suffix(path, ".lock")
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = with_suffix(target, ".tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = with_suffix(target, &format!(".tmp{counter}"));
    }
    candidate
}
