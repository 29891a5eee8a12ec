//! Durable snapshot persistence with time-based expiry.
//!
//! The whole transcript is written as one JSON document after every
//! mutation and read back once at session start. A snapshot older than
//! [`EXPIRATION_MS`] is discarded at load time — that is the only expiry
//! check in the system; nothing expires while the session is running.
//!
//! Persistence is a convenience, not a correctness requirement: write
//! failures are logged and swallowed, and an unreadable or unrecognizable
//! snapshot degrades to an empty transcript instead of failing startup.

use crate::session::types::{PersistedSnapshot, Turn};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshots older than one hour are discarded on load.
pub const EXPIRATION_MS: i64 = 60 * 60 * 1000;

/// Reads and writes the session snapshot file.
pub struct PersistenceGateway {
    path: PathBuf,
}

impl PersistenceGateway {
    /// Gateway over the snapshot file at `path`. Nothing is touched on disk
    /// until the first `save` or `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the transcript, stamped with the current wall-clock time.
    ///
    /// Best-effort: a failed write (full disk, bad permissions) leaves the
    /// session running in memory and is only logged.
    pub fn save(&self, transcript: &[Turn]) {
        self.save_at(transcript, now_millis());
    }

    /// Load the persisted transcript, or an empty one if no usable
    /// snapshot exists. Expired and malformed snapshots are removed.
    pub fn load(&self) -> Vec<Turn> {
        self.load_at(now_millis())
    }

    /// `save` against an explicit clock. Exposed for expiry tests.
    pub fn save_at(&self, transcript: &[Turn], now_ms: i64) {
        if let Err(err) = self.try_save(transcript, now_ms) {
            tracing::warn!("failed to persist session snapshot: {err:#}");
        }
    }

    /// `load` against an explicit clock. Exposed for expiry tests.
    pub fn load_at(&self, now_ms: i64) -> Vec<Turn> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };

        // Defensive parse: a snapshot in an unrecognized shape is treated
        // the same as an absent one.
        let snapshot: PersistedSnapshot = match serde_json::from_str(&data) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!("discarding unrecognizable session snapshot: {err}");
                self.remove();
                return Vec::new();
            }
        };

        let age_ms = now_ms - snapshot.saved_at_epoch_millis;
        if age_ms >= EXPIRATION_MS {
            tracing::debug!(age_ms, "session snapshot expired, starting fresh");
            self.remove();
            return Vec::new();
        }

        snapshot.transcript
    }

    fn try_save(&self, transcript: &[Turn], now_ms: i64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating snapshot directory {}", parent.display()))?;
        }

        let snapshot = PersistedSnapshot {
            transcript: transcript.to_vec(),
            saved_at_epoch_millis: now_ms,
        };
        let data = serde_json::to_string(&snapshot).context("serializing session snapshot")?;

        // Atomic write: temp file then rename, so a crash mid-write never
        // corrupts the snapshot.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &data)
            .with_context(|| format!("writing temp file {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "renaming {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn remove(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::debug!("could not remove stale snapshot: {err}");
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
