//! Snapshot persistence: the whole store state as one JSON document in a
//! durable local slot.
//!
//! The embedder loads once at startup and saves after every mutation; the
//! core only defines the slot contract and tolerates an absent document
//! (first run).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use orbit_shared::constants::{DATA_DIR_ENV, SNAPSHOT_FILE};

use crate::error::{Result, StoreError};
use crate::state::StoreState;

/// A durable slot holding at most one persisted [`StoreState`].
pub trait SnapshotSlot {
    /// Read the persisted document, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<StoreState>>;

    /// Overwrite the slot with the given document.
    fn save(&self, state: &StoreState) -> Result<()>;
}

/// JSON-file slot in the platform data directory.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Open the default application slot.
    ///
    /// The file is placed in the platform-appropriate data directory
    /// (e.g. `~/.local/share/orbit/orbit.json` on Linux), overridable with
    /// the `ORBIT_DATA_DIR` environment variable.
    pub fn new() -> Result<Self> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("app", "orbit", "orbit")
                .ok_or(StoreError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)?;

        let path = data_dir.join(SNAPSHOT_FILE);
        tracing::info!(path = %path.display(), "opening snapshot slot");
        Ok(Self { path })
    }

    /// Open a slot at an explicit path. Useful for tests and for embedding
    /// the store inside custom directory layouts.
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSlot for FileSlot {
    fn load(&self) -> Result<Option<StoreState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&raw)?;
        Ok(Some(state))
    }

    fn save(&self, state: &StoreState) -> Result<()> {
        let raw = serde_json::to_string(state)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
