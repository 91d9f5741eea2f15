// rosterhub/src/utils/snapshot_storage.rs
use crate::models::{Snapshot, SnapshotEnvelope, StorageError};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;
const SNAPSHOT_FILE: &str = "snapshot.json";

pub fn snapshot_path(dir: &Path) -> PathBuf {
    dir.join(SNAPSHOT_FILE)
}

// Content hash over the serialized snapshot body
pub fn checksum(snapshot: &Snapshot) -> Result<String, StorageError> {
    let body = serde_json::to_vec(snapshot)?;
    let mut hasher = Sha256::new();
    hasher.update(&body);
    Ok(format!("{:x}", hasher.finalize()))
}

// Write the snapshot, wrapped in a versioned, checksummed envelope.
// An unchanged checksum skips the write entirely.
pub fn save_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<(), StorageError> {
    super::ensure_storage_dir(dir)?;

    let checksum = checksum(snapshot)?;
    let path = snapshot_path(dir);

    if let Ok(Some(existing)) = read_envelope(&path) {
        if existing.checksum == checksum {
            debug!("Snapshot unchanged, skipping write");
            return Ok(());
        }
    }

    let envelope = SnapshotEnvelope {
        version: SNAPSHOT_VERSION,
        checksum,
        snapshot: snapshot.clone(),
    };

    let json = serde_json::to_string_pretty(&envelope)?;
    fs::write(&path, json)?;
    debug!("Saved snapshot to {}", path.display());
    Ok(())
}

// Load the persisted snapshot, if any. A checksum mismatch is logged and
// tolerated so a torn write doesn't drop the whole session; an unknown
// version is rejected since migration is handled elsewhere.
pub fn load_snapshot(dir: &Path) -> Result<Option<Snapshot>, StorageError> {
    let path = snapshot_path(dir);
    let envelope = match read_envelope(&path)? {
        Some(envelope) => envelope,
        None => {
            info!("No snapshot found at {}", path.display());
            return Ok(None);
        }
    };

    if envelope.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion(envelope.version));
    }

    match checksum(&envelope.snapshot) {
        Ok(computed) if computed != envelope.checksum => {
            warn!(
                "Snapshot checksum mismatch (expected {}, got {}); loading anyway",
                envelope.checksum, computed
            );
        }
        Err(e) => warn!("Failed to verify snapshot checksum: {}", e),
        _ => {}
    }

    Ok(Some(envelope.snapshot))
}

fn read_envelope(path: &Path) -> Result<Option<SnapshotEnvelope>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
