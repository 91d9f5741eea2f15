// rosterhub/src/utils/mod.rs
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod identifier;
pub mod snapshot_storage;

// Credential hashing. Secrets are stored only as salted bcrypt hashes and
// compared through `verify`, which returns a boolean verdict.
pub mod password {
    use crate::models::StorageError;
    use bcrypt::{hash, verify, DEFAULT_COST};

    pub fn hash_credential(secret: &str) -> Result<String, StorageError> {
        Ok(hash(secret, DEFAULT_COST)?)
    }

    pub fn verify_credential(secret: &str, credential_hash: &str) -> Result<bool, StorageError> {
        Ok(verify(secret, credential_hash)?)
    }
}

// Environment-driven configuration
pub mod config {
    use super::*;

    // Get the snapshot directory from the environment or use the default
    pub fn storage_dir() -> PathBuf {
        env::var("ROSTERHUB_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./storage"))
    }
}

// Ensure the storage directory exists
pub fn ensure_storage_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        log::info!("Creating storage directory: {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
