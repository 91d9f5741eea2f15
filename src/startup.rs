// rosterhub/src/startup.rs
//
// Explicit init-at-startup lifecycle: environment, logging, storage
// directory, snapshot hydration, invariant repair. The embedding UI calls
// `init` once and owns the returned store.

use crate::models::StorageError;
use crate::store::TeamStore;
use crate::utils::{self, config, snapshot_storage};
use log::{error, info};
use std::path::Path;

pub fn init() -> TeamStore {
    dotenv::dotenv().ok();
    let _ = env_logger::try_init();

    let dir = config::storage_dir();
    init_with_dir(&dir)
}

// Hydrate from the given directory. A missing snapshot or an unsupported
// version yields an empty store; either way the admin repair runs and is
// logged before the store is handed to the caller.
pub fn init_with_dir(dir: &Path) -> TeamStore {
    if let Err(e) = utils::ensure_storage_dir(dir) {
        error!("Failed to create storage directory: {}", e);
    }

    let mut store = match snapshot_storage::load_snapshot(dir) {
        Ok(Some(snapshot)) => TeamStore::from_snapshot(snapshot),
        Ok(None) => TeamStore::new(),
        Err(StorageError::UnsupportedVersion(v)) => {
            error!("Snapshot version {} is not supported; starting empty", v);
            TeamStore::new()
        }
        Err(e) => {
            error!("Failed to load snapshot: {}; starting empty", e);
            TeamStore::new()
        }
    };

    let promoted = store.repair_missing_admin();
    if promoted.is_empty() {
        info!("Startup repair: all teams have an admin");
    } else {
        info!("Startup repair promoted {} player(s) to admin", promoted.len());
    }

    store
}
