// rosterhub/src/services/sync.rs
//
// Seam for the external cross-device sync collaborator. The core never
// resolves merge conflicts; its whole boundary is "push what I have" and
// "download a team". Invoked around registration and invitation acceptance.

use crate::models::{Snapshot, SyncError, Team};
use crate::store::TeamStore;
use log::{info, warn};

pub trait RemoteSync {
    fn push(&self, snapshot: &Snapshot) -> Result<(), SyncError>;
    fn download(&self, team_id: &str) -> Result<Team, SyncError>;
}

// Push the local state so teammates can download the team. Failures are
// reported, not retried; the in-memory store stays authoritative.
pub fn share_state(store: &TeamStore, sync: &dyn RemoteSync) -> Result<(), SyncError> {
    let snapshot = store.snapshot();
    match sync.push(&snapshot) {
        Ok(()) => {
            info!("Pushed snapshot to sync service");
            Ok(())
        }
        Err(e) => {
            warn!("Snapshot push failed: {}", e);
            Err(e)
        }
    }
}

// Invitation-acceptance flow: download the team, import it, and make it the
// working team. The current player is re-resolved from the session's known
// email/phone against the downloaded roster.
pub fn join_team(
    store: &mut TeamStore,
    sync: &dyn RemoteSync,
    team_id: &str,
) -> Result<String, SyncError> {
    let team = sync.download(team_id)?;
    let team_id = store.import_team(team);
    store.switch_team(&team_id);
    info!("Joined team {} from sync service", team_id);
    Ok(team_id)
}
