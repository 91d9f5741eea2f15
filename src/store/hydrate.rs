// rosterhub/src/store/hydrate.rs
//
// Startup hydration and invariant repair. Repair is a deliberate, logged
// operation the caller invokes after loading, never a hidden side effect of
// deserialization.

use super::TeamStore;
use crate::models::{Role, Snapshot};
use log::{info, warn};

impl TeamStore {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let store = Self {
            teams: snapshot.teams,
            active_team_id: snapshot.active_team_id,
            current_player_id: snapshot.current_player_id,
            logged_in: snapshot.logged_in,
            user_email: snapshot.user_email,
            user_phone: snapshot.user_phone,
            pending_selection: snapshot.pending_selection,
            legacy_players: snapshot.legacy_players,
        };
        info!("Hydrated store with {} teams", store.teams.len());
        store
    }

    // Repair the no-admin invariant: any team with players but no admin gets
    // its first player promoted. Idempotent; every promotion is logged.
    // Returns the (team, player) pairs that were promoted.
    pub fn repair_missing_admin(&mut self) -> Vec<(String, String)> {
        let mut promoted = Vec::new();
        for team in &mut self.teams {
            if !team.missing_admin() {
                continue;
            }
            if let Some(player) = team.players.first_mut() {
                player.roles.push(Role::Admin);
                warn!(
                    "Repair: team {} had no admin; promoted player {}",
                    team.id, player.id
                );
                promoted.push((team.id.clone(), player.id.clone()));
            }
        }
        promoted
    }
}
