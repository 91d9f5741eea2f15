// rosterhub/src/store/mod.rs
//
// The central entity store. One explicitly constructed `TeamStore` holds the
// full team collection plus the session; there is no global instance. The
// store is normalized: the active team is an id into `teams`, never a second
// copy, so the persisted collection can't diverge from the working state.
//
// Structural misuse (an unknown team/player/fixture id) is a logged no-op,
// not an error; callers validate preconditions themselves.

use crate::models::{
    Event, Game, GameLogEntry, Photo, Player, PlayerStatus, PendingTeamSelection, Role, Snapshot,
    Team, TeamSettings,
};
use crate::utils::identifier::{self, Identifier};
use crate::utils::snapshot_storage;
use log::{debug, error, info, warn};
use std::path::Path;

pub mod auth;
pub mod hydrate;
pub mod invites;
pub mod mailbox;
pub mod payments;

pub struct TeamStore {
    pub(crate) teams: Vec<Team>,
    pub(crate) active_team_id: Option<String>,
    pub(crate) current_player_id: Option<String>,
    pub(crate) logged_in: bool,
    pub(crate) user_email: Option<String>,
    pub(crate) user_phone: Option<String>,
    pub(crate) pending_selection: Option<PendingTeamSelection>,
    pub(crate) legacy_players: Vec<Player>,
}

impl Default for TeamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamStore {
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            active_team_id: None,
            current_player_id: None,
            logged_in: false,
            user_email: None,
            user_phone: None,
            pending_selection: None,
            legacy_players: Vec::new(),
        }
    }

    // ---- session -----------------------------------------------------------

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn pending_selection(&self) -> Option<&PendingTeamSelection> {
        self.pending_selection.as_ref()
    }

    // Teardown at logout: session fields are cleared, team data is kept
    pub fn logout(&mut self) {
        info!("Logging out current player");
        self.active_team_id = None;
        self.current_player_id = None;
        self.logged_in = false;
        self.pending_selection = None;
    }

    // ---- team collection ---------------------------------------------------

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub(crate) fn team_mut(&mut self, team_id: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    pub fn active_team(&self) -> Option<&Team> {
        let id = self.active_team_id.as_deref()?;
        self.teams.iter().find(|t| t.id == id)
    }

    pub(crate) fn active_team_mut(&mut self) -> Option<&mut Team> {
        let id = self.active_team_id.clone()?;
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn active_team_id(&self) -> Option<&str> {
        self.active_team_id.as_deref()
    }

    // Create a new team seeded with one admin player and activate it
    pub fn create_team(&mut self, name: &str, settings: TeamSettings, admin: Player) -> String {
        let admin_id = admin.id.clone();
        let team = Team::new(name, settings, admin);
        let team_id = team.id.clone();
        info!("Created team: {} ({})", name, team_id);
        self.teams.push(team);
        self.active_team_id = Some(team_id.clone());
        self.current_player_id = Some(admin_id);
        team_id
    }

    // Import a downloaded team (join-existing-team flow). An existing team
    // with the same id is replaced wholesale.
    pub fn import_team(&mut self, team: Team) -> String {
        let team_id = team.id.clone();
        if let Some(existing) = self.teams.iter_mut().find(|t| t.id == team_id) {
            info!("Replacing existing team from import: {}", team_id);
            *existing = team;
        } else {
            info!("Imported team: {} ({})", team.name, team_id);
            self.teams.push(team);
        }
        team_id
    }

    pub fn remove_team(&mut self, team_id: &str) {
        let before = self.teams.len();
        self.teams.retain(|t| t.id != team_id);
        if self.teams.len() == before {
            debug!("remove_team: no team with id {}", team_id);
            return;
        }
        if self.active_team_id.as_deref() == Some(team_id) {
            self.active_team_id = None;
            self.current_player_id = None;
        }
        info!("Removed team: {}", team_id);
    }

    // ---- team switcher -----------------------------------------------------

    // Load the given team as the working team and re-resolve the current
    // player by matching the session's known email/phone against its roster.
    pub fn switch_team(&mut self, team_id: &str) {
        if self.team(team_id).is_none() {
            debug!("switch_team: no team with id {}", team_id);
            return;
        }
        self.active_team_id = Some(team_id.to_string());
        self.current_player_id = self.resolve_session_player(team_id);
        if self.current_player_id.is_none() {
            warn!(
                "switch_team: session identifiers match no player on team {}",
                team_id
            );
        }
        info!("Switched active team to {}", team_id);
    }

    // Match the session's known identifiers against a team's roster
    pub(crate) fn resolve_session_player(&self, team_id: &str) -> Option<String> {
        let team = self.team(team_id)?;
        if let Some(email) = self.user_email.as_deref() {
            let ident = Identifier::Email(identifier::normalize_email(email));
            if let Some(p) = team.players.iter().find(|p| ident.matches(p)) {
                return Some(p.id.clone());
            }
        }
        if let Some(phone) = self.user_phone.as_deref() {
            let ident = Identifier::Phone(identifier::normalize_phone(phone));
            if let Some(p) = team.players.iter().find(|p| ident.matches(p)) {
                return Some(p.id.clone());
            }
        }
        None
    }

    // ---- players -----------------------------------------------------------

    pub fn current_player(&self) -> Option<&Player> {
        let team = self.active_team()?;
        team.player(self.current_player_id.as_deref()?)
    }

    pub fn current_player_id(&self) -> Option<&str> {
        self.current_player_id.as_deref()
    }

    pub fn add_player(&mut self, player: Player) -> Option<String> {
        let team = match self.active_team_mut() {
            Some(t) => t,
            None => {
                debug!("add_player: no active team");
                return None;
            }
        };
        let player_id = player.id.clone();
        info!("Adding player {} to team {}", player.full_name(), team.id);
        team.players.push(player);
        Some(player_id)
    }

    pub fn update_player(&mut self, player: Player) {
        let team = match self.active_team_mut() {
            Some(t) => t,
            None => return,
        };
        match team.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player,
            None => debug!("update_player: no player with id {}", player.id),
        }
    }

    pub fn remove_player(&mut self, player_id: &str) {
        if let Some(team) = self.active_team_mut() {
            team.players.retain(|p| p.id != player_id);
        }
        if self.current_player_id.as_deref() == Some(player_id) {
            self.current_player_id = None;
        }
    }

    pub fn set_player_status(&mut self, player_id: &str, status: PlayerStatus) {
        if let Some(player) = self
            .active_team_mut()
            .and_then(|t| t.player_mut(player_id))
        {
            player.status = status;
        }
    }

    pub fn add_role(&mut self, player_id: &str, role: Role) {
        if let Some(player) = self
            .active_team_mut()
            .and_then(|t| t.player_mut(player_id))
        {
            if !player.roles.contains(&role) {
                player.roles.push(role);
                info!("Granted {:?} to player {}", role, player_id);
            }
        }
    }

    pub fn remove_role(&mut self, player_id: &str, role: Role) {
        if let Some(player) = self
            .active_team_mut()
            .and_then(|t| t.player_mut(player_id))
        {
            player.roles.retain(|r| *r != role);
        }
    }

    pub fn set_delivery_token(&mut self, player_id: &str, token: &str) {
        if let Some(player) = self
            .active_team_mut()
            .and_then(|t| t.player_mut(player_id))
        {
            player.delivery_token = Some(token.to_string());
        }
    }

    // Append-only: the game log never rewrites existing entries
    pub fn append_game_log(&mut self, player_id: &str, entry: GameLogEntry) {
        if let Some(player) = self
            .active_team_mut()
            .and_then(|t| t.player_mut(player_id))
        {
            player.game_log.push(entry);
        }
    }

    pub fn record_stat(&mut self, player_id: &str, key: &str, value: f64) {
        if let Some(player) = self
            .active_team_mut()
            .and_then(|t| t.player_mut(player_id))
        {
            player.stats.insert(key.to_string(), value);
        }
    }

    // ---- role accessors ----------------------------------------------------

    pub fn has_role(&self, player_id: &str, role: Role) -> bool {
        self.active_team()
            .and_then(|t| t.player(player_id))
            .map_or(false, |p| p.has_role(role))
    }

    pub fn is_admin(&self, player_id: &str) -> bool {
        self.has_role(player_id, Role::Admin)
    }

    // ---- games & events ----------------------------------------------------

    pub fn add_game(&mut self, game: Game) -> Option<String> {
        let team = self.active_team_mut()?;
        let game_id = game.id.clone();
        team.games.push(game);
        Some(game_id)
    }

    pub fn update_game(&mut self, game: Game) {
        if let Some(team) = self.active_team_mut() {
            match team.games.iter_mut().find(|g| g.id == game.id) {
                Some(existing) => *existing = game,
                None => debug!("update_game: no game with id {}", game.id),
            }
        }
    }

    pub fn remove_game(&mut self, game_id: &str) {
        if let Some(team) = self.active_team_mut() {
            team.games.retain(|g| g.id != game_id);
        }
    }

    pub fn add_event(&mut self, event: Event) -> Option<String> {
        let team = self.active_team_mut()?;
        let event_id = event.id.clone();
        team.events.push(event);
        Some(event_id)
    }

    pub fn update_event(&mut self, event: Event) {
        if let Some(team) = self.active_team_mut() {
            match team.events.iter_mut().find(|e| e.id == event.id) {
                Some(existing) => *existing = event,
                None => debug!("update_event: no event with id {}", event.id),
            }
        }
    }

    pub fn remove_event(&mut self, event_id: &str) {
        if let Some(team) = self.active_team_mut() {
            team.events.retain(|e| e.id != event_id);
        }
    }

    // ---- photos & settings -------------------------------------------------

    pub fn add_photo(&mut self, photo: Photo) -> Option<String> {
        let team = self.active_team_mut()?;
        let photo_id = photo.id.clone();
        team.photos.push(photo);
        Some(photo_id)
    }

    pub fn remove_photo(&mut self, photo_id: &str) {
        if let Some(team) = self.active_team_mut() {
            team.photos.retain(|p| p.id != photo_id);
        }
    }

    pub fn update_settings(&mut self, settings: TeamSettings) {
        if let Some(team) = self.active_team_mut() {
            team.settings = settings;
        }
    }

    pub fn rename_team(&mut self, name: &str) {
        if let Some(team) = self.active_team_mut() {
            team.name = name.to_string();
        }
    }

    // Bump the season record counters
    pub fn record_game_result(&mut self, won: bool, tied: bool) {
        if let Some(team) = self.active_team_mut() {
            if tied {
                team.settings.season_ties += 1;
            } else if won {
                team.settings.season_wins += 1;
            } else {
                team.settings.season_losses += 1;
            }
        }
    }

    // ---- persistence -------------------------------------------------------

    // Assemble the persisted document. The store is normalized, so this is a
    // plain read of the collection; nothing needs folding back first.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            teams: self.teams.clone(),
            active_team_id: self.active_team_id.clone(),
            current_player_id: self.current_player_id.clone(),
            logged_in: self.logged_in,
            user_email: self.user_email.clone(),
            user_phone: self.user_phone.clone(),
            pending_selection: self.pending_selection.clone(),
            legacy_players: self.legacy_players.clone(),
        }
    }

    // The replace-snapshot boundary exposed to the external sync collaborator
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        *self = Self::from_snapshot(snapshot);
    }

    // Fire-and-forget write-back: failures are logged and swallowed, the
    // in-memory state stays authoritative for the running session.
    pub fn persist(&self, dir: &Path) {
        if let Err(e) = snapshot_storage::save_snapshot(dir, &self.snapshot()) {
            error!("Failed to persist snapshot: {}", e);
        }
    }
}
