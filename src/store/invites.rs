// rosterhub/src/store/invites.rs
//
// Invite release per game/event: Draft -> Invited -> ReleaseScheduled ->
// Released. `invites_sent` flips true at most once per fixture, which is
// what makes the caller-invoked sweep idempotent.

use super::TeamStore;
use crate::models::{Notification, ReleaseOption, Rsvp, Team};
use chrono::{DateTime, Utc};
use log::{debug, info};

impl TeamStore {
    // ---- invitees ----------------------------------------------------------

    pub fn add_game_invitees(&mut self, game_id: &str, player_ids: &[String]) {
        if let Some(team) = self.active_team_mut() {
            match team.games.iter_mut().find(|g| g.id == game_id) {
                Some(game) => extend_invited(&mut game.invited, player_ids),
                None => debug!("add_game_invitees: no game with id {}", game_id),
            }
        }
    }

    pub fn add_event_invitees(&mut self, event_id: &str, player_ids: &[String]) {
        if let Some(team) = self.active_team_mut() {
            match team.events.iter_mut().find(|e| e.id == event_id) {
                Some(event) => extend_invited(&mut event.invited, player_ids),
                None => debug!("add_event_invitees: no event with id {}", event_id),
            }
        }
    }

    // ---- release configuration --------------------------------------------

    // Configure how a game's invitations get released. `Now` releases
    // immediately and notifies every currently invited player; `Scheduled`
    // arms the sweep; `None` leaves the game un-released indefinitely.
    pub fn set_game_release(
        &mut self,
        game_id: &str,
        option: ReleaseOption,
        release_date: Option<DateTime<Utc>>,
    ) {
        let team = match self.active_team_mut() {
            Some(t) => t,
            None => return,
        };
        let idx = match team.games.iter().position(|g| g.id == game_id) {
            Some(i) => i,
            None => {
                debug!("set_game_release: no game with id {}", game_id);
                return;
            }
        };
        team.games[idx].release.option = option;
        team.games[idx].release.release_date = release_date;
        if option == ReleaseOption::Now {
            let released = release_game(team, idx);
            info!("Released game {} immediately ({} invites)", game_id, released);
        }
    }

    pub fn set_event_release(
        &mut self,
        event_id: &str,
        option: ReleaseOption,
        release_date: Option<DateTime<Utc>>,
    ) {
        let team = match self.active_team_mut() {
            Some(t) => t,
            None => return,
        };
        let idx = match team.events.iter().position(|e| e.id == event_id) {
            Some(i) => i,
            None => {
                debug!("set_event_release: no event with id {}", event_id);
                return;
            }
        };
        team.events[idx].release.option = option;
        team.events[idx].release.release_date = release_date;
        if option == ReleaseOption::Now {
            let released = release_event(team, idx);
            info!("Released event {} immediately ({} invites)", event_id, released);
        }
    }

    // ---- sweep -------------------------------------------------------------

    // Release every scheduled game and event whose release date has passed.
    // Caller-invoked (e.g. on app foreground), never scheduled internally,
    // and safe to re-run: already-released fixtures are skipped via the
    // `invites_sent` guard. Returns the number of fixtures released.
    pub fn release_due_invites(&mut self, now: DateTime<Utc>) -> usize {
        let mut released = 0;
        for team in &mut self.teams {
            let due_games: Vec<usize> = team
                .games
                .iter()
                .enumerate()
                .filter(|(_, g)| g.release.is_due(now))
                .map(|(i, _)| i)
                .collect();
            for idx in due_games {
                release_game(team, idx);
                released += 1;
            }

            let due_events: Vec<usize> = team
                .events
                .iter()
                .enumerate()
                .filter(|(_, e)| e.release.is_due(now))
                .map(|(i, _)| i)
                .collect();
            for idx in due_events {
                release_event(team, idx);
                released += 1;
            }
        }
        if released > 0 {
            info!("Invite sweep released {} fixtures", released);
        }
        released
    }

    // ---- responses ---------------------------------------------------------

    pub fn set_game_response(&mut self, game_id: &str, player_id: &str, response: Rsvp) {
        if let Some(team) = self.active_team_mut() {
            if let Some(game) = team.games.iter_mut().find(|g| g.id == game_id) {
                if game.invited.iter().any(|id| id == player_id) {
                    game.responses.insert(player_id.to_string(), response);
                } else {
                    debug!("set_game_response: player {} not invited", player_id);
                }
            }
        }
    }

    pub fn set_event_response(&mut self, event_id: &str, player_id: &str, response: Rsvp) {
        if let Some(team) = self.active_team_mut() {
            if let Some(event) = team.events.iter_mut().find(|e| e.id == event_id) {
                if event.invited.iter().any(|id| id == player_id) {
                    event.responses.insert(player_id.to_string(), response);
                } else {
                    debug!("set_event_response: player {} not invited", player_id);
                }
            }
        }
    }
}

fn extend_invited(invited: &mut Vec<String>, player_ids: &[String]) {
    for id in player_ids {
        if !invited.contains(id) {
            invited.push(id.clone());
        }
    }
}

// Mark a game released and notify every invited player. Returns the number
// of notifications emitted; zero when the game was already released.
fn release_game(team: &mut Team, idx: usize) -> usize {
    if team.games[idx].release.invites_sent {
        return 0;
    }
    team.games[idx].release.invites_sent = true;
    let invited = team.games[idx].invited.clone();
    let message = format!(
        "You're invited: {} vs {} on {}",
        team.name,
        team.games[idx].opponent,
        team.games[idx].starts_at.format("%b %-d, %Y %H:%M")
    );
    for player_id in &invited {
        team.notifications
            .push(Notification::new(player_id, "Game invitation", &message));
    }
    invited.len()
}

fn release_event(team: &mut Team, idx: usize) -> usize {
    if team.events[idx].release.invites_sent {
        return 0;
    }
    team.events[idx].release.invites_sent = true;
    let invited = team.events[idx].invited.clone();
    let message = format!(
        "You're invited: {} on {}",
        team.events[idx].title,
        team.events[idx].starts_at.format("%b %-d, %Y %H:%M")
    );
    for player_id in &invited {
        team.notifications
            .push(Notification::new(player_id, "Event invitation", &message));
    }
    invited.len()
}
