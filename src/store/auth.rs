// rosterhub/src/store/auth.rs
//
// Identity resolution against one or many teams. Credentials are stored only
// as bcrypt hashes; every comparison goes through `password::verify_credential`
// and yields a boolean verdict, never the secret itself.

use super::TeamStore;
use crate::models::{
    LoginError, LoginOutcome, PendingTeamSelection, RegisterError,
};
use crate::utils::identifier::{self, Identifier};
use crate::utils::password;
use log::{debug, info, warn};

// One identifier match: the owning team (None for legacy unscoped players),
// the player, and the stored credential hash if any.
struct IdentMatch {
    team_id: Option<String>,
    player_id: String,
    credential_hash: Option<String>,
}

impl TeamStore {
    // Resolve an identifier + secret against every team the device knows.
    //
    // A unique match activates that team and logs the player in. The same
    // identifier registered under several teams records a pending selection
    // and reports the candidates without touching the active team.
    pub fn login(&mut self, raw_identifier: &str, secret: &str) -> Result<LoginOutcome, LoginError> {
        let ident = identifier::classify(raw_identifier);
        let matches = self.collect_matches(&ident);

        if matches.is_empty() {
            info!("Login failed: no player matches identifier");
            return Err(LoginError::NotFound);
        }

        if matches.iter().all(|m| m.credential_hash.is_none()) {
            info!("Login failed: matched player has no account yet");
            return Err(LoginError::NotRegistered);
        }

        let valid: Vec<&IdentMatch> = matches
            .iter()
            .filter(|m| {
                m.credential_hash
                    .as_deref()
                    .map_or(false, |h| password::verify_credential(secret, h).unwrap_or(false))
            })
            .collect();

        if valid.is_empty() {
            info!("Login failed: credential mismatch");
            return Err(LoginError::IncorrectCredential);
        }

        // Distinct teams the identifier is registered under
        let mut candidate_team_ids: Vec<String> = Vec::new();
        for m in &matches {
            if let Some(team_id) = &m.team_id {
                if !candidate_team_ids.contains(team_id) {
                    candidate_team_ids.push(team_id.clone());
                }
            }
        }

        if candidate_team_ids.len() > 1 {
            info!(
                "Login matched {} teams; awaiting team selection",
                candidate_team_ids.len()
            );
            self.pending_selection = Some(PendingTeamSelection {
                identifier: ident.as_str().to_string(),
                candidate_team_ids: candidate_team_ids.clone(),
            });
            return Ok(LoginOutcome::MultipleTeams {
                team_count: candidate_team_ids.len(),
                candidate_team_ids,
            });
        }

        let chosen = valid[0];
        let player_id = chosen.player_id.clone();
        let team_id = chosen.team_id.clone();
        self.activate_session(&ident, &player_id, team_id.as_deref());
        info!("Login succeeded for player {}", player_id);
        Ok(LoginOutcome::LoggedIn { player_id, team_id })
    }

    // Complete a pending multi-team login by picking one candidate team.
    // Returns the resolved player id, or None when nothing is pending or the
    // team isn't a candidate (logged no-op).
    pub fn complete_team_selection(&mut self, team_id: &str) -> Option<String> {
        let pending = match &self.pending_selection {
            Some(p) => p.clone(),
            None => {
                debug!("complete_team_selection: nothing pending");
                return None;
            }
        };
        if !pending.candidate_team_ids.iter().any(|id| id == team_id) {
            debug!("complete_team_selection: {} is not a candidate", team_id);
            return None;
        }

        let ident = identifier::classify(&pending.identifier);
        let player_id = self
            .team(team_id)?
            .players
            .iter()
            .find(|p| ident.matches(p))
            .map(|p| p.id.clone());

        match player_id {
            Some(player_id) => {
                self.activate_session(&ident, &player_id, Some(team_id));
                info!("Team selection completed: {}", team_id);
                Some(player_id)
            }
            None => {
                warn!(
                    "complete_team_selection: identifier matches no player on {}",
                    team_id
                );
                None
            }
        }
    }

    // Create an account for an invited (credential-less) player. The optional
    // security question/answer supports the credential-reset flow; the answer
    // is hashed the same way the credential is.
    pub fn register(
        &mut self,
        raw_identifier: &str,
        secret: &str,
        security_qa: Option<(&str, &str)>,
    ) -> Result<String, RegisterError> {
        let ident = identifier::classify(raw_identifier);
        let matches = self.collect_matches(&ident);

        if matches.is_empty() {
            return Err(RegisterError::NotFound);
        }
        let target = match matches.iter().find(|m| m.credential_hash.is_none()) {
            Some(m) => m,
            None => return Err(RegisterError::AlreadyRegistered),
        };

        let credential_hash = match password::hash_credential(secret) {
            Ok(h) => h,
            Err(e) => {
                warn!("register: credential hashing failed: {}", e);
                return Err(RegisterError::NotFound);
            }
        };
        let answer_hash = match security_qa {
            Some((_, answer)) => match password::hash_credential(answer) {
                Ok(h) => Some(h),
                Err(e) => {
                    warn!("register: answer hashing failed: {}", e);
                    None
                }
            },
            None => None,
        };

        let player_id = target.player_id.clone();
        let team_id = target.team_id.clone();
        {
            let player = match team_id.as_deref() {
                Some(tid) => self.team_mut(tid).and_then(|t| t.player_mut(&player_id)),
                None => self.legacy_players.iter_mut().find(|p| p.id == player_id),
            };
            if let Some(player) = player {
                player.credential_hash = Some(credential_hash);
                if let Some((question, _)) = security_qa {
                    player.security_question = Some(question.to_string());
                    player.security_answer_hash = answer_hash;
                }
            }
        }

        self.remember_identifier(&ident);
        info!("Registered account for player {}", player_id);
        Ok(player_id)
    }

    // Security-question recovery: a correct answer replaces the credential
    pub fn reset_credential(&mut self, raw_identifier: &str, answer: &str, new_secret: &str) -> bool {
        if !self.verify_security_answer(raw_identifier, answer) {
            info!("reset_credential: security answer rejected");
            return false;
        }
        let new_hash = match password::hash_credential(new_secret) {
            Ok(h) => h,
            Err(e) => {
                warn!("reset_credential: hashing failed: {}", e);
                return false;
            }
        };
        let ident = identifier::classify(raw_identifier);
        for team in &mut self.teams {
            for player in &mut team.players {
                if ident.matches(player) && player.credential_hash.is_some() {
                    player.credential_hash = Some(new_hash);
                    info!("Credential reset for player {}", player.id);
                    return true;
                }
            }
        }
        for player in &mut self.legacy_players {
            if ident.matches(player) && player.credential_hash.is_some() {
                player.credential_hash = Some(new_hash);
                return true;
            }
        }
        false
    }

    pub fn verify_security_answer(&self, raw_identifier: &str, answer: &str) -> bool {
        let ident = identifier::classify(raw_identifier);
        let all_players = self
            .teams
            .iter()
            .flat_map(|t| t.players.iter())
            .chain(self.legacy_players.iter());
        for player in all_players {
            if !ident.matches(player) {
                continue;
            }
            if let Some(hash) = player.security_answer_hash.as_deref() {
                return password::verify_credential(answer, hash).unwrap_or(false);
            }
        }
        false
    }

    // Scan every team's roster; fall back to the legacy unscoped list only
    // when nothing team-scoped matched.
    fn collect_matches(&self, ident: &Identifier) -> Vec<IdentMatch> {
        let mut matches: Vec<IdentMatch> = Vec::new();
        for team in &self.teams {
            for player in &team.players {
                if ident.matches(player) {
                    matches.push(IdentMatch {
                        team_id: Some(team.id.clone()),
                        player_id: player.id.clone(),
                        credential_hash: player.credential_hash.clone(),
                    });
                }
            }
        }
        if matches.is_empty() {
            for player in &self.legacy_players {
                if ident.matches(player) {
                    matches.push(IdentMatch {
                        team_id: None,
                        player_id: player.id.clone(),
                        credential_hash: player.credential_hash.clone(),
                    });
                }
            }
        }
        matches
    }

    // Activate a session: point the store at the matched team and player,
    // remember the identifier for later team switches, clear any pending
    // selection. The normalized store makes activation a pair of id writes.
    fn activate_session(&mut self, ident: &Identifier, player_id: &str, team_id: Option<&str>) {
        if let Some(team_id) = team_id {
            self.active_team_id = Some(team_id.to_string());
        }
        self.current_player_id = Some(player_id.to_string());
        self.logged_in = true;
        self.pending_selection = None;
        self.remember_identifier(ident);
    }

    fn remember_identifier(&mut self, ident: &Identifier) {
        match ident {
            Identifier::Email(e) => self.user_email = Some(e.clone()),
            Identifier::Phone(p) => self.user_phone = Some(p.clone()),
        }
    }
}
