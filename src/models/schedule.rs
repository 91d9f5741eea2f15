// rosterhub/src/models/schedule.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// How a game's or event's invitations get released to the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseOption {
    #[serde(rename = "now")]
    Now,
    #[serde(rename = "scheduled")]
    Scheduled,
    #[serde(rename = "none")]
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InviteRelease {
    pub option: ReleaseOption,
    pub release_date: Option<DateTime<Utc>>,
    // Flips false -> true at most once per fixture; guards the sweep
    pub invites_sent: bool,
}

impl Default for InviteRelease {
    fn default() -> Self {
        Self {
            option: ReleaseOption::None,
            release_date: None,
            invites_sent: false,
        }
    }
}

impl InviteRelease {
    // A scheduled release whose date has passed and hasn't fired yet
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.invites_sent
            && self.option == ReleaseOption::Scheduled
            && self.release_date.map_or(false, |d| d <= now)
    }
}

// Derived invite-lifecycle state for a game or event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteState {
    Draft,
    Invited,
    ReleaseScheduled,
    Released,
}

pub(crate) fn invite_state(invited: &[String], release: &InviteRelease) -> InviteState {
    if release.invites_sent {
        InviteState::Released
    } else if release.option == ReleaseOption::Scheduled && release.release_date.is_some() {
        InviteState::ReleaseScheduled
    } else if !invited.is_empty() {
        InviteState::Invited
    } else {
        InviteState::Draft
    }
}

// One response enum serves both fixture kinds: games read it as
// checked-in/checked-out, events as confirmed/declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rsvp {
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "declined")]
    Declined,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    pub opponent: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub invited: Vec<String>,
    pub responses: HashMap<String, Rsvp>,
    pub release: InviteRelease,
}

impl Game {
    pub fn new(opponent: &str, starts_at: DateTime<Utc>, location: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            opponent: opponent.to_string(),
            starts_at,
            location,
            invited: Vec::new(),
            responses: HashMap::new(),
            release: InviteRelease::default(),
        }
    }

    pub fn invite_state(&self) -> InviteState {
        invite_state(&self.invited, &self.release)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub invited: Vec<String>,
    pub responses: HashMap<String, Rsvp>,
    pub release: InviteRelease,
}

impl Event {
    pub fn new(title: &str, starts_at: DateTime<Utc>, location: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            starts_at,
            location,
            invited: Vec::new(),
            responses: HashMap::new(),
            release: InviteRelease::default(),
        }
    }

    pub fn invite_state(&self) -> InviteState {
        invite_state(&self.invited, &self.release)
    }
}
