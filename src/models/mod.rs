// rosterhub/src/models/mod.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

pub mod messaging;
pub use messaging::*;

pub mod payments;
pub use payments::*;

pub mod schedule;
pub use schedule::*;

// Team model: owns every collection for one club
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub settings: TeamSettings,
    pub players: Vec<Player>,
    pub games: Vec<Game>,
    pub events: Vec<Event>,
    pub photos: Vec<Photo>,
    pub notifications: Vec<Notification>,
    pub chat_messages: Vec<ChatMessage>,
    pub payment_periods: Vec<PaymentPeriod>,
    // Per-player high-water mark for chat reads; only ever moves forward
    pub chat_last_read: HashMap<String, DateTime<Utc>>,
}

impl Team {
    // Create a new team seeded with one admin player
    pub fn new(name: &str, settings: TeamSettings, mut admin: Player) -> Self {
        if !admin.roles.contains(&Role::Admin) {
            admin.roles.push(Role::Admin);
        }
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            settings,
            players: vec![admin],
            games: Vec::new(),
            events: Vec::new(),
            photos: Vec::new(),
            notifications: Vec::new(),
            chat_messages: Vec::new(),
            payment_periods: Vec::new(),
            chat_last_read: HashMap::new(),
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    // True when the roster has players but none carries the admin role
    pub fn missing_admin(&self) -> bool {
        !self.players.is_empty() && !self.players.iter().any(|p| p.has_role(Role::Admin))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TeamSettings {
    pub sport: String,
    pub jersey_home_color: Option<String>,
    pub jersey_away_color: Option<String>,
    pub track_attendance: bool,
    pub track_payments: bool,
    pub payment_methods: Vec<String>,
    pub season_wins: u32,
    pub season_losses: u32,
    pub season_ties: u32,
    // Opaque media reference; never fetched or validated here
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "captain")]
    Captain,
    #[serde(rename = "coach")]
    Coach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "reserve")]
    Reserve,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        PlayerStatus::Active
    }
}

// Player model. An empty role set is an ordinary member, not an error.
// A player is "registered" once a credential hash is stored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub credential_hash: Option<String>,
    pub security_question: Option<String>,
    pub security_answer_hash: Option<String>,
    pub jersey_number: Option<String>,
    pub positions: Vec<String>,
    pub roles: Vec<Role>,
    pub status: PlayerStatus,
    pub stats: HashMap<String, f64>,
    // Append-only per-game history
    pub game_log: Vec<GameLogEntry>,
    pub avatar: Option<String>,
    pub delivery_token: Option<String>,
}

impl Player {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            credential_hash: None,
            security_question: None,
            security_answer_hash: None,
            jersey_number: None,
            positions: Vec::new(),
            roles: Vec::new(),
            status: PlayerStatus::Active,
            stats: HashMap::new(),
            game_log: Vec::new(),
            avatar: None,
            delivery_token: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_registered(&self) -> bool {
        self.credential_hash.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameLogEntry {
    pub game_id: String,
    pub date: DateTime<Utc>,
    pub stats: HashMap<String, f64>,
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Photo {
    pub id: String,
    // Opaque reference string into external media storage
    pub reference: String,
    pub caption: Option<String>,
    pub uploaded_by: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(reference: &str, caption: Option<String>, uploaded_by: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            reference: reference.to_string(),
            caption,
            uploaded_by,
            uploaded_at: Utc::now(),
        }
    }
}

// Recorded when a login matches the same identifier across several teams;
// no team is activated until the user picks one.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PendingTeamSelection {
    pub identifier: String,
    pub candidate_team_ids: Vec<String>,
}

// The persisted document: the full team collection plus session state.
// "Active" is just an id into `teams`, so the collection can never hold a
// stale copy of the active team.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub active_team_id: Option<String>,
    pub current_player_id: Option<String>,
    pub logged_in: bool,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    pub pending_selection: Option<PendingTeamSelection>,
    // Pre-multi-team accounts that were never scoped to a team
    #[serde(default)]
    pub legacy_players: Vec<Player>,
}

// Versioned envelope written to disk around the snapshot
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SnapshotEnvelope {
    pub version: u32,
    pub checksum: String,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn {
        player_id: String,
        // None for legacy unscoped accounts
        team_id: Option<String>,
    },
    MultipleTeams {
        team_count: usize,
        candidate_team_ids: Vec<String>,
    },
}

// Login failure kinds. User-facing text lives only in `user_message` so the
// internal taxonomy is not coupled to UI copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    NotFound,
    NotRegistered,
    IncorrectCredential,
}

impl LoginError {
    // Presentation-boundary mapping. Distinguishing "no account" from "wrong
    // credential" is a deliberate UX choice carried over from the product.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoginError::NotFound => "No account found for that email or phone number",
            LoginError::NotRegistered => {
                "That player hasn't created an account yet. Create an account first."
            }
            LoginError::IncorrectCredential => "Incorrect password",
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoginError::NotFound => write!(f, "NotFound"),
            LoginError::NotRegistered => write!(f, "NotRegistered"),
            LoginError::IncorrectCredential => write!(f, "IncorrectCredential"),
        }
    }
}

impl std::error::Error for LoginError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    NotFound,
    AlreadyRegistered,
}

impl RegisterError {
    pub fn user_message(&self) -> &'static str {
        match self {
            RegisterError::NotFound => "No invited player matches that email or phone number",
            RegisterError::AlreadyRegistered => "An account already exists for that player",
        }
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegisterError::NotFound => write!(f, "NotFound"),
            RegisterError::AlreadyRegistered => write!(f, "AlreadyRegistered"),
        }
    }
}

impl std::error::Error for RegisterError {}

// Storage-layer faults
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Credential(bcrypt::BcryptError),
    UnsupportedVersion(u32),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serde(e) => write!(f, "Serialization error: {}", e),
            StorageError::Credential(e) => write!(f, "Credential error: {}", e),
            StorageError::UnsupportedVersion(v) => {
                write!(f, "Unsupported snapshot version: {}", v)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e)
    }
}

impl From<bcrypt::BcryptError> for StorageError {
    fn from(e: bcrypt::BcryptError) -> Self {
        StorageError::Credential(e)
    }
}

// Remote sync collaborator faults
#[derive(Debug)]
pub enum SyncError {
    Unavailable(String),
    NotFound,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncError::Unavailable(msg) => write!(f, "Sync service unavailable: {}", msg),
            SyncError::NotFound => write!(f, "Team not found on sync service"),
        }
    }
}

impl std::error::Error for SyncError {}
