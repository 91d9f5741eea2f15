// rosterhub/src/tests/common.rs
use crate::models::{Player, TeamSettings};
use crate::store::TeamStore;

// Low bcrypt cost keeps the suite fast; production code uses DEFAULT_COST
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn hash(secret: &str) -> String {
    bcrypt::hash(secret, TEST_BCRYPT_COST).unwrap()
}

pub fn player(
    first: &str,
    last: &str,
    email: Option<&str>,
    phone: Option<&str>,
    secret: Option<&str>,
) -> Player {
    let mut p = Player::new(first, last);
    p.email = email.map(str::to_string);
    p.phone = phone.map(str::to_string);
    p.credential_hash = secret.map(hash);
    p
}

// Build a store with one team; the first player becomes the seeded admin
pub fn store_with_team(team_name: &str, players: Vec<Player>) -> (TeamStore, String) {
    let mut iter = players.into_iter();
    let admin = iter.next().expect("at least one player");
    let mut store = TeamStore::new();
    let team_id = store.create_team(team_name, TeamSettings::default(), admin);
    for p in iter {
        store.add_player(p);
    }
    (store, team_id)
}
