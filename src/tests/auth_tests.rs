// rosterhub/src/tests/auth_tests.rs
use super::common::{player, store_with_team};
use crate::models::{LoginError, LoginOutcome, Player, TeamSettings};
use crate::store::TeamStore;
use crate::utils::identifier::{self, Identifier};

#[test]
fn classify_identifier_phone_and_email() {
    assert_eq!(
        identifier::classify("(555) 123-4567"),
        Identifier::Phone("5551234567".to_string())
    );
    assert_eq!(
        identifier::classify("  Bob@Example.COM "),
        Identifier::Email("bob@example.com".to_string())
    );
    // Digits inside an email address never make it a phone number
    assert_eq!(
        identifier::classify("player1234567@example.com"),
        Identifier::Email("player1234567@example.com".to_string())
    );
    // Too few digits falls through to email classification
    assert_eq!(
        identifier::classify("123456"),
        Identifier::Email("123456".to_string())
    );
}

#[test]
fn login_single_team_activates_it() {
    let (mut store, team_id) = store_with_team(
        "Tigers",
        vec![
            player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
            player("Bob", "Back", Some("bob@example.com"), None, Some("hunter2")),
        ],
    );
    store.logout();

    let outcome = store.login("Bob@Example.com", "hunter2").unwrap();
    let bob_id = store
        .team(&team_id)
        .unwrap()
        .players
        .iter()
        .find(|p| p.first_name == "Bob")
        .unwrap()
        .id
        .clone();

    assert_eq!(
        outcome,
        LoginOutcome::LoggedIn {
            player_id: bob_id.clone(),
            team_id: Some(team_id.clone()),
        }
    );
    assert!(store.is_logged_in());
    assert_eq!(store.active_team_id(), Some(team_id.as_str()));
    assert_eq!(store.current_player_id(), Some(bob_id.as_str()));
    assert!(store.pending_selection().is_none());
}

#[test]
fn login_by_phone_normalizes_digits() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![player("Amy", "Admin", None, Some("555-123-4567"), Some("secret"))],
    );
    store.logout();

    let outcome = store.login("(555) 123 4567", "secret");
    assert!(matches!(outcome, Ok(LoginOutcome::LoggedIn { .. })));
}

#[test]
fn login_unknown_identifier_is_not_found() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![player("Amy", "Admin", Some("amy@example.com"), None, Some("secret"))],
    );
    store.logout();

    let err = store.login("nobody@example.com", "whatever").unwrap_err();
    assert_eq!(err, LoginError::NotFound);
    assert!(!store.is_logged_in());
    assert!(!err.user_message().is_empty());
}

#[test]
fn login_unregistered_player_is_rejected() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![
            player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
            player("Ivy", "Invited", Some("ivy@example.com"), None, None),
        ],
    );
    store.logout();

    let err = store.login("ivy@example.com", "anything").unwrap_err();
    assert_eq!(err, LoginError::NotRegistered);
}

#[test]
fn login_wrong_secret_is_rejected() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![player("Amy", "Admin", Some("amy@example.com"), None, Some("secret"))],
    );
    store.logout();

    let err = store.login("amy@example.com", "wrong").unwrap_err();
    assert_eq!(err, LoginError::IncorrectCredential);
    assert!(!store.is_logged_in());
}

#[test]
fn login_across_two_teams_defers_selection() {
    let mut store = TeamStore::new();
    let tigers = store.create_team(
        "Tigers",
        TeamSettings::default(),
        player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
    );
    let bears = store.create_team(
        "Bears",
        TeamSettings::default(),
        player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
    );
    // Bears is the working team before the ambiguous login
    assert_eq!(store.active_team_id(), Some(bears.as_str()));
    store.logout();
    store.switch_team(&bears);

    let outcome = store.login("amy@example.com", "secret").unwrap();
    match outcome {
        LoginOutcome::MultipleTeams {
            team_count,
            candidate_team_ids,
        } => {
            assert_eq!(team_count, 2);
            assert!(candidate_team_ids.contains(&tigers));
            assert!(candidate_team_ids.contains(&bears));
        }
        other => panic!("expected MultipleTeams, got {:?}", other),
    }

    // No activation happened: the working team is untouched, nothing logged in
    assert_eq!(store.active_team_id(), Some(bears.as_str()));
    assert!(!store.is_logged_in());
    assert!(store.pending_selection().is_some());

    // Picking a candidate finishes the login
    let player_id = store.complete_team_selection(&tigers).unwrap();
    assert!(store.is_logged_in());
    assert_eq!(store.active_team_id(), Some(tigers.as_str()));
    assert_eq!(store.current_player_id(), Some(player_id.as_str()));
    assert!(store.pending_selection().is_none());
}

#[test]
fn complete_selection_rejects_non_candidates() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![player("Amy", "Admin", Some("amy@example.com"), None, Some("secret"))],
    );
    assert!(store.complete_team_selection("no-such-team").is_none());
}

#[test]
fn register_then_login() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![
            player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
            player("Ivy", "Invited", Some("ivy@example.com"), None, None),
        ],
    );
    store.logout();

    let player_id = store
        .register("Ivy@Example.com", "newpass", Some(("First pet?", "rex")))
        .unwrap();

    let outcome = store.login("ivy@example.com", "newpass").unwrap();
    assert!(matches!(
        outcome,
        LoginOutcome::LoggedIn { player_id: ref p, .. } if *p == player_id
    ));
}

#[test]
fn register_twice_is_rejected() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![player("Amy", "Admin", Some("amy@example.com"), None, Some("secret"))],
    );
    let err = store.register("amy@example.com", "other", None).unwrap_err();
    assert_eq!(err, crate::models::RegisterError::AlreadyRegistered);
}

#[test]
fn security_answer_resets_credential() {
    let (mut store, _) = store_with_team(
        "Tigers",
        vec![
            player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
            player("Ivy", "Invited", Some("ivy@example.com"), None, None),
        ],
    );
    store
        .register("ivy@example.com", "oldpass", Some(("First pet?", "rex")))
        .unwrap();
    store.logout();

    assert!(!store.reset_credential("ivy@example.com", "wrong answer", "newpass"));
    assert!(store.reset_credential("ivy@example.com", "rex", "newpass"));

    assert_eq!(
        store.login("ivy@example.com", "oldpass").unwrap_err(),
        LoginError::IncorrectCredential
    );
    assert!(store.login("ivy@example.com", "newpass").is_ok());
}

#[test]
fn legacy_unscoped_players_still_log_in() {
    let mut store = TeamStore::new();
    let mut legacy = Player::new("Old", "Timer");
    legacy.email = Some("old@example.com".to_string());
    legacy.credential_hash = Some(super::common::hash("legacy"));
    let legacy_id = legacy.id.clone();
    store.replace_snapshot(crate::models::Snapshot {
        legacy_players: vec![legacy],
        ..Default::default()
    });

    let outcome = store.login("old@example.com", "legacy").unwrap();
    assert_eq!(
        outcome,
        LoginOutcome::LoggedIn {
            player_id: legacy_id,
            team_id: None,
        }
    );
    assert!(store.is_logged_in());
    assert!(store.active_team_id().is_none());
}
