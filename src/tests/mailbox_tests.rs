// rosterhub/src/tests/mailbox_tests.rs
use super::common::{player, store_with_team};
use crate::models::ChatMessage;
use crate::store::TeamStore;
use chrono::{DateTime, Duration, Utc};

fn chat_store() -> (TeamStore, Vec<String>) {
    let (store, _) = store_with_team(
        "Tigers",
        vec![
            player("Amy", "Admin", Some("amy@example.com"), None, Some("secret")),
            player("Bob", "Back", Some("bob@example.com"), None, Some("hunter2")),
        ],
    );
    let ids = store
        .active_team()
        .unwrap()
        .players
        .iter()
        .map(|p| p.id.clone())
        .collect();
    (store, ids)
}

// Push a chat message with a controlled timestamp
fn post_at(store: &mut TeamStore, sender: &str, text: &str, at: DateTime<Utc>) {
    let mut message = ChatMessage::new(sender, Some(text.to_string()), None, None);
    message.sent_at = at;
    let team_id = store.active_team_id.clone().unwrap();
    store
        .teams
        .iter_mut()
        .find(|t| t.id == team_id)
        .unwrap()
        .chat_messages
        .push(message);
}

#[test]
fn unread_chat_counts_messages_after_the_mark() {
    let (mut store, ids) = chat_store();
    let t = Utc::now();

    post_at(&mut store, &ids[1], "before", t - Duration::minutes(1));
    post_at(&mut store, &ids[1], "after one", t + Duration::minutes(1));
    post_at(&mut store, &ids[1], "after two", t + Duration::minutes(2));

    store.mark_chat_read(&ids[0], t);
    assert_eq!(store.unread_chat_count(&ids[0]), 2);
}

#[test]
fn unread_chat_counts_everything_when_never_read() {
    let (mut store, ids) = chat_store();
    let t = Utc::now();
    post_at(&mut store, &ids[1], "one", t);
    post_at(&mut store, &ids[1], "two", t + Duration::seconds(1));
    // Own messages never count as unread
    post_at(&mut store, &ids[0], "mine", t + Duration::seconds(2));

    assert_eq!(store.unread_chat_count(&ids[0]), 2);
    assert_eq!(store.unread_chat_count(&ids[1]), 1);
}

#[test]
fn chat_read_mark_only_moves_forward() {
    let (mut store, ids) = chat_store();
    let t = Utc::now();
    post_at(&mut store, &ids[1], "one", t + Duration::minutes(1));

    store.mark_chat_read(&ids[0], t + Duration::minutes(5));
    assert_eq!(store.unread_chat_count(&ids[0]), 0);

    // An earlier mark must not rewind the high-water line
    store.mark_chat_read(&ids[0], t);
    assert_eq!(store.unread_chat_count(&ids[0]), 0);
}

#[test]
fn empty_chat_messages_are_dropped() {
    let (mut store, ids) = chat_store();
    assert!(store
        .post_chat_message(&ids[0], Some("  ".to_string()), None, None)
        .is_none());
    assert!(store.post_chat_message(&ids[0], None, None, None).is_none());
    assert!(store
        .post_chat_message(&ids[0], None, Some("photo-ref".to_string()), None)
        .is_some());
    assert_eq!(store.active_team().unwrap().chat_messages.len(), 1);
}

#[test]
fn notification_unread_count_and_read_flag() {
    let (mut store, ids) = chat_store();
    let first = store
        .push_notification(&ids[0], "Game invitation", "vs Sharks")
        .unwrap();
    store
        .push_notification(&ids[0], "Payment due", "Season dues")
        .unwrap();
    store
        .push_notification(&ids[1], "Game invitation", "vs Sharks")
        .unwrap();

    assert_eq!(store.unread_notification_count(&ids[0]), 2);
    assert_eq!(store.unread_notification_count(&ids[1]), 1);

    store.mark_notification_read(&first);
    assert_eq!(store.unread_notification_count(&ids[0]), 1);
}

#[test]
fn notifications_require_a_known_player() {
    let (mut store, _) = chat_store();
    assert!(store
        .push_notification("no-such-player", "title", "body")
        .is_none());
}

#[test]
fn clear_notifications_only_touches_one_player() {
    let (mut store, ids) = chat_store();
    store.push_notification(&ids[0], "a", "a").unwrap();
    store.push_notification(&ids[1], "b", "b").unwrap();

    store.clear_notifications(&ids[0]);
    assert_eq!(store.unread_notification_count(&ids[0]), 0);
    assert_eq!(store.unread_notification_count(&ids[1]), 1);
}
