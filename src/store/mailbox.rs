// rosterhub/src/store/mailbox.rs
//
// Notification and chat mailboxes. Notifications are single-target; chat is
// team-global with per-player forward-only read marks.

use super::TeamStore;
use crate::models::{ChatMessage, Notification};
use chrono::{DateTime, Utc};
use log::debug;

impl TeamStore {
    // ---- notifications -----------------------------------------------------

    pub fn push_notification(
        &mut self,
        to_player_id: &str,
        title: &str,
        message: &str,
    ) -> Option<String> {
        let team = self.active_team_mut()?;
        if team.player(to_player_id).is_none() {
            debug!("push_notification: no player with id {}", to_player_id);
            return None;
        }
        let notification = Notification::new(to_player_id, title, message);
        let id = notification.id.clone();
        team.notifications.push(notification);
        Some(id)
    }

    pub fn mark_notification_read(&mut self, notification_id: &str) {
        if let Some(team) = self.active_team_mut() {
            match team
                .notifications
                .iter_mut()
                .find(|n| n.id == notification_id)
            {
                Some(n) => n.read = true,
                None => debug!(
                    "mark_notification_read: no notification with id {}",
                    notification_id
                ),
            }
        }
    }

    pub fn clear_notifications(&mut self, player_id: &str) {
        if let Some(team) = self.active_team_mut() {
            team.notifications.retain(|n| n.to_player_id != player_id);
        }
    }

    pub fn unread_notification_count(&self, player_id: &str) -> usize {
        self.active_team().map_or(0, |team| {
            team.notifications
                .iter()
                .filter(|n| n.to_player_id == player_id && !n.read)
                .count()
        })
    }

    // ---- chat --------------------------------------------------------------

    // Post a team-global message. At least one payload (text, image, or
    // animated image) is required; an empty message is a logged no-op.
    pub fn post_chat_message(
        &mut self,
        sender_id: &str,
        text: Option<String>,
        image: Option<String>,
        animated_image: Option<String>,
    ) -> Option<String> {
        let team = self.active_team_mut()?;
        if team.player(sender_id).is_none() {
            debug!("post_chat_message: no player with id {}", sender_id);
            return None;
        }
        let message = ChatMessage::new(sender_id, text, image, animated_image);
        if !message.has_payload() {
            debug!("post_chat_message: empty message dropped");
            return None;
        }
        let id = message.id.clone();
        team.chat_messages.push(message);
        Some(id)
    }

    // Advance a player's read mark. The mark only ever moves forward in
    // time; an older timestamp is ignored.
    pub fn mark_chat_read(&mut self, player_id: &str, at: DateTime<Utc>) {
        if let Some(team) = self.active_team_mut() {
            let mark = team
                .chat_last_read
                .entry(player_id.to_string())
                .or_insert(at);
            if at > *mark {
                *mark = at;
            }
        }
    }

    // Unread = other-sender messages strictly after the player's read mark,
    // or every other-sender message when the player has never read.
    pub fn unread_chat_count(&self, player_id: &str) -> usize {
        self.active_team().map_or(0, |team| {
            let last_read = team.chat_last_read.get(player_id);
            team.chat_messages
                .iter()
                .filter(|m| m.sender_id != player_id)
                .filter(|m| last_read.map_or(true, |t| m.sent_at > *t))
                .count()
        })
    }
}
