//! Messaging: chat creation with private-pair reuse, message sending,
//! unread bookkeeping, per-user archival, and group membership/admin
//! management.
//!
//! None of the group operations check permissions; the caller is
//! responsible for restricting them to admins and the core trusts it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use orbit_shared::types::{ChatId, MessageId, UserId};

use crate::models::{Chat, ChatKind, Message};
use crate::state::Store;

impl Store {
    /// Create a chat, or reuse the existing private chat for a member pair.
    ///
    /// Reuse matches any private chat whose two members cover the requested
    /// set, order-independent. A reused chat is un-archived for all members
    /// so it reappears in everyone's list. For groups, the first member is
    /// the creator and sole initial admin.
    pub fn create_chat(
        &mut self,
        members: Vec<UserId>,
        kind: ChatKind,
        name: Option<String>,
    ) -> Chat {
        if kind == ChatKind::Private {
            let existing = self.state.chats.iter_mut().find(|c| {
                c.kind == ChatKind::Private
                    && c.members.len() == 2
                    && members.iter().all(|m| c.members.contains(m))
            });
            if let Some(chat) = existing {
                chat.archived_by.clear();
                return chat.clone();
            }
        }

        let now = Utc::now();
        let admins = match kind {
            ChatKind::Group => members.first().copied().into_iter().collect(),
            ChatKind::Private => BTreeSet::new(),
        };
        let chat = Chat {
            id: ChatId::new(),
            kind,
            name,
            image: None,
            members,
            admins,
            archived_by: BTreeSet::new(),
            created_at: now,
            last_message_at: now,
            unread_counts: BTreeMap::new(),
        };

        tracing::info!(chat = %chat.id, ?kind, members = chat.members.len(), "chat created");
        self.state.chats.insert(0, chat.clone());
        chat
    }

    /// Append a message and update the chat's bookkeeping: bump
    /// `last_message_at`, increment every other member's unread counter, and
    /// un-archive the chat for everyone.
    ///
    /// The message is recorded even when the chat id dangles (a late
    /// automated reply after the chat disappeared must not corrupt state);
    /// only the bookkeeping needs the chat to exist.
    pub fn send_message(
        &mut self,
        chat_id: ChatId,
        sender_id: UserId,
        content: String,
        image: Option<String>,
        story_snapshot: Option<String>,
    ) -> Message {
        let message = Message {
            id: MessageId::new(),
            chat_id,
            sender_id,
            content,
            image,
            story_snapshot,
            timestamp: Utc::now(),
        };
        self.state.messages.push(message.clone());

        if let Some(chat) = self.chat_mut(chat_id) {
            chat.last_message_at = message.timestamp;
            let members: Vec<UserId> = chat.members.clone();
            for member in members {
                if member != sender_id {
                    *chat.unread_counts.entry(member).or_insert(0) += 1;
                }
            }
            chat.archived_by.clear();
        }

        tracing::debug!(message = %message.id, chat = %chat_id, sender = %sender_id, "message sent");
        message
    }

    /// Zero the unread counter for one member. Idempotent; invoked whenever
    /// that member's view focuses the chat.
    pub fn mark_chat_read(&mut self, chat_id: ChatId, user_id: UserId) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.unread_counts.insert(user_id, 0);
        }
    }

    /// Hide the chat from this member's own view only.
    pub fn archive_chat(&mut self, chat_id: ChatId, user_id: UserId) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.archived_by.insert(user_id);
        }
    }

    pub fn unarchive_chat(&mut self, chat_id: ChatId, user_id: UserId) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.archived_by.remove(&user_id);
        }
    }

    // ------------------------------------------------------------------
    // Group administration (caller-enforced permissions)
    // ------------------------------------------------------------------

    /// Partial update of group metadata; only provided fields change.
    pub fn update_group_info(
        &mut self,
        chat_id: ChatId,
        name: Option<String>,
        image: Option<String>,
    ) {
        if let Some(chat) = self.chat_mut(chat_id) {
            if let Some(name) = name {
                chat.name = Some(name);
            }
            if let Some(image) = image {
                chat.image = Some(image);
            }
        }
    }

    /// Add a member unless already present.
    pub fn add_group_member(&mut self, chat_id: ChatId, user_id: UserId) {
        if let Some(chat) = self.chat_mut(chat_id) {
            if !chat.members.contains(&user_id) {
                chat.members.push(user_id);
            }
        }
    }

    /// Remove a member, and their admin seat if they held one.
    pub fn remove_group_member(&mut self, chat_id: ChatId, user_id: UserId) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.members.retain(|m| *m != user_id);
            chat.admins.remove(&user_id);
        }
    }

    /// Grant an admin seat unless already held.
    pub fn make_group_admin(&mut self, chat_id: ChatId, user_id: UserId) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.admins.insert(user_id);
        }
    }

    /// Self-removal.
    pub fn leave_group(&mut self, chat_id: ChatId, user_id: UserId) {
        self.remove_group_member(chat_id, user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(store: &mut Store, name: &str) -> UserId {
        store
            .signup(name, &format!("{}@example.com", name.to_lowercase()), "pw", None)
            .unwrap()
            .id
    }

    #[test]
    fn private_chat_is_deduplicated() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let b = signup(&mut store, "Bob");

        let first = store.create_chat(vec![a, b], ChatKind::Private, None);
        store.archive_chat(first.id, a);

        // Reversed member order still finds the same chat, un-archived.
        let second = store.create_chat(vec![b, a], ChatKind::Private, None);
        assert_eq!(first.id, second.id);
        assert!(second.archived_by.is_empty());
        assert_eq!(store.chats().len(), 1);
    }

    #[test]
    fn group_creator_is_sole_initial_admin() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let b = signup(&mut store, "Bob");
        let c = signup(&mut store, "Carol");

        let chat = store.create_chat(vec![a, b, c], ChatKind::Group, Some("crew".into()));
        assert_eq!(chat.admins.len(), 1);
        assert!(chat.admins.contains(&a));

        // Two groups with the same members are distinct chats.
        let other = store.create_chat(vec![a, b, c], ChatKind::Group, Some("crew".into()));
        assert_ne!(chat.id, other.id);
    }

    #[test]
    fn send_message_updates_unread_and_unarchives() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let b = signup(&mut store, "Bob");
        let chat = store.create_chat(vec![a, b], ChatKind::Private, None);

        store.archive_chat(chat.id, b);
        store.send_message(chat.id, a, "hey".into(), None, None);
        store.send_message(chat.id, a, "there".into(), None, None);

        let chat_id = chat.id;
        let chat = store.chat_by_id(chat_id).unwrap();
        assert_eq!(chat.unread_counts.get(&b), Some(&2));
        assert_eq!(chat.unread_counts.get(&a), None);
        assert!(chat.archived_by.is_empty());
        assert_eq!(store.messages().len(), 2);

        store.mark_chat_read(chat_id, b);
        store.mark_chat_read(chat_id, b); // idempotent
        assert_eq!(
            store.chat_by_id(chat_id).unwrap().unread_counts.get(&b),
            Some(&0)
        );
    }

    #[test]
    fn message_to_missing_chat_is_still_recorded() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");

        let message = store.send_message(ChatId::new(), a, "late reply".into(), None, None);
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].id, message.id);
    }

    #[test]
    fn member_add_then_remove_restores_prior_set() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let b = signup(&mut store, "Bob");
        let c = signup(&mut store, "Carol");
        let chat = store.create_chat(vec![a, b], ChatKind::Group, Some("crew".into()));

        let before = store.chat_by_id(chat.id).unwrap().members.clone();

        store.add_group_member(chat.id, c);
        store.add_group_member(chat.id, c); // duplicate append is guarded
        assert_eq!(store.chat_by_id(chat.id).unwrap().members.len(), 3);

        store.make_group_admin(chat.id, c);
        store.remove_group_member(chat.id, c);

        let after = store.chat_by_id(chat.id).unwrap();
        assert_eq!(after.members, before);
        assert!(!after.admins.contains(&c));
    }

    #[test]
    fn leave_group_drops_membership_and_admin_seat() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let b = signup(&mut store, "Bob");
        let chat = store.create_chat(vec![a, b], ChatKind::Group, Some("crew".into()));

        store.leave_group(chat.id, a);
        let chat = store.chat_by_id(chat.id).unwrap();
        assert_eq!(chat.members, vec![b]);
        assert!(chat.admins.is_empty());
    }

    #[test]
    fn archival_is_per_user() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let b = signup(&mut store, "Bob");
        let chat = store.create_chat(vec![a, b], ChatKind::Private, None);

        store.archive_chat(chat.id, a);
        let archived = &store.chat_by_id(chat.id).unwrap().archived_by;
        assert!(archived.contains(&a));
        assert!(!archived.contains(&b));

        store.unarchive_chat(chat.id, a);
        assert!(store.chat_by_id(chat.id).unwrap().archived_by.is_empty());
    }

    #[test]
    fn group_info_partial_update() {
        let mut store = Store::new();
        let a = signup(&mut store, "Ada");
        let chat = store.create_chat(vec![a], ChatKind::Group, Some("old".into()));

        store.update_group_info(chat.id, None, Some("pic".into()));
        let chat = store.chat_by_id(chat.id).unwrap();
        assert_eq!(chat.name.as_deref(), Some("old"));
        assert_eq!(chat.image.as_deref(), Some("pic"));
    }
}
