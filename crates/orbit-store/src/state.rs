//! The state container and its serialized document.
//!
//! [`Store`] is an explicit, constructor-injected value: there is no global
//! instance, so tests build isolated stores per case. [`StoreState`] is the
//! exact document the persistence boundary reads and writes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use orbit_shared::constants::{ASSISTANT_BIO, ASSISTANT_EMAIL, ASSISTANT_NAME};
use orbit_shared::types::{ChatId, PostId, UserId};

use crate::models::{Chat, Comment, Message, Notification, Post, Story, User};

/// Everything the store owns, as one serializable document.
///
/// Posts, chats and notifications are kept newest-first; comments, messages
/// and stories append in arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreState {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub stories: Vec<Story>,
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
    pub notifications: Vec<Notification>,
    pub current_user: Option<UserId>,
}

/// The single-writer state core. All mutation goes through its methods.
#[derive(Debug)]
pub struct Store {
    pub(crate) state: StoreState,
}

impl Store {
    /// Create an empty store seeded with the built-in assistant account.
    pub fn new() -> Self {
        Self::from_snapshot(None)
    }

    /// Restore a store from a persisted snapshot, or start fresh when none
    /// exists (first run).
    ///
    /// Restoring re-seeds the assistant account if it is missing and runs
    /// the story expiry sweep, so a stale snapshot never surfaces expired
    /// stories.
    pub fn from_snapshot(snapshot: Option<StoreState>) -> Self {
        let mut store = Self {
            state: snapshot.unwrap_or_default(),
        };
        if !store.state.users.iter().any(|u| u.is_ai) {
            tracing::info!("seeding built-in assistant account");
            store.state.users.push(assistant_user());
        }
        store.cleanup_stories();
        store
    }

    /// The current document, for the persistence boundary.
    pub fn snapshot(&self) -> &StoreState {
        &self.state
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// Newest first.
    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    pub fn comments(&self) -> &[Comment] {
        &self.state.comments
    }

    /// Runs the expiry sweep first, so expired stories are never listed.
    pub fn stories(&mut self) -> &[Story] {
        self.cleanup_stories();
        &self.state.stories
    }

    /// Newest first.
    pub fn chats(&self) -> &[Chat] {
        &self.state.chats
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    /// Newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.and_then(|id| self.user_by_id(id))
    }

    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.state.users.iter().find(|u| u.id == id)
    }

    /// Case-insensitive exact name lookup.
    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.state
            .users
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
    }

    /// Case-sensitive exact email lookup.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.state.users.iter().find(|u| u.email == email)
    }

    pub fn post_by_id(&self, id: PostId) -> Option<&Post> {
        self.state.posts.iter().find(|p| p.id == id)
    }

    pub fn chat_by_id(&self, id: ChatId) -> Option<&Chat> {
        self.state.chats.iter().find(|c| c.id == id)
    }

    // ------------------------------------------------------------------
    // Internal helpers shared by the operation modules
    // ------------------------------------------------------------------

    pub(crate) fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.state.users.iter_mut().find(|u| u.id == id)
    }

    pub(crate) fn post_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.state.posts.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn chat_mut(&mut self, id: ChatId) -> Option<&mut Chat> {
        self.state.chats.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn push_notification(&mut self, notification: Notification) {
        self.state.notifications.insert(0, notification);
    }

    /// Prepend a fan-out batch, preserving its internal order.
    pub(crate) fn prepend_notifications(&mut self, batch: Vec<Notification>) {
        if batch.is_empty() {
            return;
        }
        let mut merged = batch;
        merged.append(&mut self.state.notifications);
        self.state.notifications = merged;
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in system-assistant account.
fn assistant_user() -> User {
    User {
        id: UserId::new(),
        name: ASSISTANT_NAME.to_string(),
        email: ASSISTANT_EMAIL.to_string(),
        password: Some("admin".to_string()),
        avatar: String::new(),
        bio: Some(ASSISTANT_BIO.to_string()),
        is_ai: true,
        is_ai_controlled: false,
        is_online: true,
        last_active: None,
        blocked: false,
        friends: BTreeSet::new(),
        friend_requests: BTreeSet::new(),
        followers: BTreeSet::new(),
        following: BTreeSet::new(),
        blocked_users: BTreeSet::new(),
        blocked_by: BTreeSet::new(),
    }
}
