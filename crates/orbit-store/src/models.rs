//! Domain model structs held in the store and serialized into snapshots.
//!
//! Every struct derives `Serialize` and `Deserialize` so the whole state can
//! be persisted as one JSON document and handed to view layers unchanged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orbit_shared::constants::{PRESENCE_WINDOW_SECS, STORY_RETENTION_HOURS};
use orbit_shared::types::{ChatId, CommentId, MessageId, NotificationId, PostId, StoryId, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user account.
///
/// Relationship lists are sets: the store maintains both sides of every
/// inverse pair (followers/following, blockedUsers/blockedBy) inside a
/// single mutator, and symmetric friendship means `A ∈ B.friends` iff
/// `B ∈ A.friends`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique among users. Compared exactly (case-sensitive) at signup.
    pub email: String,
    /// Stored in plain text, exactly like the system this models. Absent for
    /// the built-in assistant-adjacent accounts that never log in.
    pub password: Option<String>,
    /// Image reference (URL or data URI).
    pub avatar: String,
    pub bio: Option<String>,
    /// Marks the single built-in system-assistant account.
    pub is_ai: bool,
    /// Marks accounts created through the privileged agent surface.
    pub is_ai_controlled: bool,
    pub is_online: bool,
    pub last_active: Option<DateTime<Utc>>,
    /// Global suspension flag, distinct from per-user blocking.
    pub blocked: bool,
    pub friends: BTreeSet<UserId>,
    /// Pending requests held by the recipient.
    pub friend_requests: BTreeSet<UserId>,
    pub followers: BTreeSet<UserId>,
    pub following: BTreeSet<UserId>,
    /// Users this account has blocked.
    pub blocked_users: BTreeSet<UserId>,
    /// Users that have blocked this account.
    pub blocked_by: BTreeSet<UserId>,
}

impl User {
    /// Presence as other observers compute it: explicitly online, or a
    /// heartbeat within the last minute.
    pub fn is_present(&self, now: DateTime<Utc>) -> bool {
        self.is_online
            || self
                .last_active
                .is_some_and(|t| now - t < Duration::seconds(PRESENCE_WINDOW_SECS))
    }
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A feed post. Immutable after creation except for its `likes` set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    /// May embed `@name` or `@Everyone` mention tokens.
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    /// Each user contributes at most one like.
    pub likes: BTreeSet<UserId>,
    /// Non-owning reference to the shared original. May dangle if the
    /// original is deleted later; readers treat that as "original not found".
    pub shared_from: Option<PostId>,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A comment on a post. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Story
// ---------------------------------------------------------------------------

/// A text overlay placed on a story image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryText {
    pub id: Uuid,
    pub content: String,
    /// Horizontal position as a 0–100 percentage.
    pub x: f32,
    /// Vertical position as a 0–100 percentage.
    pub y: f32,
    pub color: String,
    pub scale: f32,
}

/// An ephemeral story, removed by the expiry sweep after 24 hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    pub id: StoryId,
    pub user_id: UserId,
    pub image: String,
    pub texts: Vec<StoryText>,
    pub viewers: BTreeSet<UserId>,
    pub timestamp: DateTime<Utc>,
}

impl Story {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.timestamp >= Duration::hours(STORY_RETENTION_HOURS)
    }
}

// ---------------------------------------------------------------------------
// Chat & Message
// ---------------------------------------------------------------------------

/// Whether a chat is a two-person conversation or a named group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
}

/// A conversation. At most one private chat exists per unordered member
/// pair; `create_chat` finds and reuses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: ChatId,
    pub kind: ChatKind,
    /// Group metadata; absent for private chats.
    pub name: Option<String>,
    pub image: Option<String>,
    /// Ordered: the first member of a group is its creator.
    pub members: Vec<UserId>,
    /// Subset of `members`; only meaningful for groups.
    pub admins: BTreeSet<UserId>,
    /// Members that have hidden this chat from their own view. Cleared for
    /// everyone when a new message arrives or a private chat is reused.
    pub archived_by: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
    /// Pending-message count per member.
    pub unread_counts: BTreeMap<UserId, u32>,
}

impl Chat {
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }
}

/// A chat message. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub image: Option<String>,
    /// Captured image of the story being replied to, so the reply stays
    /// viewable after the story expires.
    pub story_snapshot: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// What caused a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FriendRequest,
    Mention,
    Like,
    Comment,
    Follow,
    Share,
    Everyone,
}

/// A derived notification. Created only as a side effect of other
/// operations, never directly; once created it is never retracted, even if
/// the triggering action (a like, say) is undone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Who caused it.
    pub actor_id: UserId,
    pub kind: NotificationKind,
    /// Post being referenced, for navigation.
    pub entity_id: Option<PostId>,
    /// Human-readable suffix rendered after the actor's name.
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification stamped with a fresh id and now.
    pub fn new(
        user_id: UserId,
        actor_id: UserId,
        kind: NotificationKind,
        entity_id: Option<PostId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            actor_id,
            kind,
            entity_id,
            message: message.into(),
            read: false,
            timestamp: Utc::now(),
        }
    }
}
