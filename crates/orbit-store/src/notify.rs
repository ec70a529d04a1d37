//! Notification fan-out: pure derivation of the notifications a content
//! mutation produces.
//!
//! Nothing here touches the store; [`post_fan_out`] and [`comment_fan_out`]
//! read the collections and return the batch to prepend. The everyone
//! broadcast and the mention scan are independent — a user matching both
//! receives both, with no deduplication.

use std::sync::OnceLock;

use regex::Regex;

use orbit_shared::types::UserId;

use crate::models::{Comment, Notification, NotificationKind, Post, User};

/// Case-insensitive token that triggers the everyone broadcast.
const EVERYONE_TOKEN: &str = "@everyone";

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@([A-Za-z0-9]+)").expect("mention pattern is valid"))
}

/// Notifications produced by a new post: everyone broadcast, mentions, and
/// the share notification when the post re-shares someone else's.
pub fn post_fan_out(users: &[User], posts: &[Post], post: &Post) -> Vec<Notification> {
    let mut batch = Vec::new();

    if post.content.to_lowercase().contains(EVERYONE_TOKEN) {
        for user in users {
            let excluded = user.id == post.user_id
                || user.is_ai
                || user.blocked_users.contains(&post.user_id);
            if !excluded {
                batch.push(Notification::new(
                    user.id,
                    post.user_id,
                    NotificationKind::Everyone,
                    Some(post.id),
                    "mentioned @Everyone in a post.",
                ));
            }
        }
    }

    for user in mentioned(users, &post.content, post.user_id) {
        batch.push(Notification::new(
            user.id,
            post.user_id,
            NotificationKind::Mention,
            Some(post.id),
            "mentioned you in a post.",
        ));
    }

    if let Some(original_id) = post.shared_from {
        // A dangling reference means "original not found": no notification.
        if let Some(original) = posts.iter().find(|p| p.id == original_id) {
            if original.user_id != post.user_id {
                batch.push(Notification::new(
                    original.user_id,
                    post.user_id,
                    NotificationKind::Share,
                    Some(post.id),
                    "shared your post.",
                ));
            }
        }
    }

    batch
}

/// Notifications produced by a new comment: one to the post owner plus the
/// mention scan. Comments have no everyone broadcast.
pub fn comment_fan_out(users: &[User], posts: &[Post], comment: &Comment) -> Vec<Notification> {
    let mut batch = Vec::new();

    if let Some(post) = posts.iter().find(|p| p.id == comment.post_id) {
        if post.user_id != comment.user_id {
            batch.push(Notification::new(
                post.user_id,
                comment.user_id,
                NotificationKind::Comment,
                Some(comment.post_id),
                "commented on your post.",
            ));
        }
    }

    for user in mentioned(users, &comment.content, comment.user_id) {
        batch.push(Notification::new(
            user.id,
            comment.user_id,
            NotificationKind::Mention,
            Some(comment.post_id),
            "mentioned you in a comment.",
        ));
    }

    batch
}

/// Resolve every `@token` in `content` against user names with whitespace
/// stripped (case-sensitive exact match). The author never matches. A name
/// mentioned twice yields two entries.
fn mentioned<'a>(users: &'a [User], content: &str, author: UserId) -> Vec<&'a User> {
    let mut hits = Vec::new();
    for caps in mention_re().captures_iter(content) {
        let token = &caps[1];
        let resolved = users.iter().find(|u| stripped_name(&u.name) == *token);
        if let Some(user) = resolved {
            if user.id != author {
                hits.push(user);
            }
        }
    }
    hits
}

fn stripped_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}
