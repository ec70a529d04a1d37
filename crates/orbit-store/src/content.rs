//! Content operations: posts, comments, like toggling, stories and the
//! bulk notification read-marking.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use orbit_shared::types::{CommentId, PostId, StoryId, UserId};

use crate::models::{Comment, Notification, NotificationKind, Post, Story, StoryText};
use crate::notify;
use crate::state::Store;

impl Store {
    /// Publish a post, prepended to the feed, and run the fan-out scan over
    /// its content (everyone broadcast, mentions, share notification).
    pub fn add_post(
        &mut self,
        user_id: UserId,
        content: String,
        image: Option<String>,
        video: Option<String>,
        shared_from: Option<PostId>,
    ) -> Post {
        let post = Post {
            id: PostId::new(),
            user_id,
            content,
            image,
            video,
            likes: BTreeSet::new(),
            shared_from,
            timestamp: Utc::now(),
        };

        let batch = notify::post_fan_out(&self.state.users, &self.state.posts, &post);
        tracing::info!(post = %post.id, author = %user_id, fan_out = batch.len(), "post created");

        self.state.posts.insert(0, post.clone());
        self.prepend_notifications(batch);
        post
    }

    /// Append a comment and notify the post owner plus anyone mentioned.
    /// The comment is recorded even when the post id dangles; only the
    /// owner notification needs the post to exist.
    pub fn add_comment(&mut self, post_id: PostId, user_id: UserId, content: String) -> Comment {
        let comment = Comment {
            id: CommentId::new(),
            post_id,
            user_id,
            content,
            timestamp: Utc::now(),
        };

        let batch = notify::comment_fan_out(&self.state.users, &self.state.posts, &comment);
        self.state.comments.push(comment.clone());
        self.prepend_notifications(batch);
        comment
    }

    /// Toggle a like. Returns whether the post is now liked by `user_id`.
    ///
    /// The owner is notified at most once per liker, however many
    /// like/unlike pairs occur; removal emits nothing, and an
    /// already-created notification is never retracted.
    pub fn toggle_like(&mut self, post_id: PostId, user_id: UserId) -> bool {
        let Some(post) = self.post_mut(post_id) else {
            return false;
        };

        if post.likes.insert(user_id) {
            let owner = post.user_id;
            if owner != user_id && !self.has_like_notification(post_id, user_id) {
                self.push_notification(Notification::new(
                    owner,
                    user_id,
                    NotificationKind::Like,
                    Some(post_id),
                    "liked your post.",
                ));
            }
            true
        } else {
            post.likes.remove(&user_id);
            false
        }
    }

    fn has_like_notification(&self, post_id: PostId, liker: UserId) -> bool {
        self.state.notifications.iter().any(|n| {
            n.kind == NotificationKind::Like
                && n.actor_id == liker
                && n.entity_id == Some(post_id)
        })
    }

    /// Upload a story with the current timestamp and no viewers yet.
    pub fn add_story(&mut self, user_id: UserId, image: String, texts: Vec<StoryText>) -> Story {
        let story = Story {
            id: StoryId::new(),
            user_id,
            image,
            texts,
            viewers: BTreeSet::new(),
            timestamp: Utc::now(),
        };
        self.state.stories.push(story.clone());
        story
    }

    /// Remove every story past the retention window. Idempotent; runs
    /// before any read that lists stories.
    pub fn cleanup_stories(&mut self) {
        self.cleanup_stories_at(Utc::now());
    }

    fn cleanup_stories_at(&mut self, now: DateTime<Utc>) {
        let before = self.state.stories.len();
        self.state.stories.retain(|s| !s.is_expired(now));
        let removed = before - self.state.stories.len();
        if removed > 0 {
            tracing::debug!(removed, "expired stories swept");
        }
    }

    /// Mark every notification addressed to `user_id` as read.
    pub fn mark_notifications_read(&mut self, user_id: UserId) {
        for n in self
            .state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id)
        {
            n.read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn signup(store: &mut Store, name: &str) -> UserId {
        store
            .signup(name, &format!("{}@example.com", name.to_lowercase()), "pw", None)
            .unwrap()
            .id
    }

    #[test]
    fn mention_notifies_named_user() {
        let mut store = Store::new();
        let alice = store.signup("alice", "alice@x.com", "pw1", None).unwrap();
        let bob = signup(&mut store, "Bob");

        let post = store.add_post(alice.id, "hi @Bob".into(), None, None, None);

        let to_bob: Vec<_> = store
            .notifications()
            .iter()
            .filter(|n| n.user_id == bob)
            .collect();
        assert_eq!(to_bob.len(), 1);
        assert_eq!(to_bob[0].kind, NotificationKind::Mention);
        assert_eq!(to_bob[0].entity_id, Some(post.id));
        assert_eq!(to_bob[0].actor_id, alice.id);
        assert!(!to_bob[0].read);
    }

    #[test]
    fn everyone_reaches_all_eligible_users_and_nobody_named_everyone() {
        let mut store = Store::new();
        let author = signup(&mut store, "Ada");
        let others = ["Bob", "Carol", "Dave"]
            .map(|name| signup(&mut store, name));

        store.add_post(author, "hello @Everyone".into(), None, None, None);

        let everyone: Vec<_> = store
            .notifications()
            .iter()
            .filter(|n| n.kind == NotificationKind::Everyone)
            .collect();
        // Three eligible users: the author and the assistant are excluded.
        assert_eq!(everyone.len(), others.len());
        let mentions = store
            .notifications()
            .iter()
            .filter(|n| n.kind == NotificationKind::Mention)
            .count();
        assert_eq!(mentions, 0);
    }

    #[test]
    fn like_toggle_pair_restores_state_and_notifies_once() {
        let mut store = Store::new();
        let ada = signup(&mut store, "Ada");
        let bob = signup(&mut store, "Bob");
        let post = store.add_post(ada, "post".into(), None, None, None);

        assert!(store.toggle_like(post.id, bob));
        assert!(!store.toggle_like(post.id, bob));
        assert!(store.post_by_id(post.id).unwrap().likes.is_empty());

        // However many toggle pairs occur, exactly one notification exists:
        // never retracted on unlike, never duplicated on re-like.
        assert!(store.toggle_like(post.id, bob));
        assert!(!store.toggle_like(post.id, bob));

        let likes = store
            .notifications()
            .iter()
            .filter(|n| n.kind == NotificationKind::Like)
            .count();
        assert_eq!(likes, 1);

        // Liking your own post records the like without a notification.
        assert!(store.toggle_like(post.id, ada));
        assert_eq!(
            store
                .notifications()
                .iter()
                .filter(|n| n.kind == NotificationKind::Like)
                .count(),
            1
        );
    }

    #[test]
    fn own_comment_does_not_notify_owner() {
        let mut store = Store::new();
        let ada = signup(&mut store, "Ada");
        let post = store.add_post(ada, "post".into(), None, None, None);

        store.add_comment(post.id, ada, "first".into());
        assert_eq!(store.comments().len(), 1);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn comment_on_dangling_post_is_still_recorded() {
        let mut store = Store::new();
        let ada = signup(&mut store, "Ada");

        store.add_comment(PostId::new(), ada, "orphan".into());
        assert_eq!(store.comments().len(), 1);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn cleanup_removes_only_expired_stories() {
        let mut store = Store::new();
        let ada = signup(&mut store, "Ada");
        let old = store.add_story(ada, "old".into(), Vec::new());
        let fresh = store.add_story(ada, "fresh".into(), Vec::new());

        let now = Utc::now();
        store
            .state
            .stories
            .iter_mut()
            .find(|s| s.id == old.id)
            .unwrap()
            .timestamp = now - Duration::hours(25);
        store
            .state
            .stories
            .iter_mut()
            .find(|s| s.id == fresh.id)
            .unwrap()
            .timestamp = now - Duration::hours(1);

        store.cleanup_stories_at(now);
        store.cleanup_stories_at(now); // idempotent

        let listed = store.stories();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, fresh.id);
    }

    #[test]
    fn posts_are_newest_first() {
        let mut store = Store::new();
        let ada = signup(&mut store, "Ada");
        let first = store.add_post(ada, "first".into(), None, None, None);
        let second = store.add_post(ada, "second".into(), None, None, None);

        assert_eq!(store.posts()[0].id, second.id);
        assert_eq!(store.posts()[1].id, first.id);
    }

    #[test]
    fn read_marking_is_bulk_and_per_recipient() {
        let mut store = Store::new();
        let ada = signup(&mut store, "Ada");
        let bob = signup(&mut store, "Bob");
        let carol = signup(&mut store, "Carol");
        store.add_post(ada, "hi @Bob and @Carol".into(), None, None, None);

        store.mark_notifications_read(bob);
        for n in store.notifications() {
            if n.user_id == bob {
                assert!(n.read);
            }
            if n.user_id == carol {
                assert!(!n.read);
            }
        }
    }
}
