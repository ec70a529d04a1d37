//! Social graph operations: friend requests, follows and blocks.
//!
//! Every inverse pair (followers/following, blockedUsers/blockedBy) is
//! updated on both sides inside a single mutator; callers never touch one
//! side alone.

use orbit_shared::types::UserId;

use crate::models::{Notification, NotificationKind};
use crate::state::Store;

impl Store {
    /// Send a friend request.
    ///
    /// No-op (returns `false`) when the recipient is unknown, already has a
    /// pending request from the sender, or is already a friend. Emits a
    /// `friend_request` notification otherwise.
    pub fn send_friend_request(&mut self, from: UserId, to: UserId) -> bool {
        let Some(recipient) = self.user_mut(to) else {
            return false;
        };
        if recipient.friend_requests.contains(&from) || recipient.friends.contains(&from) {
            return false;
        }
        recipient.friend_requests.insert(from);

        self.push_notification(Notification::new(
            to,
            from,
            NotificationKind::FriendRequest,
            None,
            "sent you a friend request.",
        ));
        tracing::debug!(%from, %to, "friend request sent");
        true
    }

    /// Accept a pending request: each side joins the other's friends and the
    /// pending entry is cleared. Safe to repeat — friends are sets, so
    /// duplicate accepts (or the reverse direction racing ahead) never
    /// accumulate entries.
    pub fn accept_friend_request(&mut self, user_id: UserId, requester_id: UserId) {
        if let Some(user) = self.user_mut(user_id) {
            user.friends.insert(requester_id);
            user.friend_requests.remove(&requester_id);
        }
        if let Some(requester) = self.user_mut(requester_id) {
            requester.friends.insert(user_id);
        }
    }

    /// Drop a pending request. No notification is emitted.
    pub fn reject_friend_request(&mut self, user_id: UserId, requester_id: UserId) {
        if let Some(user) = self.user_mut(user_id) {
            user.friend_requests.remove(&requester_id);
        }
    }

    /// Follow: maintains both `following` and `followers`, and notifies the
    /// target. A follow that changes nothing (already following) emits no
    /// notification.
    pub fn follow(&mut self, follower_id: UserId, target_id: UserId) {
        let newly = self
            .user_mut(follower_id)
            .map(|u| u.following.insert(target_id))
            .unwrap_or(false);
        if let Some(target) = self.user_mut(target_id) {
            target.followers.insert(follower_id);
        }

        if newly {
            self.push_notification(Notification::new(
                target_id,
                follower_id,
                NotificationKind::Follow,
                None,
                "started following you.",
            ));
        }
    }

    /// Unfollow: removes both sides. Emits nothing.
    pub fn unfollow(&mut self, follower_id: UserId, target_id: UserId) {
        if let Some(follower) = self.user_mut(follower_id) {
            follower.following.remove(&target_id);
        }
        if let Some(target) = self.user_mut(target_id) {
            target.followers.remove(&follower_id);
        }
    }

    /// Block: marks both sides and severs any friendship or follow edge
    /// between the pair, in both directions.
    pub fn block(&mut self, blocker_id: UserId, target_id: UserId) {
        if let Some(blocker) = self.user_mut(blocker_id) {
            blocker.blocked_users.insert(target_id);
            blocker.friends.remove(&target_id);
            blocker.following.remove(&target_id);
            blocker.followers.remove(&target_id);
        }
        if let Some(target) = self.user_mut(target_id) {
            target.blocked_by.insert(blocker_id);
            target.friends.remove(&blocker_id);
            target.following.remove(&blocker_id);
            target.followers.remove(&blocker_id);
        }
        tracing::debug!(blocker = %blocker_id, target = %target_id, "user blocked");
    }

    /// Unblock removes only the block markers. Severed relationships are not
    /// restored.
    pub fn unblock(&mut self, blocker_id: UserId, target_id: UserId) {
        if let Some(blocker) = self.user_mut(blocker_id) {
            blocker.blocked_users.remove(&target_id);
        }
        if let Some(target) = self.user_mut(target_id) {
            target.blocked_by.remove(&blocker_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_users(store: &mut Store) -> (UserId, UserId) {
        let a = store.signup("Ada", "ada@example.com", "pw", None).unwrap();
        let b = store.signup("Bob", "bob@example.com", "pw", None).unwrap();
        (a.id, b.id)
    }

    #[test]
    fn follow_maintains_both_sides() {
        let mut store = Store::new();
        let (a, b) = two_users(&mut store);

        store.follow(a, b);
        assert!(store.user_by_id(a).unwrap().following.contains(&b));
        assert!(store.user_by_id(b).unwrap().followers.contains(&a));

        store.unfollow(a, b);
        assert!(!store.user_by_id(a).unwrap().following.contains(&b));
        assert!(!store.user_by_id(b).unwrap().followers.contains(&a));
    }

    #[test]
    fn repeated_follow_notifies_once() {
        let mut store = Store::new();
        let (a, b) = two_users(&mut store);

        store.follow(a, b);
        store.follow(a, b);

        let follows = store
            .notifications()
            .iter()
            .filter(|n| n.kind == NotificationKind::Follow)
            .count();
        assert_eq!(follows, 1);
    }

    #[test]
    fn friend_request_is_idempotent() {
        let mut store = Store::new();
        let (a, b) = two_users(&mut store);

        assert!(store.send_friend_request(a, b));
        assert!(!store.send_friend_request(a, b));
        assert_eq!(store.notifications().len(), 1);

        store.accept_friend_request(b, a);
        assert!(store.user_by_id(a).unwrap().friends.contains(&b));
        assert!(store.user_by_id(b).unwrap().friends.contains(&a));
        assert!(store.user_by_id(b).unwrap().friend_requests.is_empty());

        // Already friends: a fresh request is refused.
        assert!(!store.send_friend_request(a, b));

        // Accepting again (reverse direction) accumulates nothing.
        store.accept_friend_request(a, b);
        assert_eq!(store.user_by_id(a).unwrap().friends.len(), 1);
    }

    #[test]
    fn reject_only_clears_pending_entry() {
        let mut store = Store::new();
        let (a, b) = two_users(&mut store);

        store.send_friend_request(a, b);
        store.reject_friend_request(b, a);
        assert!(store.user_by_id(b).unwrap().friend_requests.is_empty());
        assert!(store.user_by_id(b).unwrap().friends.is_empty());
        // Reject emits no notification beyond the original request.
        assert_eq!(store.notifications().len(), 1);
    }

    #[test]
    fn unblock_never_restores_friendship() {
        let mut store = Store::new();
        let (a, b) = two_users(&mut store);

        store.send_friend_request(a, b);
        store.accept_friend_request(b, a);
        store.follow(a, b);

        store.block(a, b);
        let ua = store.user_by_id(a).unwrap();
        let ub = store.user_by_id(b).unwrap();
        assert!(ua.friends.is_empty() && ub.friends.is_empty());
        assert!(ua.following.is_empty() && ub.followers.is_empty());
        assert!(ua.blocked_users.contains(&b));
        assert!(ub.blocked_by.contains(&a));

        store.unblock(a, b);
        let ua = store.user_by_id(a).unwrap();
        let ub = store.user_by_id(b).unwrap();
        assert!(ua.blocked_users.is_empty());
        assert!(ub.blocked_by.is_empty());
        assert!(ua.friends.is_empty() && ub.friends.is_empty());
    }
}
