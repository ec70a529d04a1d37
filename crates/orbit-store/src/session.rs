//! Session lifecycle: signup, login, logout, heartbeat and profile updates.

use std::collections::BTreeSet;

use chrono::Utc;

use orbit_shared::constants::AVATAR_SERVICE_URL;
use orbit_shared::types::UserId;

use crate::error::{Result, StoreError};
use crate::models::User;
use crate::state::Store;

/// Partial profile update; only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl Store {
    /// Create a new account.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the email is already
    /// taken (exact, case-sensitive comparison). On success the account
    /// becomes the active session, but only if no session is open.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        avatar: Option<String>,
    ) -> Result<User> {
        if self.user_by_email(email).is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
            avatar: avatar.unwrap_or_else(|| default_avatar(name)),
            bio: None,
            is_ai: false,
            is_ai_controlled: false,
            is_online: true,
            last_active: Some(Utc::now()),
            blocked: false,
            friends: BTreeSet::new(),
            friend_requests: BTreeSet::new(),
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
            blocked_users: BTreeSet::new(),
            blocked_by: BTreeSet::new(),
        };

        tracing::info!(user = %user.id, name, "account created");

        self.state.users.push(user.clone());
        if self.state.current_user.is_none() {
            self.state.current_user = Some(user.id);
        }
        Ok(user)
    }

    /// Open a session for the matching account.
    ///
    /// Returns `None` on any mismatch — wrong email, wrong password, or a
    /// banned account. Callers cannot tell those apart from the return
    /// value; they all surface as the same generic failure upstream.
    pub fn login(&mut self, email: &str, password: &str) -> Option<User> {
        let now = Utc::now();
        let user = self
            .state
            .users
            .iter_mut()
            .find(|u| u.email == email && u.password.as_deref() == Some(password) && !u.blocked)?;

        user.is_online = true;
        user.last_active = Some(now);
        let user = user.clone();

        tracing::info!(user = %user.id, "login");
        self.state.current_user = Some(user.id);
        Some(user)
    }

    /// Close the active session, marking the user offline with a fresh
    /// `last_active`. No-op when no session is open.
    pub fn logout(&mut self) {
        if let Some(id) = self.state.current_user.take() {
            let now = Utc::now();
            if let Some(user) = self.user_mut(id) {
                user.is_online = false;
                user.last_active = Some(now);
            }
            tracing::info!(user = %id, "logout");
        }
    }

    /// Periodic liveness tick for the active user. Tolerates unknown ids so
    /// a timer firing after logout stays a no-op.
    pub fn heartbeat(&mut self, user_id: UserId) {
        let now = Utc::now();
        if let Some(user) = self.user_mut(user_id) {
            user.is_online = true;
            user.last_active = Some(now);
        }
    }

    /// Apply a partial profile update.
    ///
    /// Changing the avatar also publishes a feed post announcing the new
    /// profile picture, attributed under the name the user had before the
    /// update.
    pub fn update_profile(&mut self, user_id: UserId, updates: ProfileUpdate) {
        let ProfileUpdate { name, avatar, bio } = updates;
        let Some(user) = self.user_mut(user_id) else {
            return;
        };

        let old_name = user.name.clone();
        let avatar_changed = avatar.as_ref().is_some_and(|a| *a != user.avatar);

        if let Some(name) = name {
            user.name = name;
        }
        if let Some(bio) = bio {
            user.bio = Some(bio);
        }
        if let Some(avatar) = avatar {
            user.avatar = avatar.clone();
            if avatar_changed {
                self.add_post(
                    user_id,
                    format!("{old_name} updated their profile picture."),
                    Some(avatar),
                    None,
                    None,
                );
            }
        }
    }
}

/// Generated-avatar fallback for accounts created without one.
fn default_avatar(name: &str) -> String {
    format!("{}{}", AVATAR_SERVICE_URL, name.replace(' ', "+"))
}
