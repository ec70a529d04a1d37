//! Privileged operations, invoked only by the trusted agent layer.
//!
//! These wrap ordinary operations with relaxed checks; nothing here
//! authenticates the caller.

use rand::distributions::Alphanumeric;
use rand::Rng;

use orbit_shared::constants::GENERATED_PASSWORD_LEN;
use orbit_shared::types::UserId;

use crate::error::Result;
use crate::state::Store;

impl Store {
    /// Create an account with a generated password and mark it
    /// agent-controlled. Returns the password so the agent can relay it.
    ///
    /// Fails with `DuplicateEmail` exactly like `signup`, and inherits its
    /// adopt-the-session-when-none-is-active behavior.
    pub fn admin_create_user(&mut self, name: &str, email: &str) -> Result<String> {
        let password: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_PASSWORD_LEN)
            .map(char::from)
            .collect();

        let user = self.signup(name, email, &password, None)?;
        if let Some(user) = self.user_mut(user.id) {
            user.is_ai_controlled = true;
        }
        tracing::info!(user = %user.id, "agent-controlled account created");
        Ok(password)
    }

    /// Delete an account resolved by exact email or exact name.
    ///
    /// Refuses (returns `false`) for the built-in assistant and unknown
    /// identifiers. Deletion cascades to the target's posts, comments and
    /// stories; their chats, messages and notifications survive. Clears the
    /// session if the target was the active user.
    pub fn admin_delete_user(&mut self, identifier: &str) -> bool {
        let target = self
            .state
            .users
            .iter()
            .find(|u| u.email == identifier || u.name == identifier);
        let Some(target) = target else {
            return false;
        };
        if target.is_ai {
            return false;
        }
        let target_id = target.id;

        self.state.users.retain(|u| u.id != target_id);
        self.state.posts.retain(|p| p.user_id != target_id);
        self.state.comments.retain(|c| c.user_id != target_id);
        self.state.stories.retain(|s| s.user_id != target_id);
        if self.state.current_user == Some(target_id) {
            self.state.current_user = None;
        }

        tracing::warn!(user = %target_id, "account deleted");
        true
    }

    /// Clear the active session without the offline-marking side effect of
    /// `logout`.
    pub fn admin_force_logout_all(&mut self) {
        self.state.current_user = None;
    }

    /// Plaintext password lookup by exact email.
    pub fn admin_reveal_password(&self, email: &str) -> Option<String> {
        self.user_by_email(email).and_then(|u| u.password.clone())
    }

    /// Suspend an account globally and clear the session if it was active.
    /// A banned account can no longer log in.
    pub fn admin_ban_user(&mut self, user_id: UserId) {
        if let Some(user) = self.user_mut(user_id) {
            user.blocked = true;
            tracing::warn!(user = %user_id, "account banned");
        }
        if self.state.current_user == Some(user_id) {
            self.state.current_user = None;
        }
    }
}
