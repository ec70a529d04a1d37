//! Maps parsed commands onto the store surface.
//!
//! Every invocation resolves to a [`ToolOutcome`]; lookup misses, duplicate
//! emails, unknown tools and malformed arguments all come back as
//! `success: false` results the model can relay conversationally.

use serde::Serialize;
use serde_json::Value;

use orbit_shared::types::{PostId, UserId};
use orbit_store::{ProfileUpdate, Store};

use crate::command::AgentCommand;
use crate::error::AgentError;

/// Result record handed back to the model endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ToolOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            password: None,
        }
    }

    pub fn ok_msg(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            password: None,
        }
    }
}

/// Dispatch a raw `(name, argument record)` invocation.
///
/// This is the entry point the tool-call transport uses; it never raises.
pub fn dispatch_named(store: &mut Store, name: &str, args: &Value) -> ToolOutcome {
    match AgentCommand::parse(name, args) {
        Ok(command) => dispatch(store, command),
        Err(err @ AgentError::UnknownTool(_)) => {
            tracing::warn!(tool = name, "unknown tool invoked");
            ToolOutcome::fail(err.to_string())
        }
        Err(err) => ToolOutcome::fail(err.to_string()),
    }
}

/// Execute one typed command against the store.
pub fn dispatch(store: &mut Store, command: AgentCommand) -> ToolOutcome {
    tracing::debug!(?command, "executing tool");
    match command {
        AgentCommand::CreateAccount { name, email } => {
            match store.admin_create_user(&name, &email) {
                Ok(password) => ToolOutcome {
                    password: Some(password),
                    ..ToolOutcome::ok_msg("Account created.")
                },
                Err(err) => ToolOutcome::fail(err.to_string()),
            }
        }

        AgentCommand::DeleteAccount { identifier } => {
            if store.admin_delete_user(&identifier) {
                ToolOutcome::ok_msg("Deleted")
            } else {
                ToolOutcome::fail("Not found")
            }
        }

        AgentCommand::UpdateUserProfile {
            identifier,
            new_name,
            new_avatar_url,
        } => {
            let Some((id, name)) = resolve_by_name_or_email(store, &identifier) else {
                return ToolOutcome::fail("User not found");
            };
            store.update_profile(
                id,
                ProfileUpdate {
                    name: new_name,
                    avatar: new_avatar_url,
                    bio: None,
                },
            );
            ToolOutcome::ok_msg(format!("Updated profile for {name}"))
        }

        AgentCommand::ForceLogoutAll => {
            store.admin_force_logout_all();
            ToolOutcome::ok()
        }

        AgentCommand::RecoverPassword { email } => match store.admin_reveal_password(&email) {
            Some(password) => ToolOutcome {
                password: Some(password),
                ..ToolOutcome::ok()
            },
            None => ToolOutcome::fail("User not found"),
        },

        AgentCommand::BanUser { identifier } => {
            let by_id = identifier
                .parse::<UserId>()
                .ok()
                .and_then(|id| store.user_by_id(id))
                .map(|u| (u.id, u.name.clone()));
            let Some((id, name)) = by_id.or_else(|| resolve_by_name(store, &identifier)) else {
                return ToolOutcome::fail("User not found");
            };
            store.admin_ban_user(id);
            ToolOutcome::ok_msg(format!("Banned {name}"))
        }

        AgentCommand::CreatePost { user_name, content } => {
            let Some((id, name)) = resolve_by_name(store, &user_name) else {
                return ToolOutcome::fail("User not found");
            };
            store.add_post(id, content, None, None, None);
            ToolOutcome::ok_msg(format!("Posted for {name}"))
        }

        AgentCommand::BulkPost { posts } => {
            let mut count = 0;
            for request in posts {
                if let Some((id, _)) = resolve_by_name(store, &request.user_name) {
                    store.add_post(id, request.content, None, None, None);
                    count += 1;
                }
            }
            ToolOutcome::ok_msg(format!("Created {count} posts."))
        }

        AgentCommand::CreateComment {
            post_id,
            user_name,
            content,
        } => {
            let Some((id, _)) = resolve_by_name(store, &user_name) else {
                return ToolOutcome::fail("User not found");
            };
            let Ok(post_id) = post_id.parse::<PostId>() else {
                return ToolOutcome::fail("Invalid post id");
            };
            store.add_comment(post_id, id, content);
            ToolOutcome::ok_msg("Commented.")
        }

        AgentCommand::AddFriend { user_a, user_b } => {
            let a = resolve_by_name(store, &user_a);
            let b = resolve_by_name(store, &user_b);
            match (a, b) {
                (Some((a, _)), Some((b, _))) => {
                    store.accept_friend_request(a, b);
                    ToolOutcome::ok_msg("Connected.")
                }
                _ => ToolOutcome::fail("User not found"),
            }
        }

        AgentCommand::FollowUser {
            follower_name,
            target_name,
        } => {
            let follower = resolve_by_name(store, &follower_name);
            let target = resolve_by_name(store, &target_name);
            match (follower, target) {
                (Some((f, f_name)), Some((t, t_name))) => {
                    store.follow(f, t);
                    ToolOutcome::ok_msg(format!("{f_name} followed {t_name}"))
                }
                _ => ToolOutcome::fail("User not found"),
            }
        }
    }
}

fn resolve_by_name(store: &Store, name: &str) -> Option<(UserId, String)> {
    store.user_by_name(name).map(|u| (u.id, u.name.clone()))
}

fn resolve_by_name_or_email(store: &Store, identifier: &str) -> Option<(UserId, String)> {
    store
        .user_by_name(identifier)
        .or_else(|| store.user_by_email(identifier))
        .map(|u| (u.id, u.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with_users() -> Store {
        let mut store = Store::new();
        store.signup("Ada", "ada@example.com", "pw1", None).unwrap();
        store.signup("Bob", "bob@example.com", "pw2", None).unwrap();
        store
    }

    #[test]
    fn unknown_tool_returns_failure_outcome() {
        let mut store = Store::new();
        let outcome = dispatch_named(&mut store, "reboot_universe", &json!({}));
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("Unknown tool"));
    }

    #[test]
    fn create_account_returns_password_and_rejects_duplicates() {
        let mut store = store_with_users();
        let outcome = dispatch_named(
            &mut store,
            "create_account",
            &json!({ "name": "Eve", "email": "eve@example.com" }),
        );
        assert!(outcome.success);
        let password = outcome.password.unwrap();
        assert!(store.user_by_email("eve@example.com").unwrap().is_ai_controlled);
        store.logout();
        assert!(store.login("eve@example.com", &password).is_some());

        let duplicate = dispatch_named(
            &mut store,
            "create_account",
            &json!({ "name": "Eve2", "email": "eve@example.com" }),
        );
        assert!(!duplicate.success);
    }

    #[test]
    fn follow_and_friend_tools_resolve_by_name() {
        let mut store = store_with_users();

        let outcome = dispatch_named(
            &mut store,
            "follow_user",
            &json!({ "followerName": "ada", "targetName": "Bob" }),
        );
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Ada followed Bob"));

        let outcome = dispatch_named(
            &mut store,
            "add_friend",
            &json!({ "userA": "Ada", "userB": "Bob" }),
        );
        assert!(outcome.success);
        let ada = store.user_by_name("Ada").unwrap();
        let bob = store.user_by_name("Bob").unwrap();
        assert!(ada.friends.contains(&bob.id));
        assert!(bob.friends.contains(&ada.id));

        let outcome = dispatch_named(
            &mut store,
            "follow_user",
            &json!({ "followerName": "Nobody", "targetName": "Bob" }),
        );
        assert!(!outcome.success);
    }

    #[test]
    fn bulk_post_skips_unknown_users() {
        let mut store = store_with_users();
        let outcome = dispatch_named(
            &mut store,
            "bulk_post",
            &json!({ "posts": [
                { "userName": "Ada", "content": "one" },
                { "userName": "Ghost", "content": "two" },
                { "userName": "Bob", "content": "three" },
            ] }),
        );
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Created 2 posts."));
        assert_eq!(store.posts().len(), 2);
    }

    #[test]
    fn ban_resolves_by_id_or_name() {
        let mut store = store_with_users();
        let ada_id = store.user_by_name("Ada").unwrap().id;

        let outcome = dispatch_named(
            &mut store,
            "ban_user",
            &json!({ "identifier": ada_id.to_string() }),
        );
        assert!(outcome.success);
        assert!(store.user_by_id(ada_id).unwrap().blocked);

        let outcome = dispatch_named(&mut store, "ban_user", &json!({ "identifier": "Bob" }));
        assert_eq!(outcome.message.as_deref(), Some("Banned Bob"));
    }

    #[test]
    fn recover_password_is_plaintext_lookup() {
        let mut store = store_with_users();
        let outcome = dispatch_named(
            &mut store,
            "recover_password",
            &json!({ "email": "ada@example.com" }),
        );
        assert!(outcome.success);
        assert_eq!(outcome.password.as_deref(), Some("pw1"));

        let outcome = dispatch_named(
            &mut store,
            "recover_password",
            &json!({ "email": "ghost@example.com" }),
        );
        assert!(!outcome.success);
    }

    #[test]
    fn comment_tool_records_even_on_dangling_post() {
        let mut store = store_with_users();
        let outcome = dispatch_named(
            &mut store,
            "create_comment",
            &json!({
                "postId": PostId::new().to_string(),
                "userName": "Ada",
                "content": "hello"
            }),
        );
        assert!(outcome.success);
        assert_eq!(store.comments().len(), 1);

        let outcome = dispatch_named(
            &mut store,
            "create_comment",
            &json!({ "postId": "not-a-uuid", "userName": "Ada", "content": "x" }),
        );
        assert!(!outcome.success);
    }

    #[test]
    fn update_profile_resolves_by_name_or_email() {
        let mut store = store_with_users();
        let outcome = dispatch_named(
            &mut store,
            "update_user_profile",
            &json!({ "identifier": "ada@example.com", "newName": "Ada L" }),
        );
        assert!(outcome.success);
        assert!(store.user_by_name("Ada L").is_some());
    }

    #[test]
    fn outcome_serializes_compactly() {
        let outcome = ToolOutcome::ok_msg("Deleted");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({ "success": true, "message": "Deleted" }));
    }
}
