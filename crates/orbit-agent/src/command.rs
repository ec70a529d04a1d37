//! Typed commands parsed from `(tool name, argument record)` invocations.
//!
//! One variant per catalog tool, each with a strongly-typed payload; the
//! argument records arrive with camelCase keys, matching the wire shape the
//! model is prompted with.

use serde::Deserialize;
use serde_json::Value;

use crate::error::AgentError;

/// One entry of a `bulk_post` request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub user_name: String,
    pub content: String,
}

/// A fully-typed agent invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCommand {
    CreateAccount {
        name: String,
        email: String,
    },
    DeleteAccount {
        identifier: String,
    },
    UpdateUserProfile {
        identifier: String,
        new_name: Option<String>,
        new_avatar_url: Option<String>,
    },
    ForceLogoutAll,
    RecoverPassword {
        email: String,
    },
    BanUser {
        identifier: String,
    },
    CreatePost {
        user_name: String,
        content: String,
    },
    BulkPost {
        posts: Vec<PostRequest>,
    },
    CreateComment {
        post_id: String,
        user_name: String,
        content: String,
    },
    AddFriend {
        user_a: String,
        user_b: String,
    },
    FollowUser {
        follower_name: String,
        target_name: String,
    },
}

#[derive(Deserialize)]
struct AccountArgs {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct IdentifierArgs {
    identifier: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileArgs {
    identifier: String,
    #[serde(default)]
    new_name: Option<String>,
    #[serde(default)]
    new_avatar_url: Option<String>,
}

#[derive(Deserialize)]
struct EmailArgs {
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostArgs {
    user_name: String,
    content: String,
}

#[derive(Deserialize)]
struct BulkPostArgs {
    posts: Vec<PostRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentArgs {
    post_id: String,
    user_name: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FriendArgs {
    user_a: String,
    user_b: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowArgs {
    follower_name: String,
    target_name: String,
}

impl AgentCommand {
    /// Parse a named invocation with its loose argument record.
    pub fn parse(name: &str, args: &Value) -> Result<Self, AgentError> {
        fn typed<T: for<'de> Deserialize<'de>>(tool: &str, args: &Value) -> Result<T, AgentError> {
            serde_json::from_value(args.clone()).map_err(|source| AgentError::InvalidArgs {
                tool: tool.to_string(),
                source,
            })
        }

        let command = match name {
            "create_account" => {
                let AccountArgs { name, email } = typed(name, args)?;
                Self::CreateAccount { name, email }
            }
            "delete_account" => {
                let IdentifierArgs { identifier } = typed(name, args)?;
                Self::DeleteAccount { identifier }
            }
            "update_user_profile" => {
                let ProfileArgs {
                    identifier,
                    new_name,
                    new_avatar_url,
                } = typed(name, args)?;
                Self::UpdateUserProfile {
                    identifier,
                    new_name,
                    new_avatar_url,
                }
            }
            "force_logout_all" => Self::ForceLogoutAll,
            "recover_password" => {
                let EmailArgs { email } = typed(name, args)?;
                Self::RecoverPassword { email }
            }
            "ban_user" => {
                let IdentifierArgs { identifier } = typed(name, args)?;
                Self::BanUser { identifier }
            }
            "create_post" => {
                let PostArgs { user_name, content } = typed(name, args)?;
                Self::CreatePost { user_name, content }
            }
            "bulk_post" => {
                let BulkPostArgs { posts } = typed(name, args)?;
                Self::BulkPost { posts }
            }
            "create_comment" => {
                let CommentArgs {
                    post_id,
                    user_name,
                    content,
                } = typed(name, args)?;
                Self::CreateComment {
                    post_id,
                    user_name,
                    content,
                }
            }
            "add_friend" => {
                let FriendArgs { user_a, user_b } = typed(name, args)?;
                Self::AddFriend { user_a, user_b }
            }
            "follow_user" => {
                let FollowArgs {
                    follower_name,
                    target_name,
                } = typed(name, args)?;
                Self::FollowUser {
                    follower_name,
                    target_name,
                }
            }
            other => return Err(AgentError::UnknownTool(other.to_string())),
        };
        Ok(command)
    }
}
