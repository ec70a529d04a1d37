//! The tool catalog advertised to the model endpoint.

/// Name and description of one invocable tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every tool the agent layer accepts, in the order they are advertised.
pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "create_account",
        description: "Create a new user account. Returns the password.",
    },
    ToolSpec {
        name: "delete_account",
        description: "Permanently delete a user account by email or name.",
    },
    ToolSpec {
        name: "update_user_profile",
        description: "Update a user's name or avatar.",
    },
    ToolSpec {
        name: "force_logout_all",
        description: "Log out all users.",
    },
    ToolSpec {
        name: "recover_password",
        description: "Get a password by email.",
    },
    ToolSpec {
        name: "ban_user",
        description: "Ban a user by id or name.",
    },
    ToolSpec {
        name: "create_post",
        description: "Create a post for a user.",
    },
    ToolSpec {
        name: "bulk_post",
        description: "Create posts for multiple users at once.",
    },
    ToolSpec {
        name: "create_comment",
        description: "Comment on a post.",
    },
    ToolSpec {
        name: "add_friend",
        description: "Force-connect two users as friends.",
    },
    ToolSpec {
        name: "follow_user",
        description: "Make one user follow another.",
    },
];
