use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares an opaque entity identifier backed by a UUIDv4.
///
/// Every entity kind gets its own type so a `PostId` can never be handed to
/// an operation expecting a `ChatId`.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifies a user account.
    UserId
);
entity_id!(
    /// Identifies a feed post.
    PostId
);
entity_id!(
    /// Identifies a comment on a post.
    CommentId
);
entity_id!(
    /// Identifies an ephemeral story.
    StoryId
);
entity_id!(
    /// Identifies a private or group chat.
    ChatId
);
entity_id!(
    /// Identifies a chat message.
    MessageId
);
entity_id!(
    /// Identifies a notification.
    NotificationId
);
