/// Application name
pub const APP_NAME: &str = "Orbit";

/// How long a story stays visible before the expiry sweep removes it
pub const STORY_RETENTION_HOURS: i64 = 24;

/// A user counts as present if they heartbeated within this window
pub const PRESENCE_WINDOW_SECS: i64 = 60;

/// Length of passwords generated for agent-created accounts
pub const GENERATED_PASSWORD_LEN: usize = 8;

/// Display name of the built-in system assistant account
pub const ASSISTANT_NAME: &str = "Orbit Assistant";

/// Email of the built-in system assistant account
pub const ASSISTANT_EMAIL: &str = "assistant@orbit.app";

/// Profile bio of the built-in system assistant account
pub const ASSISTANT_BIO: &str = "I am the system administrator of Orbit.";

/// Fallback avatar service for accounts created without an avatar
pub const AVATAR_SERVICE_URL: &str = "https://ui-avatars.com/api/?name=";

/// File name of the persisted store snapshot
pub const SNAPSHOT_FILE: &str = "orbit.json";

/// Environment variable overriding the snapshot directory
pub const DATA_DIR_ENV: &str = "ORBIT_DATA_DIR";
