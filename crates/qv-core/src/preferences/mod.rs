//! Persisted user preferences and their storage keys.

pub mod theme;

pub use theme::{Theme, ThemeParseError};

/// Key holding the theme name (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "theme";
/// Key holding the raw session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key holding the signed-in [`crate::auth::User`] as JSON.
pub const USER_DATA_KEY: &str = "user_data";
