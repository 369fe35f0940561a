//! User profiles.

use serde::{Deserialize, Serialize};

/// Display name used when a profile is missing or malformed.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown User";

/// Identity and display info for a user.
///
/// Owned by the identity subsystem and read-only to this core. Profile
/// fields sourced from external providers can be missing or malformed;
/// consumers degrade them to defaults via [`UserProfile::display_name`]
/// rather than failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable user identifier.
    pub uid: String,
    /// Display name, possibly empty for degraded profiles.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Avatar URL, if the provider supplied one.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Whether the user appears on the global leaderboard.
    pub show_on_leaderboard: bool,
}

impl UserProfile {
    /// Returns the display name, falling back to a default when empty.
    pub fn display_name_or_default(&self) -> &str {
        if self.display_name.is_empty() {
            UNKNOWN_DISPLAY_NAME
        } else {
            &self.display_name
        }
    }
}
