use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Locally stored user profile.
///
/// A single profile per store, keyed implicitly by the installation's
/// user identifier. The avatar is embedded as a base64 `data:` URL so
/// the profile file is self-contained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub username: String,
    pub bio: String,
    pub avatar: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: "Pengguna".to_string(),
            bio: String::new(),
            avatar: None,
        }
    }
}

impl UserProfile {
    /// Embeds raw image bytes as the avatar data URL.
    pub fn set_avatar(&mut self, mime: &str, bytes: &[u8]) {
        self.avatar = Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)));
    }

    /// Clears the avatar.
    pub fn clear_avatar(&mut self) {
        self.avatar = None;
    }
}
