// ── Provider icon lookup ──
//
// Pure mapping from a free-form provider label to a closed set of icons.

use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// Visual identifier for a social-media provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Facebook,
    Twitter,
    Instagram,
    /// Fallback for any unrecognized provider.
    Generic,
}

impl SocialIcon {
    /// Case-insensitive lookup; unknown names map to [`SocialIcon::Generic`].
    pub fn for_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "facebook" => Self::Facebook,
            "twitter" => Self::Twitter,
            "instagram" => Self::Instagram,
            _ => Self::Generic,
        }
    }

    /// Single-glyph rendering for terminal output.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Facebook => "f",
            Self::Twitter => "t",
            Self::Instagram => "i",
            Self::Generic => "@",
        }
    }
}
