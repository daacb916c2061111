use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};
use crate::icon::SocialIcon;

/// A provider link owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaLink {
    pub id: EntityId,
    pub name: String,
    pub url: String,
}

impl SocialMediaLink {
    /// Display icon for the provider label.
    pub fn icon(&self) -> SocialIcon {
        SocialIcon::for_name(&self.name)
    }
}

impl Entity for SocialMediaLink {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Body of `POST /users/{id}/social-media`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaPayload {
    pub name: String,
    pub url: String,
}
