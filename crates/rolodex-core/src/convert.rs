// ── API-to-domain type conversions ──
//
// Bridges raw `rolodex_api::types` wire structs into canonical
// `rolodex_core::model` types and back for request bodies.

use rolodex_api::types::{
    ResourceId, SocialMediaRequest, SocialMediaResponse, UserRequest, UserResponse,
};

use crate::model::{EntityId, SocialMediaLink, SocialMediaPayload, User, UserPayload};

// ── Identifiers ────────────────────────────────────────────────────

impl From<ResourceId> for EntityId {
    fn from(id: ResourceId) -> Self {
        match id {
            ResourceId::Number(n) => Self::Numeric(n),
            ResourceId::Text(s) => Self::from(s),
        }
    }
}

impl From<&EntityId> for ResourceId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Numeric(n) => Self::Number(*n),
            EntityId::Opaque(s) => Self::Text(s.clone()),
        }
    }
}

// ── Users ──────────────────────────────────────────────────────────

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        Self {
            id: u.id.into(),
            first_name: u.first_name,
            last_name: u.last_name,
            phone: u.phone,
            email: u.email,
        }
    }
}

impl From<&UserPayload> for UserRequest {
    fn from(p: &UserPayload) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
        }
    }
}

// ── Social media ───────────────────────────────────────────────────

impl From<SocialMediaResponse> for SocialMediaLink {
    fn from(s: SocialMediaResponse) -> Self {
        Self {
            id: s.id.into(),
            name: s.name,
            url: s.url,
        }
    }
}

impl From<&SocialMediaPayload> for SocialMediaRequest {
    fn from(p: &SocialMediaPayload) -> Self {
        Self {
            name: p.name.clone(),
            url: p.url.clone(),
        }
    }
}
