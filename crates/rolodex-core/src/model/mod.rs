// ── Domain model ──
//
// Canonical types shared by the store, the controllers, and consumers.

pub mod entity_id;
pub mod social_media;
pub mod user;

pub use entity_id::EntityId;
pub use social_media::{SocialMediaLink, SocialMediaPayload};
pub use user::{User, UserPayload};

/// Anything the entity store can key by identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &EntityId;
}
