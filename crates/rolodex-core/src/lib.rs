//! View navigation and data synchronization between `rolodex-api` and a
//! front end (the `rolodex` CLI, or any other consumer).
//!
//! - **[`Session`]** - The application shell. Owns the [`Navigator`], the
//!   [`DirectoryController`] and, while a user is selected, a
//!   [`DetailController`]. Cheap to clone.
//!
//! - **[`Navigator`]** - Selection state (`Directory` or `Detail(id)`). Every
//!   selection change issues a fresh [`ViewTicket`]; detail-scoped
//!   completions that arrive after their ticket was superseded come back as
//!   [`Outcome::Discarded`].
//!
//! - **[`EntityCollection<T>`]** - Ordered id-keyed cache with `watch`
//!   snapshots, consumed through [`EntityStream<T>`].
//!
//! - **Forms** ([`form`]) - Fully-populated drafts over closed field sets,
//!   plus the [`DraftMode`] that keeps create and edit mutually exclusive.
//!
//! - **[`Gateway`]** - The async CRUD seam. [`ApiGateway`] implements it
//!   over HTTP; tests substitute in-memory fakes.

pub mod config;
pub mod convert;
pub mod detail;
pub mod directory;
pub mod error;
pub mod form;
pub mod gateway;
pub mod icon;
pub mod model;
pub mod navigation;
pub mod session;
pub mod store;
pub mod stream;

mod sync;
#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_API_URL, GatewayConfig};
pub use detail::{DetailController, Outcome, Readiness};
pub use directory::DirectoryController;
pub use error::CoreError;
pub use form::{DraftMode, Form, SocialMediaDraft, SocialMediaField, UserDraft, UserField};
pub use gateway::{ApiGateway, Gateway};
pub use icon::SocialIcon;
pub use model::{Entity, EntityId, SocialMediaLink, SocialMediaPayload, User, UserPayload};
pub use navigation::{Navigator, View, ViewState, ViewTicket};
pub use session::Session;
pub use store::EntityCollection;
pub use stream::{EntityStream, Snapshot};
