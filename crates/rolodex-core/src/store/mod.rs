// ── Entity collection store ──
//
// Owned, id-keyed caches. The directory controller owns the user cache;
// the detail controller owns the nested social-media cache of one user.

mod collection;

pub use collection::EntityCollection;
