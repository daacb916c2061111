// ── Directory controller ──
//
// Owns the user cache, the user draft and the draft mode. Cache mutations
// only follow a confirmed gateway response; a failed submission leaves the
// draft untouched so the input survives for another attempt.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::form::{DraftMode, UserDraft, UserField};
use crate::gateway::Gateway;
use crate::model::{EntityId, User};
use crate::store::EntityCollection;
use crate::stream::EntityStream;
use crate::sync::lock;

#[derive(Default)]
struct DirectoryState {
    users: EntityCollection<User>,
    draft: UserDraft,
    mode: DraftMode,
}

/// Handle to the directory view's state. Clones share the same state.
pub struct DirectoryController<G> {
    gateway: Arc<G>,
    state: Arc<Mutex<DirectoryState>>,
}

impl<G> Clone for DirectoryController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: Arc::clone(&self.state),
        }
    }
}

impl<G: Gateway> DirectoryController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(DirectoryState::default())),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Cached users in display order.
    pub fn users(&self) -> Arc<Vec<Arc<User>>> {
        lock(&self.state).users.snapshot()
    }

    pub fn user(&self, id: &EntityId) -> Option<Arc<User>> {
        lock(&self.state).users.get(id)
    }

    /// Reactive view of the user cache.
    pub fn subscribe(&self) -> EntityStream<User> {
        EntityStream::new(lock(&self.state).users.subscribe())
    }

    pub fn draft(&self) -> UserDraft {
        lock(&self.state).draft.clone()
    }

    pub fn mode(&self) -> DraftMode {
        lock(&self.state).mode.clone()
    }

    // ── Draft ────────────────────────────────────────────────────────

    /// Replace one draft field. A first keystroke on an idle form starts
    /// a create draft.
    pub fn set_field(&self, field: UserField, value: impl Into<String>) {
        let mut state = lock(&self.state);
        state.draft.set(field, value);
        if state.mode == DraftMode::Idle {
            state.mode = DraftMode::Creating;
        }
    }

    /// Load a cached user's fields into the draft and enter edit mode.
    ///
    /// Overwrites any pending create draft or earlier edit.
    pub fn begin_edit(&self, id: &EntityId) -> Result<(), CoreError> {
        let mut state = lock(&self.state);
        let user = state.users.get(id).ok_or_else(|| CoreError::NotFound {
            entity: "User".into(),
            id: id.to_string(),
        })?;
        state.draft = UserDraft::from_user(&user);
        state.mode = DraftMode::Editing(id.clone());
        debug!(user_id = %id, "editing user");
        Ok(())
    }

    /// Leave edit (or create) mode and clear the draft.
    pub fn cancel_edit(&self) {
        let mut state = lock(&self.state);
        state.draft.reset();
        state.mode = DraftMode::Idle;
    }

    // ── Gateway operations ───────────────────────────────────────────

    /// Fetch every user and replace the cache wholesale.
    pub async fn load(&self) -> Result<(), CoreError> {
        let users = self.gateway.list_users().await.inspect_err(|e| {
            warn!(error = %e, "user list fetch failed");
        })?;

        let count = users.len();
        lock(&self.state).users.replace_all(users);
        info!(count, "user directory loaded");
        Ok(())
    }

    /// Submit the draft as a new user.
    pub async fn create(&self) -> Result<User, CoreError> {
        let payload = {
            let state = lock(&self.state);
            if let DraftMode::Editing(id) = &state.mode {
                return Err(CoreError::InvalidState {
                    message: format!("user {id} is being edited; submit or cancel the edit first"),
                });
            }
            state.draft.require_complete()?;
            state.draft.to_payload()
        };

        let user = self.gateway.create_user(&payload).await?;

        let mut state = lock(&self.state);
        state.users.push(user.clone());
        // An edit started while the request was in flight keeps its draft.
        if state.mode.editing_id().is_none() {
            state.draft.reset();
            state.mode = DraftMode::Idle;
        }
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Submit the draft as changes to the user being edited.
    pub async fn update(&self) -> Result<User, CoreError> {
        let (id, payload) = {
            let state = lock(&self.state);
            let DraftMode::Editing(id) = &state.mode else {
                return Err(CoreError::InvalidState {
                    message: "no user is being edited".into(),
                });
            };
            state.draft.require_complete()?;
            (id.clone(), state.draft.to_payload())
        };

        let user = self.gateway.update_user(&id, &payload).await?;

        let mut state = lock(&self.state);
        if !state.users.replace(user.clone()) {
            debug!(user_id = %user.id, "updated user no longer cached");
        }
        if state.mode.editing_id() == Some(&id) {
            state.draft.reset();
            state.mode = DraftMode::Idle;
        }
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// The form's single submit action: update while editing, else create.
    pub async fn submit(&self) -> Result<User, CoreError> {
        let editing = lock(&self.state).mode.editing_id().is_some();
        if editing {
            self.update().await
        } else {
            self.create().await
        }
    }

    /// Delete a user remotely, then drop it from the cache.
    pub async fn remove(&self, id: &EntityId) -> Result<(), CoreError> {
        self.gateway.delete_user(id).await?;

        let mut state = lock(&self.state);
        state.users.remove(id);
        if state.mode.editing_id() == Some(id) {
            state.draft.reset();
            state.mode = DraftMode::Idle;
        }
        info!(user_id = %id, "user removed");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{FakeGateway, Failure, Op, user};
    use pretty_assertions::assert_eq;

    fn controller(gateway: FakeGateway) -> (Arc<FakeGateway>, DirectoryController<FakeGateway>) {
        let gateway = Arc::new(gateway);
        (Arc::clone(&gateway), DirectoryController::new(gateway))
    }

    fn fill_lee(dir: &DirectoryController<FakeGateway>) {
        dir.set_field(UserField::FirstName, "Lee");
        dir.set_field(UserField::LastName, "Ng");
        dir.set_field(UserField::Phone, "555");
        dir.set_field(UserField::Email, "l@x.com");
    }

    fn names(dir: &DirectoryController<FakeGateway>) -> Vec<String> {
        dir.users().iter().map(|u| u.first_name.clone()).collect()
    }

    // ── Load ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn load_replaces_cache_wholesale() {
        let (gateway, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));

        dir.load().await.unwrap();
        assert_eq!(names(&dir), vec!["Ana"]);

        gateway.forget_user(1);
        dir.load().await.unwrap();
        assert!(dir.users().is_empty());
    }

    #[tokio::test]
    async fn failed_load_keeps_cache() {
        let (gateway, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        dir.load().await.unwrap();

        gateway.fail(Op::ListUsers, Failure::Unavailable);
        let err = dir.load().await.unwrap_err();

        assert!(matches!(err, CoreError::GatewayUnavailable { .. }));
        assert_eq!(names(&dir), vec!["Ana"]);
        assert_eq!(gateway.count(Op::ListUsers), 2);
    }

    // ── Create ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_appends_server_record_and_resets_draft() {
        let (_, dir) = controller(
            FakeGateway::new()
                .with_user(user(1, "Ana", "Diaz"))
                .with_next_id(6),
        );
        dir.load().await.unwrap();
        fill_lee(&dir);
        assert_eq!(dir.mode(), DraftMode::Creating);

        let created = dir.create().await.unwrap();

        assert_eq!(created.id, EntityId::Numeric(7));
        assert_eq!(names(&dir), vec!["Ana", "Lee"]);
        assert!(dir.draft().is_blank());
        assert_eq!(dir.mode(), DraftMode::Idle);
    }

    #[tokio::test]
    async fn incomplete_draft_never_reaches_gateway() {
        let (gateway, dir) = controller(FakeGateway::new());
        dir.set_field(UserField::FirstName, "Lee");

        let err = dir.create().await.unwrap_err();

        match err {
            CoreError::Validation { missing } => {
                assert_eq!(missing, vec!["lastName", "phone", "email"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(gateway.count(Op::CreateUser), 0);
        assert_eq!(dir.draft().get(UserField::FirstName), "Lee");
    }

    #[tokio::test]
    async fn rejected_create_preserves_draft() {
        let (gateway, dir) = controller(FakeGateway::new());
        gateway.fail(Op::CreateUser, Failure::Status(400));
        fill_lee(&dir);
        let before = dir.draft();

        let err = dir.create().await.unwrap_err();

        assert!(err.is_gateway_failure());
        assert!(dir.users().is_empty());
        assert_eq!(dir.draft(), before);
        assert_eq!(dir.mode(), DraftMode::Creating);
    }

    #[tokio::test]
    async fn create_is_rejected_while_editing() {
        let (gateway, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        dir.load().await.unwrap();
        dir.begin_edit(&EntityId::Numeric(1)).unwrap();

        let err = dir.create().await.unwrap_err();

        assert!(matches!(err, CoreError::InvalidState { .. }));
        assert_eq!(gateway.count(Op::CreateUser), 0);
    }

    // ── Edit ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn begin_edit_twice_leaves_only_second_user() {
        let (_, dir) = controller(
            FakeGateway::new()
                .with_user(user(1, "Ana", "Diaz"))
                .with_user(user(2, "Bo", "Park")),
        );
        dir.load().await.unwrap();

        dir.begin_edit(&EntityId::Numeric(1)).unwrap();
        dir.begin_edit(&EntityId::Numeric(2)).unwrap();

        assert_eq!(dir.mode(), DraftMode::Editing(EntityId::Numeric(2)));
        let bo = dir.user(&EntityId::Numeric(2)).unwrap();
        assert_eq!(dir.draft(), UserDraft::from_user(&bo));
    }

    #[tokio::test]
    async fn begin_edit_of_unknown_user_is_not_found() {
        let (_, dir) = controller(FakeGateway::new());
        let err = dir.begin_edit(&EntityId::Numeric(42)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(dir.mode(), DraftMode::Idle);
    }

    #[tokio::test]
    async fn begin_edit_overwrites_create_draft() {
        let (_, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        dir.load().await.unwrap();
        fill_lee(&dir);

        dir.begin_edit(&EntityId::Numeric(1)).unwrap();

        assert_eq!(dir.draft().get(UserField::FirstName), "Ana");
    }

    #[tokio::test]
    async fn update_replaces_entry_in_place() {
        let (_, dir) = controller(
            FakeGateway::new()
                .with_user(user(1, "Ana", "Diaz"))
                .with_user(user(2, "Bo", "Park")),
        );
        dir.load().await.unwrap();
        dir.begin_edit(&EntityId::Numeric(1)).unwrap();
        dir.set_field(UserField::FirstName, "Anna");

        let updated = dir.submit().await.unwrap();

        assert_eq!(updated.first_name, "Anna");
        assert_eq!(names(&dir), vec!["Anna", "Bo"]);
        assert_eq!(dir.mode(), DraftMode::Idle);
        assert!(dir.draft().is_blank());
    }

    #[tokio::test]
    async fn failed_update_keeps_edit_mode_and_draft() {
        let (gateway, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        dir.load().await.unwrap();
        dir.begin_edit(&EntityId::Numeric(1)).unwrap();
        dir.set_field(UserField::Phone, "999");
        gateway.fail(Op::UpdateUser, Failure::Status(500));

        assert!(dir.update().await.is_err());

        assert_eq!(dir.mode(), DraftMode::Editing(EntityId::Numeric(1)));
        assert_eq!(dir.draft().get(UserField::Phone), "999");
        assert_eq!(dir.user(&EntityId::Numeric(1)).unwrap().phone, "555-0001");
    }

    #[tokio::test]
    async fn update_outside_edit_mode_is_invalid() {
        let (gateway, dir) = controller(FakeGateway::new());
        fill_lee(&dir);
        let err = dir.update().await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { .. }));
        assert_eq!(gateway.count(Op::UpdateUser), 0);
    }

    #[tokio::test]
    async fn cancel_edit_resets_without_network() {
        let (gateway, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        dir.load().await.unwrap();
        dir.begin_edit(&EntityId::Numeric(1)).unwrap();

        dir.cancel_edit();

        assert_eq!(dir.mode(), DraftMode::Idle);
        assert!(dir.draft().is_blank());
        assert_eq!(gateway.calls(), vec![Op::ListUsers]);
    }

    // ── Remove ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn rejected_remove_leaves_cache_unchanged() {
        let (gateway, dir) = controller(
            FakeGateway::new()
                .with_user(user(1, "Ana", "Diaz"))
                .with_user(user(7, "Lee", "Ng")),
        );
        dir.load().await.unwrap();
        gateway.fail(Op::DeleteUser, Failure::Status(404));

        let err = dir.remove(&EntityId::Numeric(7)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(names(&dir), vec!["Ana", "Lee"]);

        gateway.heal(Op::DeleteUser);
        dir.remove(&EntityId::Numeric(7)).await.unwrap();
        assert_eq!(names(&dir), vec!["Ana"]);
    }

    #[tokio::test]
    async fn removing_edited_user_cancels_edit() {
        let (_, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        dir.load().await.unwrap();
        dir.begin_edit(&EntityId::Numeric(1)).unwrap();

        dir.remove(&EntityId::Numeric(1)).await.unwrap();

        assert_eq!(dir.mode(), DraftMode::Idle);
        assert!(dir.draft().is_blank());
    }

    #[tokio::test]
    async fn subscribers_observe_cache_changes() {
        let (_, dir) = controller(FakeGateway::new().with_user(user(1, "Ana", "Diaz")));
        let mut stream = dir.subscribe();
        assert!(stream.current().is_empty());

        dir.load().await.unwrap();

        let snapshot = stream.changed().await.unwrap();
        assert_eq!(snapshot.len(), 1);
    }
}
