// In-memory `Gateway` for controller tests.
//
// Supports per-operation failure injection and per-operation gates that
// hold a call until the test releases it, so interleavings with
// navigation can be scripted deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use tokio::sync::Notify;

use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::model::{EntityId, SocialMediaLink, SocialMediaPayload, User, UserPayload};
use crate::sync::lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ListSocialMedia,
    CreateSocialMedia,
    DeleteSocialMedia,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    Unavailable,
    Status(u16),
}

impl Failure {
    fn into_error(self) -> CoreError {
        match self {
            Self::Unavailable => CoreError::GatewayUnavailable {
                reason: "connection refused".into(),
            },
            Self::Status(status) => CoreError::GatewayRejected {
                status: Some(status),
                message: format!("HTTP {status}: scripted failure"),
            },
        }
    }
}

#[derive(Default)]
struct FakeState {
    users: IndexMap<EntityId, User>,
    links: HashMap<EntityId, IndexMap<EntityId, SocialMediaLink>>,
    next_id: u64,
    failures: HashMap<Op, Failure>,
    calls: Vec<Op>,
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    state: Mutex<FakeState>,
    gates: Mutex<HashMap<Op, Arc<Notify>>>,
}

pub(crate) fn user(id: u64, first: &str, last: &str) -> User {
    User {
        id: EntityId::Numeric(id),
        first_name: first.into(),
        last_name: last.into(),
        phone: format!("555-{id:04}"),
        email: format!("{}@example.com", first.to_lowercase()),
    }
}

pub(crate) fn link(id: u64, name: &str, url: &str) -> SocialMediaLink {
    SocialMediaLink {
        id: EntityId::Numeric(id),
        name: name.into(),
        url: url.into(),
    }
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed a remote user. Generated ids continue after the largest seeded one.
    pub(crate) fn with_user(self, user: User) -> Self {
        {
            let mut state = lock(&self.state);
            if let Some(n) = user.id.as_numeric() {
                state.next_id = state.next_id.max(n);
            }
            state.users.insert(user.id.clone(), user);
        }
        self
    }

    pub(crate) fn with_link(self, user_id: u64, link: SocialMediaLink) -> Self {
        {
            let mut state = lock(&self.state);
            if let Some(n) = link.id.as_numeric() {
                state.next_id = state.next_id.max(n);
            }
            state
                .links
                .entry(EntityId::Numeric(user_id))
                .or_default()
                .insert(link.id.clone(), link);
        }
        self
    }

    /// Start generated ids after `last`.
    pub(crate) fn with_next_id(self, last: u64) -> Self {
        lock(&self.state).next_id = last;
        self
    }

    pub(crate) fn fail(&self, op: Op, failure: Failure) {
        lock(&self.state).failures.insert(op, failure);
    }

    pub(crate) fn heal(&self, op: Op) {
        lock(&self.state).failures.remove(&op);
    }

    /// Remove a user behind the controller's back.
    pub(crate) fn forget_user(&self, id: u64) {
        lock(&self.state).users.shift_remove(&EntityId::Numeric(id));
    }

    /// Block every subsequent call to `op` until [`release`](Self::release).
    pub(crate) fn hold(&self, op: Op) {
        lock(&self.gates).insert(op, Arc::new(Notify::new()));
    }

    /// Let one held (or the next) call to `op` through.
    pub(crate) fn release(&self, op: Op) {
        let gate = lock(&self.gates).get(&op).cloned();
        if let Some(gate) = gate {
            gate.notify_one();
        }
    }

    pub(crate) fn calls(&self) -> Vec<Op> {
        lock(&self.state).calls.clone()
    }

    pub(crate) fn count(&self, op: Op) -> usize {
        lock(&self.state).calls.iter().filter(|c| **c == op).count()
    }

    async fn enter(&self, op: Op) -> Result<(), CoreError> {
        lock(&self.state).calls.push(op);
        let gate = lock(&self.gates).get(&op).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match lock(&self.state).failures.get(&op) {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }

    fn not_found(what: &str, id: &EntityId) -> CoreError {
        CoreError::GatewayRejected {
            status: Some(404),
            message: format!("HTTP 404: {what} {id} not found"),
        }
    }
}

impl Gateway for FakeGateway {
    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        self.enter(Op::ListUsers).await?;
        Ok(lock(&self.state).users.values().cloned().collect())
    }

    async fn get_user(&self, id: &EntityId) -> Result<User, CoreError> {
        self.enter(Op::GetUser).await?;
        lock(&self.state)
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("User", id))
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User, CoreError> {
        self.enter(Op::CreateUser).await?;
        let mut state = lock(&self.state);
        state.next_id += 1;
        let user = User {
            id: EntityId::Numeric(state.next_id),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            phone: payload.phone.clone(),
            email: payload.email.clone(),
        };
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &EntityId, payload: &UserPayload) -> Result<User, CoreError> {
        self.enter(Op::UpdateUser).await?;
        let mut state = lock(&self.state);
        let Some(user) = state.users.get_mut(id) else {
            return Err(Self::not_found("User", id));
        };
        user.first_name.clone_from(&payload.first_name);
        user.last_name.clone_from(&payload.last_name);
        user.phone.clone_from(&payload.phone);
        user.email.clone_from(&payload.email);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &EntityId) -> Result<(), CoreError> {
        self.enter(Op::DeleteUser).await?;
        let mut state = lock(&self.state);
        state.links.remove(id);
        state
            .users
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("User", id))
    }

    async fn list_social_media(&self, user_id: &EntityId) -> Result<Vec<SocialMediaLink>, CoreError> {
        self.enter(Op::ListSocialMedia).await?;
        let state = lock(&self.state);
        Ok(state
            .links
            .get(user_id)
            .map(|links| links.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_social_media(
        &self,
        user_id: &EntityId,
        payload: &SocialMediaPayload,
    ) -> Result<SocialMediaLink, CoreError> {
        self.enter(Op::CreateSocialMedia).await?;
        let mut state = lock(&self.state);
        if !state.users.contains_key(user_id) {
            return Err(Self::not_found("User", user_id));
        }
        state.next_id += 1;
        let link = SocialMediaLink {
            id: EntityId::Numeric(state.next_id),
            name: payload.name.clone(),
            url: payload.url.clone(),
        };
        state
            .links
            .entry(user_id.clone())
            .or_default()
            .insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn delete_social_media(
        &self,
        user_id: &EntityId,
        link_id: &EntityId,
    ) -> Result<(), CoreError> {
        self.enter(Op::DeleteSocialMedia).await?;
        lock(&self.state)
            .links
            .get_mut(user_id)
            .and_then(|links| links.shift_remove(link_id))
            .map(|_| ())
            .ok_or_else(|| Self::not_found("Social media link", link_id))
    }
}
