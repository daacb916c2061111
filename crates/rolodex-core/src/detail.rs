// ── Detail controller ──
//
// Scoped to one selected user and the `ViewTicket` it was opened under.
// Owns the loaded user, the nested social-media cache and the add-link
// draft. Every completion is applied only while the ticket is current;
// once navigation moves on, results are dropped and reported as
// `Outcome::Discarded`.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::form::{SocialMediaDraft, SocialMediaField};
use crate::gateway::Gateway;
use crate::model::{EntityId, SocialMediaLink, User};
use crate::navigation::ViewTicket;
use crate::store::EntityCollection;
use crate::stream::EntityStream;
use crate::sync::lock;

/// Whether the selected user's record has been fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

/// Result of a view-scoped operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The completion was applied to the view.
    Applied(T),
    /// The view was navigated away from; the completion was dropped.
    Discarded,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Discarded => None,
        }
    }
}

#[derive(Default)]
struct DetailState {
    user: Option<Arc<User>>,
    readiness: Readiness,
    links: EntityCollection<SocialMediaLink>,
    draft: SocialMediaDraft,
    warnings: Vec<String>,
}

/// Handle to one detail view. Clones share the same state.
pub struct DetailController<G> {
    gateway: Arc<G>,
    user_id: EntityId,
    ticket: ViewTicket,
    state: Arc<Mutex<DetailState>>,
}

impl<G> Clone for DetailController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            user_id: self.user_id.clone(),
            ticket: self.ticket.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<G: Gateway> DetailController<G> {
    pub fn new(gateway: Arc<G>, user_id: EntityId, ticket: ViewTicket) -> Self {
        Self {
            gateway,
            user_id,
            ticket,
            state: Arc::new(Mutex::new(DetailState::default())),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &EntityId {
        &self.user_id
    }

    /// `false` once navigation has moved away from this view.
    pub fn is_active(&self) -> bool {
        self.ticket.is_current()
    }

    pub fn readiness(&self) -> Readiness {
        lock(&self.state).readiness
    }

    pub fn user(&self) -> Option<Arc<User>> {
        lock(&self.state).user.clone()
    }

    pub fn links(&self) -> Arc<Vec<Arc<SocialMediaLink>>> {
        lock(&self.state).links.snapshot()
    }

    pub fn subscribe_links(&self) -> EntityStream<SocialMediaLink> {
        EntityStream::new(lock(&self.state).links.subscribe())
    }

    pub fn draft(&self) -> SocialMediaDraft {
        lock(&self.state).draft.clone()
    }

    /// Non-blocking problems from the last load (e.g. a failed link fetch).
    pub fn warnings(&self) -> Vec<String> {
        lock(&self.state).warnings.clone()
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Fetch the user and its links concurrently.
    ///
    /// Links are applied as soon as they arrive. The view turns `Ready`
    /// when the user fetch succeeds. If the user fetch fails, the view
    /// drops back to `NotReady` with no user and no links, even after an
    /// earlier successful load; a 404 becomes [`CoreError::StaleSelection`].
    pub async fn load(&self) -> Result<Outcome<Arc<User>>, CoreError> {
        let user_fut = self.gateway.get_user(&self.user_id);
        let links_fut = self.gateway.list_social_media(&self.user_id);
        tokio::pin!(user_fut, links_fut);

        let mut user_result: Option<Result<User, CoreError>> = None;
        let mut links_done = false;
        let mut warnings = Vec::new();

        loop {
            tokio::select! {
                biased;

                () = self.ticket.cancelled() => {
                    warn!(user_id = %self.user_id, "detail load discarded after navigation");
                    return Ok(Outcome::Discarded);
                }

                result = &mut user_fut, if user_result.is_none() => {
                    if let Ok(user) = &result {
                        self.apply_user(user);
                    }
                    user_result = Some(result);
                }

                result = &mut links_fut, if !links_done => {
                    links_done = true;
                    if let Some(warning) = self.apply_links(result) {
                        warnings.push(warning);
                    }
                }
            }

            match &user_result {
                Some(Err(_)) => break,
                Some(Ok(_)) if links_done => break,
                _ => {}
            }
        }

        let mut state = lock(&self.state);
        if !self.ticket.is_current() {
            return Ok(Outcome::Discarded);
        }
        match user_result {
            Some(Ok(_)) => {
                state.warnings = warnings;
                let user = state.user.clone().ok_or_else(|| CoreError::InvalidState {
                    message: "loaded user missing from view state".into(),
                })?;
                info!(
                    user_id = %self.user_id,
                    links = state.links.len(),
                    "detail view ready"
                );
                Ok(Outcome::Applied(user))
            }
            Some(Err(err)) => {
                state.user = None;
                state.readiness = Readiness::NotReady;
                state.links.clear();
                state.warnings = warnings;
                warn!(user_id = %self.user_id, error = %err, "user fetch failed");
                if err.is_not_found() {
                    Err(CoreError::StaleSelection {
                        id: self.user_id.to_string(),
                    })
                } else {
                    Err(err)
                }
            }
            None => Err(CoreError::InvalidState {
                message: "detail load finished without a user result".into(),
            }),
        }
    }

    fn apply_user(&self, user: &User) {
        let mut state = lock(&self.state);
        if self.ticket.is_current() {
            state.user = Some(Arc::new(user.clone()));
            state.readiness = Readiness::Ready;
        }
    }

    /// Apply a link fetch result. Returns a warning on failure.
    fn apply_links(&self, result: Result<Vec<SocialMediaLink>, CoreError>) -> Option<String> {
        let mut state = lock(&self.state);
        if !self.ticket.is_current() {
            return None;
        }
        match result {
            Ok(links) => {
                debug!(user_id = %self.user_id, count = links.len(), "links loaded");
                state.links.replace_all(links);
                None
            }
            Err(err) => {
                warn!(user_id = %self.user_id, error = %err, "social media fetch failed");
                state.links.clear();
                Some(format!("Social media links unavailable: {err}"))
            }
        }
    }

    // ── Add form ─────────────────────────────────────────────────────

    pub fn set_field(&self, field: SocialMediaField, value: impl Into<String>) -> Outcome {
        if !self.ticket.is_current() {
            return Outcome::Discarded;
        }
        lock(&self.state).draft.set(field, value);
        Outcome::Applied(())
    }

    /// Submit the add-form as a new link for this user.
    pub async fn add_social_media(&self) -> Result<Outcome<SocialMediaLink>, CoreError> {
        if !self.ticket.is_current() {
            return Ok(Outcome::Discarded);
        }
        let payload = {
            let state = lock(&self.state);
            state.draft.require_complete()?;
            state.draft.to_payload()
        };

        let result = self
            .gateway
            .create_social_media(&self.user_id, &payload)
            .await;

        let mut state = lock(&self.state);
        if !self.ticket.is_current() {
            warn!(user_id = %self.user_id, "social media create completed after navigation");
            return Ok(Outcome::Discarded);
        }
        let link = result?;
        state.links.push(link.clone());
        state.draft.reset();
        info!(user_id = %self.user_id, link_id = %link.id, "social media link added");
        Ok(Outcome::Applied(link))
    }

    /// Delete one of this user's links.
    pub async fn remove_social_media(&self, link_id: &EntityId) -> Result<Outcome, CoreError> {
        if !self.ticket.is_current() {
            return Ok(Outcome::Discarded);
        }

        let result = self
            .gateway
            .delete_social_media(&self.user_id, link_id)
            .await;

        let mut state = lock(&self.state);
        if !self.ticket.is_current() {
            warn!(user_id = %self.user_id, "social media delete completed after navigation");
            return Ok(Outcome::Discarded);
        }
        result?;
        state.links.remove(link_id);
        info!(user_id = %self.user_id, %link_id, "social media link removed");
        Ok(Outcome::Applied(()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::icon::SocialIcon;
    use crate::navigation::Navigator;
    use crate::testing::{FakeGateway, Failure, Op, link, user};
    use pretty_assertions::assert_eq;

    fn seeded() -> FakeGateway {
        FakeGateway::new()
            .with_user(user(3, "Ana", "Diaz"))
            .with_link(3, link(1, "Facebook", "https://facebook.com/ana"))
            .with_next_id(8)
    }

    fn open(
        gateway: FakeGateway,
        id: u64,
    ) -> (Arc<FakeGateway>, Navigator, DetailController<FakeGateway>) {
        let gateway = Arc::new(gateway);
        let mut nav = Navigator::default();
        let ticket = nav.select(EntityId::Numeric(id));
        let detail = DetailController::new(Arc::clone(&gateway), EntityId::Numeric(id), ticket);
        (gateway, nav, detail)
    }

    // ── Load ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn load_marks_ready_with_user_and_links() {
        let (_, _nav, detail) = open(seeded(), 3);
        assert_eq!(detail.readiness(), Readiness::NotReady);

        let outcome = detail.load().await.unwrap();

        let loaded = outcome.applied().unwrap();
        assert_eq!(loaded.first_name, "Ana");
        assert_eq!(detail.readiness(), Readiness::Ready);
        assert_eq!(detail.links().len(), 1);
        assert!(detail.warnings().is_empty());
    }

    #[tokio::test]
    async fn missing_user_is_stale_and_drops_fetched_links() {
        // Links for user 3 exist remotely, the user itself does not.
        let gateway = FakeGateway::new().with_link(3, link(1, "Facebook", "https://fb.com/x"));
        let (gateway, _nav, detail) = open(gateway, 3);
        gateway.hold(Op::GetUser);
        let mut links = detail.subscribe_links();

        let task = tokio::spawn({
            let detail = detail.clone();
            async move { detail.load().await }
        });

        // Links arrive first and render progressively.
        let applied = links.changed().await.unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(detail.readiness(), Readiness::NotReady);

        gateway.release(Op::GetUser);
        let err = task.await.unwrap().unwrap_err();

        assert!(matches!(err, CoreError::StaleSelection { ref id } if id == "3"));
        assert_eq!(detail.readiness(), Readiness::NotReady);
        assert!(detail.user().is_none());
        assert!(detail.links().is_empty());
    }

    #[tokio::test]
    async fn failed_link_fetch_does_not_block_readiness() {
        let (gateway, _nav, detail) = open(seeded(), 3);
        gateway.fail(Op::ListSocialMedia, Failure::Unavailable);

        let outcome = detail.load().await.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(detail.readiness(), Readiness::Ready);
        assert!(detail.links().is_empty());
        assert_eq!(detail.warnings().len(), 1);
    }

    #[tokio::test]
    async fn failed_reload_returns_view_to_not_ready() {
        let (gateway, _nav, detail) = open(seeded(), 3);
        detail.load().await.unwrap();
        assert_eq!(detail.readiness(), Readiness::Ready);

        gateway.fail(Op::GetUser, Failure::Unavailable);
        let err = detail.load().await.unwrap_err();

        assert!(matches!(err, CoreError::GatewayUnavailable { .. }));
        assert_eq!(detail.readiness(), Readiness::NotReady);
        assert!(detail.user().is_none());
        assert!(detail.links().is_empty());
    }

    #[tokio::test]
    async fn reload_after_remote_delete_is_stale() {
        let (gateway, _nav, detail) = open(seeded(), 3);
        detail.load().await.unwrap();

        gateway.forget_user(3);
        let err = detail.load().await.unwrap_err();

        assert!(matches!(err, CoreError::StaleSelection { ref id } if id == "3"));
        assert_eq!(detail.readiness(), Readiness::NotReady);
        assert!(detail.user().is_none());
        assert!(detail.links().is_empty());
    }

    #[tokio::test]
    async fn load_discarded_after_go_back() {
        let (gateway, mut nav, detail) = open(seeded(), 3);
        gateway.hold(Op::GetUser);

        let task = tokio::spawn({
            let detail = detail.clone();
            async move { detail.load().await }
        });
        tokio::task::yield_now().await;

        nav.go_back();
        gateway.release(Op::GetUser);

        let outcome = task.await.unwrap().unwrap();
        assert!(outcome.is_discarded());
        assert!(!detail.is_active());
        assert!(detail.user().is_none());
        assert_eq!(detail.readiness(), Readiness::NotReady);
    }

    // ── Nested collection ───────────────────────────────────────────

    #[tokio::test]
    async fn add_social_media_appends_and_resets_form() {
        let (_, _nav, detail) = open(seeded(), 3);
        detail.load().await.unwrap();
        detail.set_field(SocialMediaField::Name, "Twitter");
        detail.set_field(SocialMediaField::Url, "http://t.co/x");

        let added = detail.add_social_media().await.unwrap().applied().unwrap();

        assert_eq!(added.id, EntityId::Numeric(9));
        assert_eq!(added.icon(), SocialIcon::Twitter);
        let names: Vec<_> = detail.links().iter().map(|l| l.name.clone()).collect();
        assert_eq!(names, vec!["Facebook", "Twitter"]);
        assert!(detail.draft().is_blank());
    }

    #[tokio::test]
    async fn incomplete_link_form_is_rejected_locally() {
        let (gateway, _nav, detail) = open(seeded(), 3);
        detail.set_field(SocialMediaField::Name, "Twitter");

        let err = detail.add_social_media().await.unwrap_err();

        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(gateway.count(Op::CreateSocialMedia), 0);
    }

    #[tokio::test]
    async fn failed_add_preserves_form() {
        let (gateway, _nav, detail) = open(seeded(), 3);
        detail.load().await.unwrap();
        gateway.fail(Op::CreateSocialMedia, Failure::Status(400));
        detail.set_field(SocialMediaField::Name, "Twitter");
        detail.set_field(SocialMediaField::Url, "not a url");

        assert!(detail.add_social_media().await.is_err());

        assert_eq!(detail.draft().get(SocialMediaField::Url), "not a url");
        assert_eq!(detail.links().len(), 1);
    }

    #[tokio::test]
    async fn add_completing_after_navigation_is_dropped() {
        let (gateway, mut nav, detail) = open(seeded(), 3);
        detail.load().await.unwrap();
        detail.set_field(SocialMediaField::Name, "Instagram");
        detail.set_field(SocialMediaField::Url, "https://instagram.com/ana");
        gateway.hold(Op::CreateSocialMedia);

        let task = tokio::spawn({
            let detail = detail.clone();
            async move { detail.add_social_media().await }
        });
        tokio::task::yield_now().await;

        nav.select(EntityId::Numeric(4));
        gateway.release(Op::CreateSocialMedia);

        assert!(task.await.unwrap().unwrap().is_discarded());
        assert_eq!(detail.links().len(), 1);
        assert_eq!(
            detail.set_field(SocialMediaField::Name, "x"),
            Outcome::Discarded
        );
    }

    #[tokio::test]
    async fn remove_social_media_by_id() {
        let (gateway, _nav, detail) = open(seeded(), 3);
        detail.load().await.unwrap();

        gateway.fail(Op::DeleteSocialMedia, Failure::Unavailable);
        assert!(detail.remove_social_media(&EntityId::Numeric(1)).await.is_err());
        assert_eq!(detail.links().len(), 1);

        gateway.heal(Op::DeleteSocialMedia);
        let outcome = detail
            .remove_social_media(&EntityId::Numeric(1))
            .await
            .unwrap();
        assert!(outcome.is_applied());
        assert!(detail.links().is_empty());
    }
}
