// ── Session ──
//
// The application shell: owns the gateway, the navigator, the directory
// controller and the detail controller of the current selection. Cheap to
// clone; every clone drives the same state.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::detail::{DetailController, Outcome};
use crate::directory::DirectoryController;
use crate::error::CoreError;
use crate::gateway::{ApiGateway, Gateway};
use crate::model::{EntityId, User};
use crate::navigation::{Navigator, View, ViewState};
use crate::sync::lock;

// Lock order: `navigator` before `detail`.
struct SessionInner<G> {
    gateway: Arc<G>,
    navigator: Mutex<Navigator>,
    directory: DirectoryController<G>,
    detail: Mutex<Option<DetailController<G>>>,
    cancel: CancellationToken,
}

/// Navigation plus the controllers of both views.
pub struct Session<G> {
    inner: Arc<SessionInner<G>>,
}

impl<G> Clone for Session<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Session<ApiGateway> {
    /// Build a session talking to the REST API described by `config`.
    pub fn connect(config: &GatewayConfig) -> Result<Self, CoreError> {
        let gateway = ApiGateway::from_config(config)?;
        info!(api_url = %config.api_url, "session started");
        Ok(Self::new(gateway))
    }
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G) -> Self {
        let gateway = Arc::new(gateway);
        let cancel = CancellationToken::new();
        Self {
            inner: Arc::new(SessionInner {
                directory: DirectoryController::new(Arc::clone(&gateway)),
                navigator: Mutex::new(Navigator::new(cancel.clone())),
                detail: Mutex::new(None),
                gateway,
                cancel,
            }),
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.inner.gateway
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn view(&self) -> View {
        lock(&self.inner.navigator).view()
    }

    pub fn selected(&self) -> Option<EntityId> {
        lock(&self.inner.navigator).selected()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        lock(&self.inner.navigator).subscribe()
    }

    /// Switch to the detail view of `id`.
    ///
    /// The id is not checked against the directory cache; a stale id is
    /// discovered by the detail load. Any previous detail view is retired
    /// and its in-flight completions are discarded.
    pub fn select_for_detail(&self, id: EntityId) -> DetailController<G> {
        let mut navigator = lock(&self.inner.navigator);
        let ticket = navigator.select(id.clone());
        let detail = DetailController::new(Arc::clone(&self.inner.gateway), id, ticket);
        *lock(&self.inner.detail) = Some(detail.clone());
        detail
    }

    /// Select `id` and load its detail view.
    pub async fn open_detail(&self, id: EntityId) -> Result<Outcome<Arc<User>>, CoreError> {
        let detail = self.select_for_detail(id);
        detail.load().await
    }

    /// Return to the directory, dropping the detail view's state.
    pub fn go_back(&self) {
        let mut navigator = lock(&self.inner.navigator);
        navigator.go_back();
        if lock(&self.inner.detail).take().is_some() {
            debug!("detail view discarded");
        }
    }

    // ── Controllers ──────────────────────────────────────────────────

    pub fn directory(&self) -> &DirectoryController<G> {
        &self.inner.directory
    }

    /// The detail controller of the current selection, if any.
    pub fn detail(&self) -> Option<DetailController<G>> {
        lock(&self.inner.detail).clone()
    }

    /// Invalidate every outstanding view ticket.
    pub fn shutdown(&self) {
        let _navigator = lock(&self.inner.navigator);
        self.inner.cancel.cancel();
        lock(&self.inner.detail).take();
        debug!("session shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }
}
