// ── View navigation ──
//
// Tracks which of the two views is active and which user is selected.
// Every selection change issues a fresh `ViewTicket`; operations scoped to
// a detail view carry their ticket and discard their result once it has
// been superseded.

use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::debug;

use crate::model::EntityId;

/// The two mutually exclusive views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Directory,
    Detail(EntityId),
}

impl View {
    pub fn selected(&self) -> Option<&EntityId> {
        match self {
            Self::Directory => None,
            Self::Detail(id) => Some(id),
        }
    }
}

/// Published navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected: Option<EntityId>,
    /// Bumped on every selection change.
    pub generation: u64,
}

impl ViewState {
    pub fn view(&self) -> View {
        match &self.selected {
            Some(id) => View::Detail(id.clone()),
            None => View::Directory,
        }
    }
}

// ── Ticket ───────────────────────────────────────────────────────────

/// Proof of which selection an operation was started for.
///
/// A ticket stays current until the selection changes again (another
/// `select`, or `go_back`).
#[derive(Debug, Clone)]
pub struct ViewTicket {
    generation: u64,
    token: CancellationToken,
}

impl ViewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the selection this ticket was issued for is superseded.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

// ── Navigator ────────────────────────────────────────────────────────

/// Owner of the selection. Plain state machine; the session wraps it.
#[derive(Debug)]
pub struct Navigator {
    root: CancellationToken,
    current: ViewTicket,
    state: watch::Sender<ViewState>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl Navigator {
    /// Start in the directory view. Tickets are children of `root`, so
    /// cancelling it invalidates every outstanding ticket.
    pub fn new(root: CancellationToken) -> Self {
        let current = ViewTicket {
            generation: 0,
            token: root.child_token(),
        };
        let (state, _) = watch::channel(ViewState::default());
        Self {
            root,
            current,
            state,
        }
    }

    /// Show the detail view for `id`. Always supersedes the previous
    /// ticket, even when `id` is already selected.
    pub fn select(&mut self, id: EntityId) -> ViewTicket {
        let ticket = self.advance(Some(id.clone()));
        debug!(user_id = %id, generation = ticket.generation, "selected user");
        ticket
    }

    /// Return to the directory view and drop the selection.
    pub fn go_back(&mut self) -> ViewTicket {
        let ticket = self.advance(None);
        debug!(generation = ticket.generation, "returned to directory");
        ticket
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.state.borrow().selected.clone()
    }

    pub fn view(&self) -> View {
        self.state.borrow().view()
    }

    /// The ticket for the current selection.
    pub fn ticket(&self) -> ViewTicket {
        self.current.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    fn advance(&mut self, selected: Option<EntityId>) -> ViewTicket {
        self.current.token.cancel();
        let generation = self.current.generation + 1;
        self.current = ViewTicket {
            generation,
            token: self.root.child_token(),
        };
        self.state.send_replace(ViewState {
            selected,
            generation,
        });
        self.current.clone()
    }
}
