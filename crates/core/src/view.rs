//! Notifications from the engine to the presentation side.
//!
//! The engine never touches view state. It pushes [`ViewEvent`]s into an
//! unbounded channel; whoever owns the receiver (a UI thread, a logger, a
//! test) drains it in its own execution context.

use tokio::sync::mpsc;

use crate::models::item::TrackedItem;

/// One-way notification emitted after an engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Redraw with this state
    Render { items: Vec<TrackedItem>, wealth: u64 },
    /// The user tried to add an item that is already tracked
    DuplicateWarning,
    /// Leave the search screen and show the progress list
    SwitchToProgress,
}

/// Receiving end, owned by the presentation context.
pub type ViewEvents = mpsc::UnboundedReceiver<ViewEvent>;

/// Sending end, owned by the engine. Sends never block or fail the caller.
#[derive(Debug, Clone, Default)]
pub struct ViewNotifier {
    tx: Option<mpsc::UnboundedSender<ViewEvent>>,
}

impl ViewNotifier {
    /// A connected notifier and the receiver the view should drain.
    pub fn channel() -> (Self, ViewEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A notifier with no view attached; every event is discarded.
    pub fn detached() -> Self {
        Self { tx: None }
    }

    pub fn notify(&self, event: ViewEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            tracing::debug!("View receiver dropped; notification discarded");
        }
    }

    pub fn render(&self, items: Vec<TrackedItem>, wealth: u64) {
        self.notify(ViewEvent::Render { items, wealth });
    }
}

/// Presentation-side callbacks, driven by [`run_view`].
pub trait ProgressView: Send {
    fn render(&mut self, items: &[TrackedItem], wealth: u64);

    fn duplicate_warning(&mut self);

    fn switch_to_progress(&mut self);
}

impl ViewEvent {
    /// Invoke the matching callback on `view`.
    pub fn dispatch(self, view: &mut dyn ProgressView) {
        match self {
            ViewEvent::Render { items, wealth } => view.render(&items, wealth),
            ViewEvent::DuplicateWarning => view.duplicate_warning(),
            ViewEvent::SwitchToProgress => view.switch_to_progress(),
        }
    }
}

/// Drain `events` into `view` until every notifier is dropped.
/// Returns the view so callers can inspect it afterwards.
pub async fn run_view<V: ProgressView>(mut view: V, mut events: ViewEvents) -> V {
    while let Some(event) = events.recv().await {
        event.dispatch(&mut view);
    }
    view
}
