//! Announcement scheduler
//!
//! Owns the ordered backlog and the single active announcement. The backlog
//! keeps a stable two-bucket order: important requests form a contiguous
//! prefix in arrival order, normal requests follow in arrival order. An
//! active announcement is never preempted by priority, only cancelled by a
//! matching `Interrupt::All` request.
//!
//! Single-threaded and cooperative: the only suspension point is the
//! cancellable per-announcement wait, and no `RefCell` borrow is held across
//! it. A port to real threads must put `backlog` and `active` behind one
//! lock - `enqueue` reads the active slot and edits the backlog as one
//! logical step.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use aria_dom::{Document, NodeId};
use smol::channel::{bounded, unbounded, Receiver, Sender};
use smol::Timer;

use crate::announcement::{Announcement, Interrupt, Priority};
use crate::duration::DurationEstimator;
use crate::eligibility;
use crate::live_region::LiveRegion;
use crate::resolver::{self, SinkRegistry};

/// Counters for work the scheduler drops silently.
///
/// Announcement delivery is best-effort and never fails; these counters are
/// the only observable trace of skipped, superseded or purged requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerStats {
    /// Requests written to a sink
    pub announced: u64,
    /// Requests dropped at the eligibility re-check
    pub skipped: u64,
    /// Queued requests replaced by a newer equivalent
    pub superseded: u64,
    /// Active requests cancelled by `Interrupt::All`
    pub cancelled: u64,
    /// Queued requests purged after their target left the tree
    pub purged: u64,
}

/// The in-flight announcement and the handle that ends its wait early
#[derive(Debug)]
struct ActiveAnnouncement {
    request: Announcement,
    cancel_tx: Sender<()>,
}

impl ActiveAnnouncement {
    /// Resolve the outstanding wait immediately; not an error.
    ///
    /// Returns false if the wait was already cancelled.
    fn cancel(&self) -> bool {
        self.cancel_tx.try_send(()).is_ok()
    }
}

/// Backlog plus active slot; the active request is never also queued
#[derive(Debug, Default)]
struct QueueState {
    backlog: VecDeque<Announcement>,
    active: Option<ActiveAnnouncement>,
}

impl QueueState {
    fn is_idle(&self) -> bool {
        self.backlog.is_empty() && self.active.is_none()
    }
}

/// Per-document announcement scheduler
pub struct Scheduler {
    doc: Rc<RefCell<Document>>,
    state: RefCell<QueueState>,
    sinks: RefCell<SinkRegistry>,
    stats: Cell<SchedulerStats>,
    estimator: DurationEstimator,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
}

impl Scheduler {
    pub fn new(doc: Rc<RefCell<Document>>) -> Self {
        Self::with_estimator(doc, DurationEstimator::default())
    }

    pub fn with_estimator(doc: Rc<RefCell<Document>>, estimator: DurationEstimator) -> Self {
        let (wake_tx, wake_rx) = unbounded();
        Self {
            doc,
            state: RefCell::new(QueueState::default()),
            sinks: RefCell::new(SinkRegistry::default()),
            stats: Cell::new(SchedulerStats::default()),
            estimator,
            wake_tx,
            wake_rx,
        }
    }

    /// Add a request to the backlog. Always succeeds.
    ///
    /// Applies the interrupt policy (cancel a matching active request,
    /// supersede matching queued ones) and the two-bucket insertion rule,
    /// then wakes the drive loop.
    pub fn enqueue(&self, request: Announcement) {
        let mut state = self.state.borrow_mut();

        if request.interrupt() == Interrupt::All {
            if let Some(active) = &state.active {
                if active.request.matches(&request) && active.cancel() {
                    tracing::debug!(node = ?request.target(), "cancelling active announcement");
                    self.bump(|s| s.cancelled += 1);
                }
            }
        }

        if matches!(request.interrupt(), Interrupt::All | Interrupt::Pending) {
            let before = state.backlog.len();
            state.backlog.retain(|queued| !queued.matches(&request));
            let dropped = (before - state.backlog.len()) as u64;
            if dropped > 0 {
                tracing::debug!(node = ?request.target(), dropped, "superseded queued announcements");
                self.bump(|s| s.superseded += dropped);
            }
        }

        match request.priority() {
            Priority::Important => {
                // After the last important entry, not the absolute head:
                // importants already queued keep their arrival order.
                let index = state
                    .backlog
                    .iter()
                    .rposition(|queued| queued.priority() == Priority::Important)
                    .map_or(0, |i| i + 1);
                state.backlog.insert(index, request);
            }
            Priority::None => state.backlog.push_back(request),
        }

        drop(state);
        let _ = self.wake_tx.try_send(());
    }

    /// Drive announcements forever, sleeping while idle.
    ///
    /// `enqueue` wakes the loop; the loop never exits while the scheduler
    /// exists, matching the lifetime of the hosting page.
    pub async fn run(&self) {
        loop {
            if !self.step().await && self.wake_rx.recv().await.is_err() {
                return;
            }
        }
    }

    /// Drive announcements until the backlog and active slot are both empty
    pub async fn run_until_idle(&self) {
        while self.step().await {}
    }

    /// Drop queued requests whose target is in the removed set.
    ///
    /// Exact identity match against every removed node; an active request
    /// already mid-announcement is left alone.
    pub fn purge(&self, removed: &[NodeId]) {
        let mut state = self.state.borrow_mut();
        let before = state.backlog.len();
        state
            .backlog
            .retain(|queued| !removed.contains(&queued.target()));
        let dropped = (before - state.backlog.len()) as u64;
        if dropped > 0 {
            tracing::debug!(dropped, "purged announcements for removed nodes");
            self.bump(|s| s.purged += dropped);
        }
    }

    /// Drop counters
    pub fn stats(&self) -> SchedulerStats {
        self.stats.get()
    }

    /// Whether nothing is queued or in flight
    pub fn is_idle(&self) -> bool {
        self.state.borrow().is_idle()
    }

    /// Number of queued requests
    pub fn pending(&self) -> usize {
        self.state.borrow().backlog.len()
    }

    /// Sink for a root, if one was ever created for it
    pub fn sink(&self, root: NodeId) -> Option<Rc<RefCell<LiveRegion>>> {
        self.sinks.borrow().get(root)
    }

    /// Announce the next eligible request and wait out its duration.
    ///
    /// Returns false once the backlog is exhausted.
    async fn step(&self) -> bool {
        let request = loop {
            let popped = self.state.borrow_mut().backlog.pop_front();
            let Some(request) = popped else { return false };
            if eligibility::can_announce(&self.doc.borrow(), request.target()) {
                break request;
            }
            tracing::debug!(node = ?request.target(), "skipping ineligible announcement");
            self.bump(|s| s.skipped += 1);
        };

        let root = resolver::resolve_root(&self.doc.borrow(), request.target());
        let sink = {
            let mut doc = self.doc.borrow_mut();
            self.sinks.borrow_mut().resolve(&mut doc, root)
        };
        let wait = self.estimator.estimate(request.text());
        let text = request.text().to_string();
        tracing::debug!(node = ?request.target(), ?wait, text = %text, "announcing");

        let (cancel_tx, cancel_rx) = bounded(1);
        self.state.borrow_mut().active = Some(ActiveAnnouncement { request, cancel_tx });
        sink.borrow_mut().set_text(&text);
        self.bump(|s| s.announced += 1);

        Self::wait(wait, cancel_rx).await;

        sink.borrow_mut().clear();
        self.state.borrow_mut().active = None;
        true
    }

    /// Cancellable wait: natural expiry and cancellation look identical
    async fn wait(duration: Duration, cancel: Receiver<()>) {
        let expiry = async {
            Timer::after(duration).await;
        };
        let cancelled = async {
            let _ = cancel.recv().await;
        };
        smol::future::or(expiry, cancelled).await;
    }

    fn bump(&self, update: impl FnOnce(&mut SchedulerStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}
