//! Public entry point
//!
//! One `Notifier` per document wires the scheduler to the document's
//! removal feed. State is explicit and owned here; there is no ambient
//! global queue.

use std::cell::RefCell;
use std::rc::Rc;

use aria_dom::{Document, NodeId};

use crate::announcement::{Announcement, Interrupt, Priority};
use crate::duration::DurationEstimator;
use crate::scheduler::Scheduler;
use crate::watcher::LifecycleWatcher;

/// Caller-facing announcement options
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyOptions {
    pub priority: Priority,
    pub interrupt: Interrupt,
}

impl NotifyOptions {
    /// Build options from caller-supplied keywords.
    ///
    /// Unknown keywords coerce to the defaults; callers never see an error.
    pub fn from_keywords(priority: &str, interrupt: &str) -> Self {
        Self {
            priority: Priority::from_keyword(priority),
            interrupt: Interrupt::from_keyword(interrupt),
        }
    }
}

/// Per-document announcement facade
pub struct Notifier {
    doc: Rc<RefCell<Document>>,
    scheduler: Rc<Scheduler>,
    watcher: LifecycleWatcher,
}

impl Notifier {
    pub fn new(doc: Rc<RefCell<Document>>) -> Self {
        Self::with_estimator(doc, DurationEstimator::default())
    }

    pub fn with_estimator(doc: Rc<RefCell<Document>>, estimator: DurationEstimator) -> Self {
        let removals = doc.borrow_mut().observe_removals();
        let scheduler = Rc::new(Scheduler::with_estimator(doc.clone(), estimator));
        let watcher = LifecycleWatcher::new(scheduler.clone(), removals);
        Self {
            doc,
            scheduler,
            watcher,
        }
    }

    /// Request that `message` be announced on behalf of `element`
    pub fn notify(&self, element: NodeId, message: &str) {
        self.notify_with(element, message, NotifyOptions::default());
    }

    /// Request an announcement with explicit priority and interrupt class
    pub fn notify_with(&self, element: NodeId, message: &str, options: NotifyOptions) {
        self.scheduler.enqueue(
            Announcement::new(element, message)
                .with_priority(options.priority)
                .with_interrupt(options.interrupt),
        );
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.doc
    }

    pub fn scheduler(&self) -> &Rc<Scheduler> {
        &self.scheduler
    }

    pub fn watcher(&self) -> &LifecycleWatcher {
        &self.watcher
    }
}
