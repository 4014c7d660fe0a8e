//! Lifecycle watcher
//!
//! Consumes the document's batched removal feed and purges queued requests
//! whose target left the tree. Batches list every removed node, so requests
//! for removed descendants are purged too, not just those for batch roots.
//! An active request already mid-announcement is never touched.

use std::rc::Rc;

use aria_dom::RemovalBatch;
use smol::channel::Receiver;

use crate::scheduler::Scheduler;

/// Purges the scheduler when watched elements are removed
pub struct LifecycleWatcher {
    scheduler: Rc<Scheduler>,
    removals: Receiver<RemovalBatch>,
}

impl LifecycleWatcher {
    pub fn new(scheduler: Rc<Scheduler>, removals: Receiver<RemovalBatch>) -> Self {
        Self {
            scheduler,
            removals,
        }
    }

    /// Process removal batches until the document side is dropped
    pub async fn run(&self) {
        while let Ok(batch) = self.removals.recv().await {
            self.scheduler.purge(&batch.nodes);
        }
    }

    /// Synchronously drain batches that have already been delivered.
    ///
    /// Returns the number of batches processed.
    pub fn process_pending(&self) -> usize {
        let mut processed = 0;
        while let Ok(batch) = self.removals.try_recv() {
            self.scheduler.purge(&batch.nodes);
            processed += 1;
        }
        processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::Announcement;
    use crate::duration::DurationEstimator;
    use aria_dom::Document;
    use std::cell::RefCell;
    use std::time::Duration;

    fn setup() -> (Rc<RefCell<Document>>, Rc<Scheduler>, LifecycleWatcher) {
        let doc = Rc::new(RefCell::new(Document::new()));
        let removals = doc.borrow_mut().observe_removals();
        let scheduler = Rc::new(Scheduler::with_estimator(
            doc.clone(),
            DurationEstimator::new(Duration::from_millis(1)),
        ));
        let watcher = LifecycleWatcher::new(scheduler.clone(), removals);
        (doc, scheduler, watcher)
    }

    #[test]
    fn test_purges_requests_for_removed_subtree() {
        let (doc, scheduler, watcher) = setup();
        let (outer, inner, other) = {
            let mut doc = doc.borrow_mut();
            let outer = doc.create_element("div");
            let inner = doc.create_element("span");
            let other = doc.create_element("div");
            let body = doc.body();
            doc.append_child(body, outer);
            doc.append_child(outer, inner);
            doc.append_child(body, other);
            (outer, inner, other)
        };

        scheduler.enqueue(Announcement::new(inner, "descendant"));
        scheduler.enqueue(Announcement::new(other, "unrelated"));

        doc.borrow_mut().remove(outer);
        assert_eq!(watcher.process_pending(), 1);

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.stats().purged, 1);
    }

    #[test]
    fn test_active_request_survives_removal_of_its_target() {
        let doc = Rc::new(RefCell::new(Document::new()));
        let removals = doc.borrow_mut().observe_removals();
        let scheduler = Rc::new(Scheduler::with_estimator(
            doc.clone(),
            DurationEstimator::new(Duration::from_millis(100)),
        ));
        let watcher = LifecycleWatcher::new(scheduler.clone(), removals);
        let a = {
            let mut doc = doc.borrow_mut();
            let a = doc.create_element("div");
            let body = doc.body();
            doc.append_child(body, a);
            a
        };

        let ex = smol::LocalExecutor::new();
        smol::block_on(ex.run(async {
            scheduler.enqueue(Announcement::new(a, "mid flight"));
            let driver = {
                let s = scheduler.clone();
                ex.spawn(async move { s.run_until_idle().await })
            };
            smol::Timer::after(Duration::from_millis(20)).await;

            // Target leaves the tree while its announcement is in flight.
            doc.borrow_mut().remove(a);
            assert_eq!(watcher.process_pending(), 1);
            driver.await;
        }));

        assert_eq!(scheduler.stats().purged, 0);
        assert_eq!(scheduler.stats().announced, 1);
        let body = doc.borrow().body();
        let sink = scheduler.sink(body).unwrap();
        assert_eq!(sink.borrow().spoken(), &["mid flight"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_nothing_pending_is_a_noop() {
        let (_doc, scheduler, watcher) = setup();
        assert_eq!(watcher.process_pending(), 0);
        assert_eq!(scheduler.stats().purged, 0);
    }

    #[test]
    fn test_async_run_purges_batches() {
        let (doc, scheduler, watcher) = setup();
        let a = {
            let mut doc = doc.borrow_mut();
            let a = doc.create_element("div");
            let body = doc.body();
            doc.append_child(body, a);
            a
        };

        scheduler.enqueue(Announcement::new(a, "doomed"));
        doc.borrow_mut().remove(a);

        let ex = smol::LocalExecutor::new();
        smol::block_on(ex.run(async {
            let task = ex.spawn(async { watcher.run().await });
            smol::Timer::after(Duration::from_millis(10)).await;
            drop(task);
        }));

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.stats().purged, 1);
    }
}
