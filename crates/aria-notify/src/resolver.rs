//! Root resolution and sink registry
//!
//! An announcement surfaces at the smallest meaningful UI root: the nearest
//! enclosing dialog, or the document body. The registry keeps one lazily
//! created sink per root and hands back the same instance on every lookup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use aria_dom::{Document, NodeId};

use crate::live_region::{LiveRegion, LIVE_REGION_TAG};

/// Nearest enclosing dialog of `target`, falling back to the document body
pub fn resolve_root(doc: &Document, target: NodeId) -> NodeId {
    doc.closest(target, |n| n.tag() == Some("dialog"))
        .unwrap_or_else(|| doc.body())
}

/// Sinks by root, owned by the scheduler
#[derive(Debug, Default)]
pub(crate) struct SinkRegistry {
    sinks: HashMap<NodeId, Rc<RefCell<LiveRegion>>>,
}

impl SinkRegistry {
    /// Existing sink for a root, if one was ever created
    pub(crate) fn get(&self, root: NodeId) -> Option<Rc<RefCell<LiveRegion>>> {
        self.sinks.get(&root).cloned()
    }

    /// Look up the sink for `root`, creating and attaching it on first use
    pub(crate) fn resolve(&mut self, doc: &mut Document, root: NodeId) -> Rc<RefCell<LiveRegion>> {
        if let Some(sink) = self.sinks.get(&root) {
            return sink.clone();
        }
        let element = doc.create_element(LIVE_REGION_TAG);
        doc.append_child(root, element);
        tracing::debug!(?root, ?element, "created live region");

        let sink = Rc::new(RefCell::new(LiveRegion::new(element)));
        self.sinks.insert(root, sink.clone());
        sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_falls_back_to_body() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.append_child(doc.body(), button);
        assert_eq!(resolve_root(&doc, button), doc.body());
    }

    #[test]
    fn test_resolve_root_finds_enclosing_dialog() {
        let mut doc = Document::new();
        let dialog = doc.create_element("dialog");
        let button = doc.create_element("button");
        doc.append_child(doc.body(), dialog);
        doc.append_child(dialog, button);

        assert_eq!(resolve_root(&doc, button), dialog);
        assert_eq!(resolve_root(&doc, dialog), dialog);
    }

    #[test]
    fn test_registry_is_idempotent() {
        let mut doc = Document::new();
        let mut registry = SinkRegistry::default();

        let body = doc.body();
        let first = registry.resolve(&mut doc, body);
        let second = registry.resolve(&mut doc, body);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_sink_element_is_attached_to_root() {
        let mut doc = Document::new();
        let dialog = doc.create_element("dialog");
        doc.append_child(doc.body(), dialog);

        let mut registry = SinkRegistry::default();
        let sink = registry.resolve(&mut doc, dialog);

        let element = sink.borrow().element();
        assert_eq!(doc.first_by_tag(dialog, LIVE_REGION_TAG), Some(element));
        assert!(doc.is_connected(element));
    }

    #[test]
    fn test_distinct_roots_get_distinct_sinks() {
        let mut doc = Document::new();
        let dialog = doc.create_element("dialog");
        doc.append_child(doc.body(), dialog);

        let mut registry = SinkRegistry::default();
        let body = doc.body();
        let body_sink = registry.resolve(&mut doc, body);
        let dialog_sink = registry.resolve(&mut doc, dialog);
        assert!(!Rc::ptr_eq(&body_sink, &dialog_sink));
        assert!(registry.get(dialog).is_some());
    }
}
