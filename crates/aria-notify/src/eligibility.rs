//! Eligibility check
//!
//! Pure predicate re-evaluated at the moment a request is about to become
//! active, since tree state may have changed while it was queued.

use aria_dom::{Document, NodeId};

/// Whether an announcement on behalf of `target` should be spoken.
///
/// Eligible iff the target is attached to the tree, neither it nor an
/// ancestor is inert, and - when a modal is open - the target sits inside
/// that modal (everything outside an active modal is implicitly inert).
pub fn can_announce(doc: &Document, target: NodeId) -> bool {
    doc.is_connected(target)
        && doc.closest(target, |n| n.is_inert()).is_none()
        && doc
            .active_modal()
            .map_or(true, |modal| doc.contains(modal, target))
}
