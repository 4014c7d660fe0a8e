//! Document - arena-backed tree with structural-change notifications
//!
//! The document owns every node, hands out `NodeId` handles, and reports
//! subtree removals to registered observers as batches. Batches list every
//! removed node, not just the subtree root, so observers never have to walk
//! a tree that no longer exists.

use smol::channel::{unbounded, Receiver, Sender};

use crate::{DomError, Node, NodeId};

/// One batch of removed nodes (the subtree root and all its descendants)
#[derive(Debug, Clone)]
pub struct RemovalBatch {
    pub nodes: Vec<NodeId>,
}

/// Document tree
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    /// Open modal dialogs, in show order (top of stack announced last)
    modal_stack: Vec<NodeId>,
    /// Removal observers; closed receivers are dropped on next notify
    observers: Vec<Sender<RemovalBatch>>,
}

impl Document {
    /// Create a new document with html/body structure
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::document()],
            root: NodeId(0),
            body: NodeId(0),
            modal_stack: Vec::new(),
            observers: Vec::new(),
        };

        let html = doc.create_element("html");
        let body = doc.create_element("body");
        doc.append_child(doc.root, html);
        doc.append_child(html, body);
        doc.body = body;
        doc
    }

    /// Document root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::element(tag));
        id
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Children of a node, in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Number of nodes ever created (detached slots included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` to `parent`, reparenting if already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == parent || self.contains(child, parent) {
            tracing::warn!(parent_node = ?parent, child_node = ?child, "refusing append that would create a cycle");
            return;
        }
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Remove the subtree rooted at `id` and notify removal observers
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }

        let removed = self.collect_subtree(id);
        self.detach(id);
        self.modal_stack.retain(|m| !removed.contains(m));
        tracing::debug!(?id, count = removed.len(), "removed subtree");

        let batch = RemovalBatch { nodes: removed };
        self.observers
            .retain(|tx| tx.try_send(batch.clone()).is_ok());
    }

    /// Whether `id` is attached to the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes[current.index()].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Whether `id` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == ancestor {
                return true;
            }
            match self.nodes[current.index()].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Closest self-or-ancestor node matching the predicate
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.index()];
            if pred(node) {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }

    /// First descendant of `from` with the given tag, depth-first
    pub fn first_by_tag(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        for &child in self.children(from) {
            if self.nodes[child.index()].tag() == Some(tag) {
                return Some(child);
            }
            if let Some(found) = self.first_by_tag(child, tag) {
                return Some(found);
            }
        }
        None
    }

    /// Set or clear the inert flag on an element
    pub fn set_inert(&mut self, id: NodeId, inert: bool) {
        if let Some(element) = self.nodes[id.index()].as_element_mut() {
            element.inert = inert;
        }
    }

    /// Show a connected `<dialog>` element as a modal
    pub fn show_modal(&mut self, id: NodeId) -> Result<(), DomError> {
        let tag = self.nodes[id.index()]
            .tag()
            .ok_or_else(|| DomError::NotADialog("#document".to_string()))?;
        if tag != "dialog" {
            return Err(DomError::NotADialog(tag.to_string()));
        }
        if !self.is_connected(id) {
            return Err(DomError::NotConnected);
        }
        if self.modal_stack.contains(&id) {
            return Err(DomError::AlreadyOpen);
        }
        self.modal_stack.push(id);
        tracing::debug!(?id, "modal shown");
        Ok(())
    }

    /// Close a modal dialog
    pub fn close_modal(&mut self, id: NodeId) -> Result<(), DomError> {
        let open = self.modal_stack.iter().position(|&m| m == id);
        match open {
            Some(index) => {
                self.modal_stack.remove(index);
                tracing::debug!(?id, "modal closed");
                Ok(())
            }
            None => Err(DomError::NotOpen),
        }
    }

    /// The modal that currently isolates the document, if any
    pub fn active_modal(&self) -> Option<NodeId> {
        self.modal_stack
            .iter()
            .rev()
            .copied()
            .find(|&m| self.is_connected(m))
    }

    /// Register a removal observer (batched, consumed asynchronously)
    pub fn observe_removals(&mut self) -> Receiver<RemovalBatch> {
        let (tx, rx) = unbounded();
        self.observers.push(tx);
        rx
    }

    /// Unlink a node from its parent, leaving its own subtree intact
    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != id);
        }
    }

    /// All nodes of the subtree rooted at `id`, including `id`
    fn collect_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend_from_slice(&self.nodes[node.index()].children);
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
