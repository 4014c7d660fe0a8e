//! Tree node
//!
//! Parent/children links plus node-specific data. Dropped nodes keep their
//! arena slot so stale handles stay invalid rather than dangling.

use crate::NodeId;

/// Tree node
#[derive(Debug)]
pub struct Node {
    /// Parent node (None if detached or the document root)
    pub parent: Option<NodeId>,
    /// Children in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new(tag)),
        }
    }

    /// Create the document node
    pub fn document() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Document,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Tag name, if this is an element
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    /// Whether this node itself carries the inert flag
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.as_element().map(|e| e.inert).unwrap_or(false)
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name
    pub tag: String,
    /// Inert flag (subtree is inert for assistive technology)
    pub inert: bool,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            inert: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node() {
        let node = Node::element("dialog");
        assert!(node.is_element());
        assert_eq!(node.tag(), Some("dialog"));
        assert!(!node.is_inert());
    }

    #[test]
    fn test_document_node() {
        let node = Node::document();
        assert!(!node.is_element());
        assert_eq!(node.tag(), None);
    }
}
