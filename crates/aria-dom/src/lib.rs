//! aria-dom - Minimal UI tree
//!
//! Just enough of a document tree for announcement scheduling:
//! attach/detach, ancestor queries, inert flags, modal dialogs, and a
//! batched removal feed for observers.

mod document;
mod node;

pub use document::{Document, RemovalBatch};
pub use node::{ElementData, Node, NodeData};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Document structure error
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomError {
    #[error("element <{0}> is not a dialog")]
    NotADialog(String),

    #[error("dialog is not connected to the document")]
    NotConnected,

    #[error("dialog is already shown as a modal")]
    AlreadyOpen,

    #[error("dialog is not open")]
    NotOpen,
}
