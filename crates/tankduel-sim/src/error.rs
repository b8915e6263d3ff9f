//! Scene graph error types.

use crate::scene::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The node is not a direct child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// The handle refers to a node that has been removed.
    #[error("node {0:?} does not exist")]
    NoSuchNode(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// The root node cannot be detached or removed.
    #[error("the scene root cannot be detached")]
    RootNode,
}
