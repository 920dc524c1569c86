use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
};

static LAST_TREE_ID: AtomicUsize = AtomicUsize::new(1);

/// Unique for every `PackingTree` created in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(NonZeroUsize);

impl TreeId {
    pub(crate) fn new() -> Self {
        let id = LAST_TREE_ID.fetch_add(1, Ordering::Relaxed);
        TreeId(NonZeroUsize::new(id).expect("packing tree id counter wrapped around"))
    }
}

/// Index of a node in a tree's arena. Nodes are never removed, so an index
/// stays valid for as long as the tree exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A handle to a rectangle placed by
/// [`PackingTree::insert`](struct.PackingTree.html#method.insert).
///
/// Handles are cheap to copy and stay valid for the lifetime of the tree that
/// issued them, no matter how many other rectangles are inserted afterwards.
/// Resolving a handle against any other tree yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementId {
    pub(crate) tree: TreeId,
    pub(crate) node: NodeId,
}

impl PlacementId {
    pub(crate) fn new(tree: TreeId, node: NodeId) -> Self {
        Self { tree, node }
    }
}
