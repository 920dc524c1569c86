use std::fmt;

use crate::{
    error::PackError,
    geometry::Rect,
    id::{NodeId, PlacementId, TreeId},
    types::{Leaf, PackStats, Placement},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Leaf { taken: bool },
    Split { children: [NodeId; 2] },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: Rect,
    kind: NodeKind,
}

impl Node {
    fn free(bounds: Rect) -> Self {
        Self {
            bounds,
            kind: NodeKind::Leaf { taken: false },
        }
    }
}

/// A fixed rectangular region that rectangles can be allocated from, one at a
/// time, until it runs out of space.
///
/// The region is subdivided as a binary tree. Every insert walks the tree
/// depth-first, always trying a node's first child before its second, and
/// claims the first free leaf that is large enough. When that leaf is bigger
/// than the request it is split along the axis with the most leftover room,
/// with the first child sized to the request along that axis.
///
/// Placements are never moved or removed.
pub struct PackingTree {
    id: TreeId,
    nodes: Vec<Node>,
    placed: usize,
}

impl PackingTree {
    /// Creates a tree covering a region of the given size, with its origin at
    /// `(0, 0)`.
    pub fn new(size: (u32, u32)) -> Result<Self, PackError> {
        check_size(size)?;

        log::trace!("Creating packing tree of size {}x{}", size.0, size.1);

        Ok(Self {
            id: TreeId::new(),
            nodes: vec![Node::free(Rect::new((0, 0), size))],
            placed: 0,
        })
    }

    /// The size of the whole region.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.root().bounds.size
    }

    /// The whole region, with its origin at `(0, 0)`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.root().bounds
    }

    /// Places a rectangle of the given size in the first free space that fits.
    ///
    /// On failure the tree is left exactly as it was.
    pub fn insert(&mut self, size: (u32, u32)) -> Result<Placement, PackError> {
        check_size(size)?;

        let leaf = match self.find_leaf(size) {
            Some(leaf) => leaf,
            None => {
                log::trace!("No free leaf can hold {}x{}", size.0, size.1);
                return Err(PackError::no_space(size));
            }
        };

        let node = self.claim(leaf, size);
        self.placed += 1;

        let rect = self.node(node).bounds;
        log::trace!(
            "Placed {}x{} at ({}, {})",
            size.0,
            size.1,
            rect.pos.0,
            rect.pos.1
        );

        Ok(Placement {
            id: PlacementId::new(self.id, node),
            rect,
        })
    }

    /// Whether `insert` would succeed for this size right now.
    pub fn can_fit(&self, size: (u32, u32)) -> bool {
        check_size(size).is_ok() && self.find_leaf(size).is_some()
    }

    /// Looks up the rectangle a handle was assigned. Returns `None` for handles
    /// issued by a different tree.
    pub fn get(&self, id: PlacementId) -> Option<Rect> {
        if id.tree != self.id {
            return None;
        }

        let node = self.nodes.get(id.node.index())?;

        match node.kind {
            NodeKind::Leaf { taken: true } => Some(node.bounds),
            _ => None,
        }
    }

    /// Every leaf of the tree in the order inserts search them.
    pub fn leaves(&self) -> impl Iterator<Item = Leaf> + '_ {
        self.walk_leaves().map(|(_, node)| Leaf {
            rect: node.bounds,
            taken: node.kind == NodeKind::Leaf { taken: true },
        })
    }

    /// Every placement made so far, in the order inserts search them. This is
    /// not necessarily the order they were inserted in.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        let tree = self.id;

        self.walk_leaves()
            .filter(|(_, node)| node.kind == NodeKind::Leaf { taken: true })
            .map(move |(id, node)| Placement {
                id: PlacementId::new(tree, id),
                rect: node.bounds,
            })
    }

    /// The bounds of every free leaf.
    pub fn free_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.leaves()
            .filter(|leaf| !leaf.taken)
            .map(|leaf| leaf.rect)
    }

    /// The number of rectangles placed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.placed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    /// The number of nodes in the tree, counting both leaves and split nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn stats(&self) -> PackStats {
        let mut stats = PackStats {
            area: self.bounds().area(),
            used_area: 0,
            free_area: 0,
            placements: 0,
            free_leaves: 0,
        };

        for leaf in self.leaves() {
            if leaf.taken {
                stats.used_area += leaf.rect.area();
                stats.placements += 1;
            } else {
                stats.free_area += leaf.rect.area();
                stats.free_leaves += 1;
            }
        }

        stats
    }

    fn root(&self) -> &Node {
        self.node(NodeId::ROOT)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn push_node(&mut self, bounds: Rect) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::free(bounds));
        id
    }

    /// Finds the first free leaf, in depth-first first-child order, that a
    /// rectangle of `size` fits in. Does not modify the tree.
    fn find_leaf(&self, size: (u32, u32)) -> Option<NodeId> {
        let mut to_visit = vec![NodeId::ROOT];

        while let Some(id) = to_visit.pop() {
            let node = self.node(id);

            // Every leaf below a node lies within its bounds, so nothing under
            // a node that's too small can fit either.
            if !node.bounds.fits(size) {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { taken: true } => {}
                NodeKind::Leaf { taken: false } => return Some(id),
                NodeKind::Split {
                    children: [first, second],
                } => {
                    // Pushed in reverse so the first child is visited first.
                    to_visit.push(second);
                    to_visit.push(first);
                }
            }
        }

        None
    }

    /// Occupies a free leaf that `size` is known to fit in, splitting it until
    /// one of its descendants matches `size` exactly. Returns the node that
    /// ends up taken.
    fn claim(&mut self, leaf: NodeId, size: (u32, u32)) -> NodeId {
        let mut current = leaf;
        let mut splits = 0;

        loop {
            let node = *self.node(current);

            debug_assert_eq!(node.kind, NodeKind::Leaf { taken: false });
            debug_assert!(
                node.bounds.fits(size),
                "{:?} does not fit in claimed leaf {:?}",
                size,
                node.bounds
            );

            if node.bounds.size == size {
                self.nodes[current.index()].kind = NodeKind::Leaf { taken: true };
                return current;
            }

            // One split along each axis at most: the first child always
            // matches the request along the axis it was split on.
            splits += 1;
            debug_assert!(splits <= 2, "claiming {:?} needed {} splits", size, splits);

            current = self.split(current, size);
        }
    }

    /// Splits a free leaf into two children and returns the first, which is
    /// sized to `size` along the split axis.
    fn split(&mut self, id: NodeId, size: (u32, u32)) -> NodeId {
        let bounds = self.node(id).bounds;
        let (x, y) = bounds.pos;
        let (width, height) = bounds.size;

        let delta_width = width - size.0;
        let delta_height = height - size.1;

        let (first, second) = if delta_width > delta_height {
            log::trace!("Splitting {:?} vertically at x = {}", bounds, x + size.0);

            (
                Rect::new((x, y), (size.0, height)),
                Rect::new((x + size.0, y), (delta_width, height)),
            )
        } else {
            log::trace!("Splitting {:?} horizontally at y = {}", bounds, y + size.1);

            (
                Rect::new((x, y), (width, size.1)),
                Rect::new((x, y + size.1), (width, delta_height)),
            )
        };

        let first = self.push_node(first);
        let second = self.push_node(second);

        self.nodes[id.index()].kind = NodeKind::Split {
            children: [first, second],
        };

        first
    }

    fn walk_leaves(&self) -> LeafWalk<'_> {
        LeafWalk {
            nodes: &self.nodes,
            to_visit: vec![NodeId::ROOT],
        }
    }
}

impl fmt::Debug for PackingTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackingTree")
            .field("size", &self.size())
            .field("nodes", &self.nodes.len())
            .field("placements", &self.placed)
            .finish()
    }
}

fn check_size(size: (u32, u32)) -> Result<(), PackError> {
    if size.0 == 0 || size.1 == 0 {
        Err(PackError::invalid_size(size))
    } else {
        Ok(())
    }
}

/// Depth-first walk over the leaves of a tree, first children first.
struct LeafWalk<'a> {
    nodes: &'a [Node],
    to_visit: Vec<NodeId>,
}

impl<'a> Iterator for LeafWalk<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.to_visit.pop() {
            let node = &self.nodes[id.index()];

            match node.kind {
                NodeKind::Leaf { .. } => return Some((id, node)),
                NodeKind::Split {
                    children: [first, second],
                } => {
                    self.to_visit.push(second);
                    self.to_visit.push(first);
                }
            }
        }

        None
    }
}
