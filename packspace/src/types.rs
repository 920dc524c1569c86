use crate::{geometry::Rect, id::PlacementId};

/// A rectangle that was placed by
/// [`PackingTree::insert`](struct.PackingTree.html#method.insert).
///
/// Exposes the handle that can later be resolved against the tree, along with
/// the position and size the rectangle was assigned. Placements never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub(crate) id: PlacementId,
    pub(crate) rect: Rect,
}

impl Placement {
    #[inline]
    pub fn id(&self) -> PlacementId {
        self.id
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.rect.min()
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        self.rect.max()
    }
}

/// A leaf of the packing tree: a region that is either occupied by exactly one
/// placement or still free.
///
/// The leaves of a tree always tile its whole area without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leaf {
    pub(crate) rect: Rect,
    pub(crate) taken: bool,
}

impl Leaf {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn is_taken(&self) -> bool {
        self.taken
    }
}

/// Space accounting for a packing tree, as returned by
/// [`PackingTree::stats`](struct.PackingTree.html#method.stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackStats {
    /// Area of the whole region.
    pub area: u64,

    /// Area covered by placements.
    pub used_area: u64,

    /// Area of all free leaves. Free space is fragmented, so this says nothing
    /// about the largest rectangle that could still be inserted.
    pub free_area: u64,

    pub placements: usize,
    pub free_leaves: usize,
}

impl PackStats {
    /// Fraction of the region covered by placements, between 0 and 1.
    pub fn occupancy(&self) -> f64 {
        self.used_area as f64 / self.area as f64
    }
}
