/// An axis-aligned rectangle. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub(crate) pos: (u32, u32),
    pub(crate) size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.pos
    }

    /// The exclusive bottom-right corner.
    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }

    /// Whether a rectangle of the given size would fit inside this one.
    #[inline]
    pub fn fits(&self, size: (u32, u32)) -> bool {
        size.0 <= self.size.0 && size.1 <= self.size.1
    }

    pub fn contains(&self, other: &Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());

        other_min.0 >= min.0 && other_min.1 >= min.1 && other_max.0 <= max.0 && other_max.1 <= max.1
    }

    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());

        let x_overlap = min.0 < other_max.0 && other_min.0 < max.0;
        let y_overlap = min.1 < other_max.1 && other_min.1 < max.1;

        x_overlap && y_overlap
    }
}
