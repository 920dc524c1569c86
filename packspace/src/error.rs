use thiserror::Error;

/// The ways an operation on a [`PackingTree`](struct.PackingTree.html) can
/// fail. Neither leaves the tree modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PackError {
    /// A width or height of zero was given.
    #[error("invalid size {width}x{height}, both dimensions must be greater than zero")]
    InvalidSize { width: u32, height: u32 },

    /// No free leaf in the tree is large enough for the requested size.
    #[error("no space left for a {width}x{height} rectangle")]
    NoSpace { width: u32, height: u32 },
}

impl PackError {
    pub(crate) fn invalid_size(size: (u32, u32)) -> Self {
        PackError::InvalidSize {
            width: size.0,
            height: size.1,
        }
    }

    pub(crate) fn no_space(size: (u32, u32)) -> Self {
        PackError::NoSpace {
            width: size.0,
            height: size.1,
        }
    }
}
