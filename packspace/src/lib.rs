//! Packspace is a small library for allocating rectangles out of a fixed
//! region. It was built for packing glyphs, sprites and texture tiles into a
//! single surface without ever having to move something once it's placed.
//!
//! Packspace exposes one allocator, [`PackingTree`][PackingTree], which
//! subdivides its region as a binary tree and places each rectangle in the
//! first free space that fits it. Rectangles can't be removed or rotated, and a
//! tree that's out of room simply rejects further requests.
//!
//! ## Example
//! ```
//! use packspace::{PackError, PackingTree};
//!
//! # fn main() -> Result<(), PackError> {
//! // Create a tree over the region to fill.
//! let mut tree = PackingTree::new((256, 256))?;
//!
//! // Insert rectangles one at a time. Each insert returns where the rectangle
//! // ended up, along with a handle that can be resolved later.
//! let glyph = tree.insert((16, 24))?;
//! assert_eq!(glyph.position(), (0, 0));
//! assert_eq!(tree.get(glyph.id()), Some(glyph.rect()));
//!
//! // Requests that can't fit are rejected without changing the tree.
//! let err = tree.insert((512, 8)).unwrap_err();
//! assert_eq!(err, PackError::NoSpace { width: 512, height: 8 });
//! # Ok(())
//! # }
//! ```
//!
//! [PackingTree]: struct.PackingTree.html

mod error;
mod geometry;
mod id;
mod tree;
mod types;

pub use error::*;
pub use geometry::*;
pub use id::PlacementId;
pub use tree::*;
pub use types::*;
