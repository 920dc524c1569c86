//! Shared logic for feeding a batch of named rectangles into a packing tree.

use std::{cmp::Reverse, fmt, str::FromStr};

use anyhow::Context;
use packspace::{PackingTree, Placement};
use serde::{Deserialize, Serialize};

/// The order a batch of rectangles is inserted in. The packing tree takes the
/// first space that fits, so insertion order decides the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep the order the rectangles were given in.
    None,

    /// Largest area first.
    Area,

    /// Longest side first.
    MaxSide,
}

impl SortOrder {
    /// Sorts items in place. Ties keep their original relative order.
    pub fn sort<K>(self, items: &mut [(K, (u32, u32))]) {
        match self {
            SortOrder::None => {}
            SortOrder::Area => {
                items.sort_by_key(|(_, size)| Reverse(u64::from(size.0) * u64::from(size.1)))
            }
            SortOrder::MaxSide => items.sort_by_key(|(_, size)| Reverse(size.0.max(size.1))),
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Area
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<SortOrder, Self::Err> {
        match value {
            "none" => Ok(SortOrder::None),
            "area" => Ok(SortOrder::Area),
            "max-side" => Ok(SortOrder::MaxSide),

            _ => Err(String::from(
                "Invalid sort order. Valid options are 'none', 'area', and 'max-side'.",
            )),
        }
    }
}

/// Inserts every item into a fresh tree of the given size, in the given sort
/// order. Fails on the first item that can't be placed.
///
/// Returns the tree along with each item's placement, in insertion order.
pub fn pack_items<K: fmt::Display>(
    region: (u32, u32),
    mut items: Vec<(K, (u32, u32))>,
    order: SortOrder,
) -> anyhow::Result<(PackingTree, Vec<(K, Placement)>)> {
    let mut tree = PackingTree::new(region)
        .with_context(|| format!("Could not create a {}x{} region", region.0, region.1))?;

    order.sort(&mut items);

    log::debug!(
        "Packing {} items into {}x{} using {:?} order",
        items.len(),
        region.0,
        region.1,
        order
    );

    let mut placed = Vec::with_capacity(items.len());

    for (key, size) in items {
        let placement = tree.insert(size).with_context(|| {
            format!(
                "Could not place {} ({}x{}) into the {}x{} region",
                key, size.0, size.1, region.0, region.1
            )
        })?;

        log::trace!("Placed {} at {:?}", key, placement.position());

        placed.push((key, placement));
    }

    log::debug!(
        "Packed {} items, {:.1}% of the region is used",
        placed.len(),
        tree.stats().occupancy() * 100.0
    );

    Ok((tree, placed))
}
