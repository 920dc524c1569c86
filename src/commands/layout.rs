use std::{
    fmt,
    io::{self, Write},
};

use serde::Serialize;

use crate::{options::LayoutOptions, packing::pack_items};

#[derive(Debug, Serialize)]
struct LayoutOutput {
    size: (u32, u32),
    placements: Vec<PlacedRect>,
    occupancy: f64,
}

#[derive(Debug, PartialEq, Serialize)]
struct PlacedRect {
    /// Position of this rectangle in the list it was given in.
    index: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Which rectangle from the command line an error is about.
#[derive(Debug, Clone, Copy)]
struct RectNumber(usize);

impl fmt::Display for RectNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rectangle #{}", self.0 + 1)
    }
}

pub fn layout(options: LayoutOptions) -> anyhow::Result<()> {
    let output = compute_layout(&options)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &output)?;
    writeln!(handle)?;

    Ok(())
}

fn compute_layout(options: &LayoutOptions) -> anyhow::Result<LayoutOutput> {
    let items = options
        .sizes
        .iter()
        .enumerate()
        .map(|(index, size)| (RectNumber(index), size.0))
        .collect();

    let (tree, placed) = pack_items(options.size.0, items, options.sort)?;

    let placements = placed
        .into_iter()
        .map(|(number, placement)| {
            let (x, y) = placement.position();
            let (width, height) = placement.size();

            PlacedRect {
                index: number.0,
                x,
                y,
                width,
                height,
            }
        })
        .collect();

    Ok(LayoutOutput {
        size: tree.size(),
        placements,
        occupancy: tree.stats().occupancy(),
    })
}
