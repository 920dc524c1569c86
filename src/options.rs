use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;

use crate::packing::SortOrder;

#[derive(Debug, StructOpt)]
#[structopt(about = "A tool to pack sprites and rectangles into fixed-size sheets")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Place a list of rectangle sizes into a region and print where each one
    /// ended up as JSON.
    Layout(LayoutOptions),

    /// Pack the images of a sheetpack project into a single spritesheet,
    /// writing the sheet and a manifest describing where each image went.
    Pack(PackOptions),
}

#[derive(Debug, StructOpt)]
pub struct LayoutOptions {
    /// The size of the region to place rectangles into, like 512x512.
    #[structopt(long)]
    pub size: SizeArg,

    /// The order to insert rectangles in. Sorting large rectangles first
    /// usually wastes less space.
    ///
    /// Options: none, area, max-side
    #[structopt(long, default_value = "none")]
    pub sort: SortOrder,

    /// The sizes of the rectangles to place, like 16x24.
    pub sizes: Vec<SizeArg>,
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The path to a sheetpack.toml file, or a folder containing one. Defaults
    /// to the current working directory.
    pub project_path: Option<PathBuf>,
}

/// A `WIDTHxHEIGHT` pair given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg(pub (u32, u32));

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(value: &str) -> Result<SizeArg, Self::Err> {
        let invalid = || {
            format!(
                "Invalid size '{}'. Sizes are written as WIDTHxHEIGHT, like 64x32.",
                value
            )
        };

        let mut parts = value.splitn(2, |c| c == 'x' || c == 'X');
        let width = parts.next().ok_or_else(invalid)?;
        let height = parts.next().ok_or_else(invalid)?;

        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;

        Ok(SizeArg((width, height)))
    }
}
