use std::{
    collections::BTreeMap,
    io::{self, BufWriter, Write},
    path::Path,
};

use fs_err as fs;
use packspace::Placement;
use serde::{Deserialize, Serialize};

use crate::asset_name::AssetName;

/// Describes a packed sheet: where every input image ended up inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetManifest {
    pub name: String,

    /// The size of the sheet image.
    pub size: (u32, u32),

    /// The hexadecimal blake3 hash of the encoded sheet image.
    pub hash: String,

    pub slices: BTreeMap<AssetName, ImageSlice>,
}

impl SheetManifest {
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(folder) = path.parent() {
            fs::create_dir_all(folder)?;
        }

        let mut file = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut file, self)?;
        file.flush()?;

        log::trace!("Saved manifest to {}", path.display());

        Ok(())
    }
}

/// The region of a sheet that holds one input image. `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlice {
    pub min: (u32, u32),
    pub max: (u32, u32),
}

impl From<&Placement> for ImageSlice {
    fn from(placement: &Placement) -> ImageSlice {
        ImageSlice {
            min: placement.min(),
            max: placement.max(),
        }
    }
}
