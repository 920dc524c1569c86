use std::{
    collections::BTreeMap,
    env,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::{
    alpha_bleed::alpha_bleed,
    asset_name::AssetName,
    data::{Config, ImageSlice, SheetManifest},
    image::Image,
    options::PackOptions,
    packing::pack_items,
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let project_path = match options.project_path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let config = match Config::read_from_folder_or_file(&project_path) {
        Ok(config) => config,
        Err(err) if err.is_not_found() => bail!(
            "Could not find a sheetpack.toml at {}",
            project_path.display()
        ),
        Err(err) => return Err(err.into()),
    };

    let manifest = pack_sheet(&config)?;

    log::info!(
        "Packed {} images into {}",
        manifest.slices.len(),
        config.output_image_path().display()
    );

    Ok(())
}

/// Packs every input of a project into its sheet, then writes the sheet and
/// its manifest next to the config.
fn pack_sheet(config: &Config) -> anyhow::Result<SheetManifest> {
    log::info!("Packing sheet \"{}\"", config.name);

    let (width, height) = config.sheet_size;
    let mut sheet = Image::new_empty_rgba8(config.sheet_size)
        .with_context(|| format!("Could not create a {}x{} sheet", width, height))?;

    let inputs = discover_inputs(config)?;
    if inputs.is_empty() {
        log::warn!("No inputs matched for sheet \"{}\"", config.name);
    }

    let images = decode_inputs(&inputs)?;

    let items = images
        .iter()
        .map(|(name, image)| (name.clone(), image.size()))
        .collect();
    let (tree, placed) = pack_items(config.sheet_size, items, config.sort)?;

    let mut slices = BTreeMap::new();

    for (name, placement) in &placed {
        sheet.blit(&images[name], placement.position());
        slices.insert(name.clone(), ImageSlice::from(placement));
    }

    if config.alpha_bleed {
        alpha_bleed(&mut sheet);
    }

    let mut encoded = Vec::new();
    sheet
        .encode_png(&mut encoded)
        .context("Could not encode the packed sheet")?;
    let hash = blake3::hash(&encoded).to_hex().to_string();

    let image_path = config.output_image_path();
    if let Some(folder) = image_path.parent() {
        fs::create_dir_all(folder)?;
    }
    fs::write(&image_path, &encoded)?;

    let manifest = SheetManifest {
        name: config.name.clone(),
        size: tree.size(),
        hash,
        slices,
    };
    manifest.write_to_file(config.output_manifest_path())?;

    Ok(manifest)
}

/// Finds every PNG file matched by the config's input globs, keyed by name so
/// that overlapping globs don't pack the same file twice.
fn discover_inputs(config: &Config) -> anyhow::Result<BTreeMap<AssetName, PathBuf>> {
    let root = config.folder();
    let output_image = config.output_image_path();
    let mut inputs = BTreeMap::new();

    for input in &config.inputs {
        let base = root.join(input.glob.base_path());

        log::debug!(
            "Searching {} for inputs matching {}",
            base.display(),
            input.glob
        );

        for entry in WalkDir::new(&base) {
            let entry = entry.with_context(|| format!("Could not search {}", base.display()))?;
            let path = entry.path();

            // A previous sheet can match the same glob as its inputs.
            if !entry.file_type().is_file() || !is_png(path) || path == output_image {
                continue;
            }

            let relative = match path.strip_prefix(root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };

            if input.glob.is_match(relative) {
                let name = AssetName::from_paths(root, path);
                log::trace!("Found input {}", name);

                inputs.insert(name, path.to_owned());
            }
        }
    }

    Ok(inputs)
}

fn decode_inputs(
    inputs: &BTreeMap<AssetName, PathBuf>,
) -> anyhow::Result<BTreeMap<AssetName, Image>> {
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("Decoding {pos}/{len} {bar:40} {wide_msg}"),
    );

    let mut images = BTreeMap::new();

    for (name, path) in inputs {
        progress.set_message(name.to_string());

        let file = fs::File::open(path)?;
        let image = Image::decode_png(BufReader::new(file))
            .with_context(|| format!("Could not decode {}", path.display()))?;

        images.insert(name.clone(), image);
        progress.inc(1);
    }

    progress.finish_and_clear();

    Ok(images)
}

fn is_png(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => extension.eq_ignore_ascii_case("png"),
        None => false,
    }
}
