use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{glob::Glob, packing::SortOrder};

static CONFIG_FILENAME: &str = "sheetpack.toml";

/// Configuration for one spritesheet, contained in a sheetpack.toml file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The name of the sheet. Used to name the output files when they aren't
    /// given explicitly.
    pub name: String,

    /// The size of the sheet. Every input has to fit inside it; inputs are
    /// never spread over more than one sheet.
    #[serde(default = "default_sheet_size")]
    pub sheet_size: (u32, u32),

    /// Which files to pack.
    #[serde(default)]
    pub inputs: Vec<InputConfig>,

    /// The order images are inserted into the sheet in.
    #[serde(default)]
    pub sort: SortOrder,

    /// Whether to fill the transparent pixels of the sheet with the colors of
    /// their neighbors.
    #[serde(default = "default_alpha_bleed")]
    pub alpha_bleed: bool,

    /// Where to write the packed sheet. Defaults to `<name>.png`.
    #[serde(default)]
    pub output_image: Option<PathBuf>,

    /// Where to write the JSON manifest. Defaults to `<name>.json`.
    #[serde(default)]
    pub output_manifest: Option<PathBuf>,

    /// The path that this config came from. Paths from this config are
    /// relative to the folder containing this file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path)?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        Ok(config)
    }

    /// The folder that paths in this config are relative to.
    pub fn folder(&self) -> &Path {
        match self.file_path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        }
    }

    pub fn output_image_path(&self) -> PathBuf {
        let relative = match &self.output_image {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("{}.png", self.name)),
        };

        self.folder().join(relative)
    }

    pub fn output_manifest_path(&self) -> PathBuf {
        let relative = match &self.output_manifest {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("{}.json", self.name)),
        };

        self.folder().join(relative)
    }
}

fn default_sheet_size() -> (u32, u32) {
    (1024, 1024)
}

fn default_alpha_bleed() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct InputConfig {
    /// A glob, relative to the config's folder, matching the PNG files to pack.
    pub glob: Glob,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    // fs-err already names the path in its messages.
    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(source: &str) -> Config {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(r#"name = "icons""#);

        assert_eq!(config.sheet_size, (1024, 1024));
        assert_eq!(config.sort, SortOrder::Area);
        assert!(config.alpha_bleed);
        assert!(config.inputs.is_empty());
        assert_eq!(config.output_image_path(), Path::new(".").join("icons.png"));
        assert_eq!(
            config.output_manifest_path(),
            Path::new(".").join("icons.json")
        );
    }

    #[test]
    fn full() {
        let mut config = parse(
            r#"
            name = "ui"
            sheet-size = [512, 256]
            sort = "max-side"
            alpha-bleed = false
            output-image = "out/ui-sheet.png"
            output-manifest = "out/ui-sheet.json"

            [[inputs]]
            glob = "sprites/**/*.png"

            [[inputs]]
            glob = "extra/*.png"
            "#,
        );
        config.file_path = PathBuf::from("project").join(CONFIG_FILENAME);

        assert_eq!(config.sheet_size, (512, 256));
        assert_eq!(config.sort, SortOrder::MaxSide);
        assert!(!config.alpha_bleed);
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[0].glob, Glob::new("sprites/**/*.png").unwrap());
        assert_eq!(config.folder(), Path::new("project"));
        assert_eq!(
            config.output_image_path(),
            Path::new("project").join("out/ui-sheet.png")
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            name = "icons"
            max-size = [64, 64]
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Config::read_from_folder("this/folder/does/not/exist").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn io_errors_name_the_path() {
        let err = Config::read_from_file("no/such/folder/sheetpack.toml").unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("no/such/folder/sheetpack.toml"));
    }
}
