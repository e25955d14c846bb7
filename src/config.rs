// STD Dependencies -----------------------------------------------------------
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use serde::Deserialize;
use file_io::{FileError, FileReader};
use tilemap::{ColorMode, ConversionOptions, TileSize};


// Configuration Errors -------------------------------------------------------
#[derive(Debug)]
pub enum ConfigError {
    Read(FileError),
    Parse {
        path: PathBuf,
        message: String
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Read(err) => write!(f, "{}", err),
            ConfigError::Parse { path, message } => {
                write!(f, "Failed to parse configuration file \"{}\": {}", path.display(), message)
            }
        }
    }
}

impl Error for ConfigError {}


// Project Configuration ------------------------------------------------------
pub const CONFIG_FILE_NAME: &str = "gbtiles.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub dedupe: DedupeConfig
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConvertConfig {
    pub mode: Option<ColorMode>,
    pub tile_size: Option<TileSize>,
    pub bank: Option<u8>,
    pub tile_origin: Option<u16>,
    pub palette: Option<PathBuf>,
    pub ignore_palette_errors: Option<bool>
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DedupeConfig {
    pub pattern: Option<bool>,
    pub flips: Option<bool>,
    pub palettes: Option<bool>
}

impl ConfigFile {
    /// Searches `dir` and all of its parents for a configuration file, the
    /// closest one wins.
    pub fn try_load<R: FileReader>(reader: &R, dir: &Path) -> Result<Option<ConfigFile>, ConfigError> {
        let mut dir = dir.to_path_buf();
        loop {
            let config_file = dir.join(CONFIG_FILE_NAME);

            // Check if config file exists at this level
            if reader.file_exists(&config_file) {
                let text = reader.read_file(&config_file).map_err(ConfigError::Read)?;
                let mut config = toml::from_str::<ConfigFile>(&text).map_err(|err| {
                    ConfigError::Parse {
                        path: config_file.clone(),
                        message: err.to_string()
                    }
                })?;

                // Palette files are relative to the configuration
                if let Some(palette) = config.convert.palette.take() {
                    config.convert.palette = Some(dir.join(palette));
                }
                config.path = config_file;
                return Ok(Some(config));

            } else if let Some(parent) = dir.parent() {
                dir = parent.into();

            } else {
                return Ok(None);
            }
        }
    }

    /// Overrides the defaults in `options` with every configured value.
    pub fn apply(&self, options: &mut ConversionOptions) {
        let convert = &self.convert;
        if convert.mode.is_some() {
            options.mode = convert.mode;
        }
        if let Some(size) = convert.tile_size {
            options.tile_size = size;
        }
        if let Some(bank) = convert.bank {
            options.bank = bank;
        }
        if let Some(origin) = convert.tile_origin {
            options.tile_origin = origin;
        }
        if let Some(palette) = &convert.palette {
            options.palette_file = Some(palette.clone());
        }
        if let Some(ignore) = convert.ignore_palette_errors {
            options.ignore_palette_errors = ignore;
        }

        let dedupe = &self.dedupe;
        options.dedupe.pattern = dedupe.pattern.unwrap_or(options.dedupe.pattern);
        options.dedupe.flips = dedupe.flips.unwrap_or(options.dedupe.flips);
        options.dedupe.palettes = dedupe.palettes.unwrap_or(options.dedupe.palettes);
    }
}
