use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use crate::GodsongError;

/// What to do when a character misses a grammar table lookup.
///
/// The song parser classifies prefix characters with the tables' own
/// `is_symbol` checks, so a miss only comes from a `TryFrom<char>` call on a
/// character the classifier let through. Parsed songs render identically under
/// both policies, invalid note letters are recoverable either way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the pass, the reference converters abort in this case
    #[default]
    Fatal,
    /// Log a warning, skip the character and keep going
    Recoverable,
}

/// PMX preamble fields, see PMX manual section 2.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmxLayout {
    /// nv
    pub staves: u8,
    /// noinst
    pub instruments: u8,
    /// npages
    pub pages: u8,
    /// nsyst
    pub systems: u8,
    /// musicsize
    pub music_size: u8,
    /// fracindent
    pub fractional_indent: u8,
    pub clef: String,
    pub output_path: String,
}

impl Default for PmxLayout {
    fn default() -> Self {
        Self {
            staves: 1,
            instruments: 1,
            pages: 0,
            systems: 4,
            music_size: 20,
            fractional_indent: 0,
            clef: "7".to_string(),
            output_path: "./".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lookup_errors: ErrorPolicy,
    pub lilypond_version: String,
    pub pmx: PmxLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup_errors: ErrorPolicy::default(),
            lilypond_version: "2.24.4".to_string(),
            pmx: PmxLayout::default(),
        }
    }
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".godsong";

    fn get_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(Self::FOLDER).join("config.json"))
    }

    /// Reads `$HOME/.godsong/config.json`, falls back to defaults if absent
    pub fn read_config() -> Result<Self, GodsongError> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                log::debug!("No local configuration, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, GodsongError> {
        log::debug!("Reading configuration from {path:?}");
        let file = File::open(path).map_err(|err| {
            GodsongError::ConfigError(format!("Could not open configuration {path:?}: {err}"))
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|err| {
            GodsongError::ConfigError(format!("Could not read configuration {path:?}: {err}"))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, GodsongError> {
        serde_json::from_str(json)
            .map_err(|err| GodsongError::ConfigError(format!("Invalid configuration: {err}")))
    }
}
