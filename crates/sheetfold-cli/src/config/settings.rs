//! Configuration Settings
//!
//! Defines the `sheetfold.toml` structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sheetfold_data::{CsvOptions, MergeOptions, DEFAULT_SHEET_NAME};

/// File name looked up next to the input workbook
pub const CONFIG_FILE_NAME: &str = "sheetfold.toml";

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Row-grouped merge settings
    pub grouped: GroupedSettings,
    /// Output workbook settings
    pub output: OutputSettings,
    /// CSV input settings
    pub csv: CsvSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// `sheetfold.toml` in the input's directory, if there is one
    pub fn discover(input: &Path) -> Option<PathBuf> {
        let dir = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    /// Engine options, or `None` when the CSV delimiter is not a single
    /// ASCII character
    pub fn merge_options(&self) -> Option<MergeOptions> {
        let delimiter = self.csv.delimiter_byte()?;
        Some(MergeOptions {
            sheet_name: self.output.sheet_name.clone(),
            csv: CsvOptions {
                delimiter,
                trim: self.csv.trim,
                ..CsvOptions::default()
            },
        })
    }
}

/// `[grouped]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GroupedSettings {
    /// Leading rows of every sheet combined by position
    pub skip_rows: usize,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Name of the merged worksheet
    pub sheet_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// `[csv]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSettings {
    /// Field delimiter, one ASCII character
    pub delimiter: String,
    /// Trim whitespace around fields
    pub trim: bool,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            trim: true,
        }
    }
}

impl CsvSettings {
    /// The delimiter as a byte
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Some(*byte),
            _ => None,
        }
    }
}
