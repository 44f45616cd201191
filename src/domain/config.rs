use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Default location of the settings file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "./settings/configurations.json";

/// Persisted analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory scanned for input files
    #[serde(default = "default_input_directory")]
    pub input_directory: PathBuf,
    /// Directory that receives analysis reports
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// File names excluded from batch runs
    #[serde(default)]
    pub skip_files: BTreeSet<String>,
    /// Filters forwarded to batch runs
    #[serde(default)]
    pub filters: FilterSettings,
    /// Optimization settings used for single-file runs
    #[serde(default)]
    pub optimization: OptimizationSettings,
    /// Keys this version does not interpret, kept so a rewrite does not lose them
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Column and value filters applied while analyzing a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Columns to analyze; empty means every column
    #[serde(default)]
    pub columns: Vec<String>,
    /// Values below this bound are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Values above this bound are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

/// Optimization settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSettings {
    /// Analysis depth passed to single-file runs
    #[serde(default)]
    pub level: u8,
}

fn default_input_directory() -> PathBuf {
    PathBuf::from("inputs")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("outputs")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_directory: default_input_directory(),
            output_directory: default_output_directory(),
            skip_files: BTreeSet::new(),
            filters: FilterSettings::default(),
            optimization: OptimizationSettings::default(),
            extra: BTreeMap::new(),
        }
    }
}

impl FilterSettings {
    /// Whether any filter is configured
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.min_value.is_none() && self.max_value.is_none()
    }

    /// Whether a value falls inside the configured bounds
    pub fn accepts(&self, value: f64) -> bool {
        self.min_value.map_or(true, |min| value >= min)
            && self.max_value.map_or(true, |max| value <= max)
    }
}
