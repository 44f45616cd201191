use crate::domain::config::{FilterSettings, OptimizationSettings, Settings};
use crate::domain::error::{DataProbeError, DataProbeResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-backed settings store
///
/// Loaded once per process. The directory setters write the file back
/// immediately so later invocations see the change.
#[derive(Debug, Clone)]
pub struct Configurations {
    path: PathBuf,
    settings: Settings,
}

impl Configurations {
    /// Load settings from a JSON file
    pub fn load(path: impl Into<PathBuf>) -> DataProbeResult<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|e| DataProbeError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let settings: Settings = serde_json::from_str(&content).map_err(|e| DataProbeError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(Self { path, settings })
    }

    /// Wrap settings that will be persisted at `path`
    pub fn from_settings(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Write the current settings back to the backing file
    pub fn save(&self) -> DataProbeResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DataProbeError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = serde_json::to_string_pretty(&self.settings).map_err(|e| DataProbeError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&self.path, content + "\n").map_err(|e| DataProbeError::Config {
            message: format!("Failed to write config file {}: {}", self.path.display(), e),
        })?;

        tracing::debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_input_directory(&self) -> &Path {
        &self.settings.input_directory
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.settings.output_directory
    }

    pub fn get_files_to_skip(&self) -> &BTreeSet<String> {
        &self.settings.skip_files
    }

    pub fn get_filters(&self) -> &FilterSettings {
        &self.settings.filters
    }

    pub fn get_optimization(&self) -> &OptimizationSettings {
        &self.settings.optimization
    }

    /// Names of the regular, non-hidden files directly inside the input directory
    pub fn get_input_files(&self) -> DataProbeResult<BTreeSet<String>> {
        let dir = self.get_input_directory();
        let entries = fs::read_dir(dir).map_err(|source| DataProbeError::InputDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| DataProbeError::InputDirectory {
                path: dir.to_path_buf(),
                source,
            })?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            files.insert(name);
        }

        Ok(files)
    }

    /// Input files that are not on the skip list
    pub fn get_files_to_analyze(&self) -> DataProbeResult<BTreeSet<String>> {
        let inputs = self.get_input_files()?;
        Ok(inputs
            .difference(self.get_files_to_skip())
            .cloned()
            .collect())
    }

    /// Change the input directory and persist it
    pub fn set_input_directory(&mut self, path: impl Into<PathBuf>) -> DataProbeResult<()> {
        let path = path.into();
        if !path.is_dir() {
            tracing::warn!("Input directory {} does not exist yet", path.display());
        }
        tracing::info!("Input directory set to {}", path.display());
        self.settings.input_directory = path;
        self.save()
    }

    /// Change the output directory and persist it
    pub fn set_output_directory(&mut self, path: impl Into<PathBuf>) -> DataProbeResult<()> {
        let path = path.into();
        tracing::info!("Output directory set to {}", path.display());
        self.settings.output_directory = path;
        self.save()
    }
}
