use crate::cli::args::OutputFormat;
use crate::domain::config::Settings;
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::{self, Write};
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_settings(&mut self, settings: &Settings) -> Result<(), OutputError>;
    fn write_file_set(&mut self, title: &str, files: &BTreeSet<String>) -> Result<(), OutputError>;
    fn write_message(&mut self, message: &str) -> Result<(), OutputError>;
    fn write_error(&mut self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::DataProbeError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer; results go to `out`, errors to `err`
pub struct ConsoleWriter<W: Write = io::Stdout, E: Write = io::Stderr> {
    format: OutputFormat,
    out: W,
    err: E,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writers(format, io::stdout(), io::stderr())
    }
}

impl<W: Write> ConsoleWriter<W> {
    /// Write results to any sink instead of stdout; errors still go to stderr
    pub fn with_writer(format: OutputFormat, out: W) -> Self {
        Self::with_writers(format, out, io::stderr())
    }
}

impl<W: Write, E: Write> ConsoleWriter<W, E> {
    pub fn with_writers(format: OutputFormat, out: W, err: E) -> Self {
        Self { format, out, err }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> OutputWriter for ConsoleWriter<W, E> {
    fn write_settings(&mut self, settings: &Settings) -> Result<(), OutputError> {
        let value = serde_json::to_value(settings)?;
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "Configurations:")?;
                for (key, value) in settings_entries(&value) {
                    writeln!(self.out, "  {}: {}", key, value)?;
                }
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&value)?)?;
            }
            OutputFormat::Table => {
                let rows: Vec<SettingRow> = settings_entries(&value)
                    .into_iter()
                    .map(|(setting, value)| SettingRow { setting, value })
                    .collect();
                writeln!(self.out, "{}", Table::new(rows))?;
            }
        }
        Ok(())
    }

    fn write_file_set(&mut self, title: &str, files: &BTreeSet<String>) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{} ({}):", title, files.len())?;
                for file in files {
                    writeln!(self.out, "  {}", file)?;
                }
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(files)?)?;
            }
            OutputFormat::Table => {
                if !files.is_empty() {
                    let rows: Vec<FileRow> = files
                        .iter()
                        .enumerate()
                        .map(|(i, name)| FileRow {
                            index: i + 1,
                            name: name.clone(),
                        })
                        .collect();
                    writeln!(self.out, "{}", Table::new(rows))?;
                }
            }
        }
        Ok(())
    }

    fn write_message(&mut self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "message": message });
                writeln!(self.out, "{}", output)?;
            }
            _ => writeln!(self.out, "{}", message)?,
        }
        Ok(())
    }

    fn write_error(&mut self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "error": error });
                writeln!(self.err, "{}", output)?;
            }
            _ => writeln!(self.err, "Error: {}", error)?,
        }
        self.err.flush()?;
        Ok(())
    }
}

/// Flatten the settings object into `key: value` pairs, nested objects dotted
fn settings_entries(value: &Value) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    collect_entries("", value, &mut entries);
    entries
}

fn collect_entries(prefix: &str, value: &Value, entries: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if prefix.is_empty() || !map.is_empty() => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_entries(&key, child, entries);
            }
        }
        Value::String(s) => entries.push((prefix.to_string(), s.clone())),
        other => entries.push((prefix.to_string(), other.to_string())),
    }
}

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    setting: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File")]
    name: String,
}
