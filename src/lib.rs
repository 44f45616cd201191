//! DataProbe Library
//!
//! Settings store, table reader and analysis engine behind the `dataprobe`
//! command line tool.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::analyzer::{AnalysisSummary, Analyzer, AnalyzerFactory, FileAnalyzer, FileAnalyzerFactory};
pub use domain::config::{FilterSettings, OptimizationSettings, Settings, DEFAULT_CONFIG_PATH};
pub use domain::error::{DataProbeError, DataProbeResult};
pub use infrastructure::config::Configurations;
