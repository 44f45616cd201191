// Core module - Analysis engine
pub mod analyzer;
pub mod report;

pub use analyzer::{AnalysisSummary, Analyzer, AnalyzerFactory, FileAnalyzer, FileAnalyzerFactory};
pub use report::{AnalysisDepth, ColumnStats, FileReport};
