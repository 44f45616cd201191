use crate::core::report::{AnalysisDepth, ColumnStats, FileReport};
use crate::domain::config::FilterSettings;
use crate::domain::error::{DataProbeError, DataProbeResult};
use crate::infrastructure::reader::{Table, TableReader};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of an analyzer run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    /// Number of input files analyzed
    pub files_analyzed: usize,
    /// Report files written, in input order
    pub reports: Vec<PathBuf>,
}

/// Something that analyzes a fixed set of files
pub trait Analyzer {
    /// Analyze every file; `None` runs at the default depth
    fn run(&mut self, optimization_level: Option<u8>) -> DataProbeResult<AnalysisSummary>;
}

/// Builds analyzers for the dispatcher
pub trait AnalyzerFactory {
    fn create(
        &self,
        files: Vec<PathBuf>,
        output_dir: &Path,
        filters: Option<&FilterSettings>,
    ) -> DataProbeResult<Box<dyn Analyzer>>;
}

/// Analyzer that reads delimited tables and writes one JSON report per file
pub struct FileAnalyzer {
    files: Vec<PathBuf>,
    output_dir: PathBuf,
    filters: FilterSettings,
    reader: TableReader,
}

impl FileAnalyzer {
    pub fn new(files: Vec<PathBuf>, output_dir: impl Into<PathBuf>, filters: Option<FilterSettings>) -> Self {
        Self {
            files,
            output_dir: output_dir.into(),
            filters: filters.unwrap_or_default(),
            reader: TableReader::new(),
        }
    }

    /// Analyze one file without writing anything
    pub fn analyze_file(&self, path: &Path, depth: AnalysisDepth) -> DataProbeResult<FileReport> {
        let table = self.reader.read(path)?;
        let columns = self.select_columns(&table)?;

        let columns = columns
            .into_iter()
            .map(|index| self.column_stats(&table, index, depth))
            .collect();

        Ok(FileReport {
            file: path.display().to_string(),
            depth,
            rows: table.rows.len(),
            columns,
        })
    }

    fn select_columns(&self, table: &Table) -> DataProbeResult<Vec<usize>> {
        if self.filters.columns.is_empty() {
            return Ok((0..table.headers.len()).collect());
        }

        self.filters
            .columns
            .iter()
            .map(|name| {
                table
                    .column_index(name)
                    .ok_or_else(|| DataProbeError::Filter(format!("column '{}' not found", name)))
            })
            .collect()
    }

    fn column_stats(&self, table: &Table, index: usize, depth: AnalysisDepth) -> ColumnStats {
        let mut values = Vec::new();
        let mut missing = 0;
        let mut filtered = 0;

        for cell in table.column(index) {
            match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    if self.filters.accepts(value) {
                        values.push(value);
                    } else {
                        filtered += 1;
                    }
                }
                _ => missing += 1,
            }
        }

        ColumnStats::compute(&table.headers[index], &values, missing, filtered, depth)
    }

    /// `<file name>.report.json`; the extension is kept so `a.csv` and `a.tsv` do not collide
    fn report_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        self.output_dir.join(format!("{}.report.json", name))
    }

    fn write_report(&self, path: &Path, report: &FileReport) -> DataProbeResult<()> {
        let content = serde_json::to_string_pretty(report).map_err(|e| DataProbeError::Analysis {
            message: format!("Failed to serialize report for {}: {}", report.file, e),
        })?;
        fs::write(path, content + "\n").map_err(|e| DataProbeError::Analysis {
            message: format!("Failed to write report {}: {}", path.display(), e),
        })
    }
}

impl Analyzer for FileAnalyzer {
    fn run(&mut self, optimization_level: Option<u8>) -> DataProbeResult<AnalysisSummary> {
        let depth = AnalysisDepth::from_level(optimization_level);
        tracing::info!(
            "Analyzing {} file(s) at {} depth into {}",
            self.files.len(),
            depth,
            self.output_dir.display()
        );

        fs::create_dir_all(&self.output_dir).map_err(|e| DataProbeError::Analysis {
            message: format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ),
        })?;

        let mut summary = AnalysisSummary::default();
        for file in &self.files {
            let report_path = self.report_path(file);
            if summary.reports.contains(&report_path) {
                return Err(DataProbeError::Analysis {
                    message: format!(
                        "{} would overwrite the report of an earlier input",
                        report_path.display()
                    ),
                });
            }

            let report = self.analyze_file(file, depth)?;
            self.write_report(&report_path, &report)?;

            tracing::debug!("Wrote {}", report_path.display());
            summary.files_analyzed += 1;
            summary.reports.push(report_path);
        }

        Ok(summary)
    }
}

/// Factory producing `FileAnalyzer`s
#[derive(Debug, Default, Clone, Copy)]
pub struct FileAnalyzerFactory;

impl AnalyzerFactory for FileAnalyzerFactory {
    fn create(
        &self,
        files: Vec<PathBuf>,
        output_dir: &Path,
        filters: Option<&FilterSettings>,
    ) -> DataProbeResult<Box<dyn Analyzer>> {
        Ok(Box::new(FileAnalyzer::new(files, output_dir, filters.cloned())))
    }
}
