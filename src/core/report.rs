use serde::{Deserialize, Serialize};

/// How much work the analyzer does per column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    /// count, missing, sum, min, max, mean
    Basic,
    /// adds standard deviation
    Standard,
    /// adds median and quartiles
    Detailed,
}

impl AnalysisDepth {
    /// Map an optimization level to a depth; no level means `Standard`
    pub fn from_level(level: Option<u8>) -> Self {
        match level {
            Some(0) => Self::Basic,
            None | Some(1) => Self::Standard,
            Some(_) => Self::Detailed,
        }
    }
}

impl std::fmt::Display for AnalysisDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisDepth::Basic => write!(f, "basic"),
            AnalysisDepth::Standard => write!(f, "standard"),
            AnalysisDepth::Detailed => write!(f, "detailed"),
        }
    }
}

/// Statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    /// Numeric values that passed the filters
    pub count: usize,
    /// Cells that were empty or not numeric
    pub missing: usize,
    /// Numeric values dropped by the value bounds
    pub filtered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
}

impl ColumnStats {
    /// Compute statistics over accepted values
    pub fn compute(
        name: impl Into<String>,
        values: &[f64],
        missing: usize,
        filtered: usize,
        depth: AnalysisDepth,
    ) -> Self {
        let mut stats = Self {
            name: name.into(),
            count: values.len(),
            missing,
            filtered,
            sum: None,
            min: None,
            max: None,
            mean: None,
            std_dev: None,
            median: None,
            q1: None,
            q3: None,
        };

        if values.is_empty() {
            return stats;
        }

        let n = values.len() as f64;
        let sum: f64 = values.iter().sum();
        let mean = sum / n;

        stats.sum = Some(sum);
        stats.min = values.iter().copied().reduce(f64::min);
        stats.max = values.iter().copied().reduce(f64::max);
        stats.mean = Some(mean);

        if depth >= AnalysisDepth::Standard {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            stats.std_dev = Some(variance.sqrt());
        }

        if depth >= AnalysisDepth::Detailed {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            stats.q1 = Some(quantile(&sorted, 0.25));
            stats.median = Some(quantile(&sorted, 0.5));
            stats.q3 = Some(quantile(&sorted, 0.75));
        }

        stats
    }
}

/// Linear-interpolated quantile of sorted, non-empty values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Report written for one analyzed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub depth: AnalysisDepth,
    pub rows: usize,
    pub columns: Vec<ColumnStats>,
}
