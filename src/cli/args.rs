use crate::domain::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

/// Multi-character short flags and the long flags they stand for
const LEGACY_SHORT_FLAGS: [(&str, &str); 7] = [
    ("-sc", "--show_configs"),
    ("-li", "--list_inputs"),
    ("-ls", "--list_skips"),
    ("-la", "--list_files"),
    ("-si", "--set_inputdir"),
    ("-so", "--set_outputdir"),
    ("-rf", "--run-file"),
];

/// Command line arguments for DataProbe
///
/// Every action flag is independent; handlers run in a fixed order no
/// matter how the flags were given.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "dataprobe",
    version = env!("CARGO_PKG_VERSION"),
    about = "Passing named arguments to analyzer",
    long_about = "Inspect and update the analysis settings, list input files and run the analyzer over a whole input directory or a single file."
)]
pub struct Args {
    /// Show configurations [-sc]
    #[arg(long = "show_configs")]
    pub show_configs: bool,

    /// List files from the input directory [-li]
    #[arg(long = "list_inputs")]
    pub list_inputs: bool,

    /// List files that are specified to be skipped in configurations [-ls]
    #[arg(long = "list_skips")]
    pub list_skips: bool,

    /// List files that will be analyzed as per current configurations [-la]
    #[arg(long = "list_files")]
    pub list_files: bool,

    /// Set input directory in configurations [-si]
    #[arg(long = "set_inputdir", value_name = "PATH")]
    pub set_inputdir: Option<PathBuf>,

    /// Set output directory in configurations [-so]
    #[arg(long = "set_outputdir", value_name = "PATH")]
    pub set_outputdir: Option<PathBuf>,

    /// Run all the files in the input directory and put the results in outputs
    #[arg(short = 'r', long = "run")]
    pub run: bool,

    /// Run a single file, relative to the input directory [-rf]
    #[arg(long = "run-file", value_name = "PATH")]
    pub run_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Mirror log output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
}

impl Args {
    /// Parse arguments, accepting the multi-character short flags
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Fallible variant of [`Args::parse_normalized`]
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Whether any action flag is set
    pub fn has_action(&self) -> bool {
        self.show_configs
            || self.list_inputs
            || self.list_skips
            || self.list_files
            || self.set_inputdir.is_some()
            || self.set_outputdir.is_some()
            || self.run
            || self.run_file.is_some()
    }
}

/// Rewrite `-sc`, `-si=PATH` and friends to their long form
///
/// clap only knows single-character shorts, so these tokens would otherwise
/// be read as clusters. Rewriting stops at `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            rewrite_short_flag(text).map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn rewrite_short_flag(token: &str) -> Option<String> {
    let (flag, value) = match token.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (token, None),
    };

    let (_, long) = LEGACY_SHORT_FLAGS.iter().find(|(short, _)| *short == flag)?;
    Some(match value {
        Some(value) => format!("{}={}", long, value),
        None => long.to_string(),
    })
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_normalized(std::iter::once("dataprobe").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags() {
        let args = parse(&[]);
        assert!(!args.has_action());
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn test_long_flags() {
        let args = parse(&[
            "--show_configs",
            "--list_inputs",
            "--list_skips",
            "--list_files",
            "--set_inputdir",
            "in",
            "--set_outputdir=out",
            "--run",
            "--run-file",
            "one.csv",
        ]);
        assert!(args.show_configs && args.list_inputs && args.list_skips && args.list_files);
        assert_eq!(args.set_inputdir, Some(PathBuf::from("in")));
        assert_eq!(args.set_outputdir, Some(PathBuf::from("out")));
        assert!(args.run);
        assert_eq!(args.run_file, Some(PathBuf::from("one.csv")));
    }

    #[test]
    fn test_legacy_short_flags() {
        let args = parse(&["-sc", "-li", "-ls", "-la", "-si", "in", "-so=out", "-r", "-rf", "x.csv"]);
        assert!(args.show_configs && args.list_inputs && args.list_skips && args.list_files);
        assert_eq!(args.set_inputdir, Some(PathBuf::from("in")));
        assert_eq!(args.set_outputdir, Some(PathBuf::from("out")));
        assert!(args.run);
        assert_eq!(args.run_file, Some(PathBuf::from("x.csv")));
    }

    #[test]
    fn test_single_character_options_still_work() {
        let args = parse(&["-c", "alt.json", "-o", "json", "-v"]);
        assert_eq!(args.config, PathBuf::from("alt.json"));
        assert_eq!(args.output, OutputFormat::Json);
        assert!(args.verbose);
    }

    #[test]
    fn test_normalize_stops_at_double_dash() {
        let normalized = normalize_args(["dataprobe", "-sc", "--", "-sc"]);
        assert_eq!(normalized, vec!["dataprobe", "--show_configs", "--", "-sc"]);
    }

    #[test]
    fn test_value_that_looks_like_flag_name_is_untouched() {
        assert_eq!(rewrite_short_flag("-scx"), None);
        assert_eq!(rewrite_short_flag("data.csv"), None);
        assert_eq!(rewrite_short_flag("-si=a=b").as_deref(), Some("--set_inputdir=a=b"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = Args::try_parse_normalized(["dataprobe", "--bogus"]);
        assert!(result.is_err());
    }
}
