use crate::cli::args::Args;
use crate::cli::output::OutputWriter;
use crate::core::analyzer::{AnalysisSummary, AnalyzerFactory};
use crate::domain::error::{DataProbeError, DataProbeResult};
use crate::infrastructure::config::Configurations;
use std::path::{Path, PathBuf};

/// Execute every action flag set in `args`
///
/// Handlers run in a fixed order: show_configs, list_inputs, list_skips,
/// list_files, set_inputdir, set_outputdir, run, run_file. A directory
/// change therefore applies to a run requested in the same invocation.
pub fn execute_command(
    args: &Args,
    configs: &mut Configurations,
    factory: &dyn AnalyzerFactory,
    writer: &mut dyn OutputWriter,
) -> DataProbeResult<()> {
    if !args.has_action() {
        tracing::debug!("No action flags given");
    }

    if args.show_configs {
        writer.write_settings(configs.settings())?;
    }

    if args.list_inputs {
        let files = configs.get_input_files()?;
        writer.write_file_set("Input files", &files)?;
    }

    if args.list_skips {
        writer.write_file_set("Skipped files", configs.get_files_to_skip())?;
    }

    if args.list_files {
        let files = configs.get_files_to_analyze()?;
        writer.write_file_set("Files to analyze", &files)?;
    }

    if let Some(path) = &args.set_inputdir {
        configs.set_input_directory(path)?;
        writer.write_settings(configs.settings())?;
    }

    if let Some(path) = &args.set_outputdir {
        configs.set_output_directory(path)?;
        writer.write_settings(configs.settings())?;
    }

    if args.run {
        run_all(configs, factory, writer)?;
    }

    if let Some(file) = &args.run_file {
        run_file(file, configs, factory, writer)?;
    }

    Ok(())
}

fn run_all(
    configs: &Configurations,
    factory: &dyn AnalyzerFactory,
    writer: &mut dyn OutputWriter,
) -> DataProbeResult<()> {
    let input_dir = configs.get_input_directory();
    let files: Vec<PathBuf> = configs
        .get_files_to_analyze()?
        .iter()
        .map(|name| input_dir.join(name))
        .collect();

    tracing::info!("Batch run over {} file(s) from {}", files.len(), input_dir.display());

    let mut analyzer = factory.create(files, configs.get_output_directory(), Some(configs.get_filters()))?;
    let summary = analyzer.run(None)?;
    report_summary(&summary, writer)
}

fn run_file(
    file: &Path,
    configs: &Configurations,
    factory: &dyn AnalyzerFactory,
    writer: &mut dyn OutputWriter,
) -> DataProbeResult<()> {
    let path = configs.get_input_directory().join(file);
    if !path.exists() {
        tracing::error!("{} doesn't exist!", path.display());
        return Err(DataProbeError::MissingInput { path });
    }

    let level = configs.get_optimization().level;
    tracing::info!("Single run over {} at optimization level {}", path.display(), level);

    let mut analyzer = factory.create(vec![path], configs.get_output_directory(), None)?;
    let summary = analyzer.run(Some(level))?;
    report_summary(&summary, writer)
}

fn report_summary(summary: &AnalysisSummary, writer: &mut dyn OutputWriter) -> DataProbeResult<()> {
    tracing::info!("Analyzed {} file(s)", summary.files_analyzed);
    for report in &summary.reports {
        writer.write_message(&format!("Report written to {}", report.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::cli::output::ConsoleWriter;
    use crate::core::analyzer::Analyzer;
    use crate::domain::config::{FilterSettings, Settings};
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create {
            files: Vec<PathBuf>,
            output_dir: PathBuf,
            filters: Option<FilterSettings>,
        },
        Run(Option<u8>),
    }

    #[derive(Default)]
    struct RecordingFactory {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    struct RecordingAnalyzer {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl Analyzer for RecordingAnalyzer {
        fn run(&mut self, optimization_level: Option<u8>) -> DataProbeResult<AnalysisSummary> {
            self.calls.borrow_mut().push(Call::Run(optimization_level));
            Ok(AnalysisSummary::default())
        }
    }

    impl AnalyzerFactory for RecordingFactory {
        fn create(
            &self,
            files: Vec<PathBuf>,
            output_dir: &Path,
            filters: Option<&FilterSettings>,
        ) -> DataProbeResult<Box<dyn Analyzer>> {
            self.calls.borrow_mut().push(Call::Create {
                files,
                output_dir: output_dir.to_path_buf(),
                filters: filters.cloned(),
            });
            Ok(Box::new(RecordingAnalyzer {
                calls: Rc::clone(&self.calls),
            }))
        }
    }

    struct Fixture {
        temp_dir: TempDir,
        configs: Configurations,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let inputs = temp_dir.path().join("inputs");
            fs::create_dir_all(&inputs).unwrap();
            for name in ["a.csv", "b.csv", "skip.csv"] {
                fs::write(inputs.join(name), "x\n1\n").unwrap();
            }

            let mut settings = Settings::default();
            settings.input_directory = inputs;
            settings.output_directory = temp_dir.path().join("outputs");
            settings.skip_files.insert("skip.csv".to_string());
            settings.filters.columns = vec!["x".to_string()];
            settings.optimization.level = 3;

            let configs = Configurations::from_settings(temp_dir.path().join("configurations.json"), settings);
            configs.save().unwrap();
            Self { temp_dir, configs }
        }

        fn execute(&mut self, args: Args) -> (DataProbeResult<()>, String, Vec<Call>) {
            let factory = RecordingFactory::default();
            let mut writer = ConsoleWriter::with_writer(OutputFormat::Text, Vec::new());
            let result = execute_command(&args, &mut self.configs, &factory, &mut writer);
            let output = String::from_utf8(writer.into_inner()).unwrap();
            let calls = factory.calls.borrow().clone();
            (result, output, calls)
        }
    }

    #[test]
    fn test_no_flags_is_noop() {
        let mut fixture = Fixture::new();
        let before = fs::read_to_string(fixture.configs.path()).unwrap();

        let (result, output, calls) = fixture.execute(Args::default());

        assert!(result.is_ok());
        assert!(output.is_empty());
        assert!(calls.is_empty());
        assert_eq!(fs::read_to_string(fixture.configs.path()).unwrap(), before);
    }

    #[test]
    fn test_show_configs_prints_without_mutation() {
        let mut fixture = Fixture::new();
        let before = fixture.configs.settings().clone();

        let (result, output, calls) = fixture.execute(Args {
            show_configs: true,
            ..Args::default()
        });

        assert!(result.is_ok());
        assert!(output.starts_with("Configurations:"));
        assert!(output.contains("optimization.level: 3"));
        assert!(calls.is_empty());
        assert_eq!(fixture.configs.settings(), &before);
    }

    #[test]
    fn test_listing_flags_in_fixed_order() {
        let mut fixture = Fixture::new();
        let (result, output, _) = fixture.execute(Args {
            list_files: true,
            list_skips: true,
            list_inputs: true,
            ..Args::default()
        });

        assert!(result.is_ok());
        let inputs = output.find("Input files (3):").unwrap();
        let skips = output.find("Skipped files (1):").unwrap();
        let eligible = output.find("Files to analyze (2):").unwrap();
        assert!(inputs < skips && skips < eligible);
        assert!(output.ends_with("Files to analyze (2):\n  a.csv\n  b.csv\n"));
    }

    #[test]
    fn test_run_uses_eligible_files_and_filters() {
        let mut fixture = Fixture::new();
        let inputs = fixture.configs.get_input_directory().to_path_buf();
        let outputs = fixture.configs.get_output_directory().to_path_buf();
        let filters = fixture.configs.get_filters().clone();

        let (result, _, calls) = fixture.execute(Args {
            run: true,
            ..Args::default()
        });

        assert!(result.is_ok());
        assert_eq!(
            calls,
            vec![
                Call::Create {
                    files: vec![inputs.join("a.csv"), inputs.join("b.csv")],
                    output_dir: outputs,
                    filters: Some(filters),
                },
                Call::Run(None),
            ]
        );
    }

    #[test]
    fn test_set_inputdir_applies_before_run() {
        let mut fixture = Fixture::new();
        let new_dir = fixture.temp_dir.path().join("fresh");
        fs::create_dir_all(&new_dir).unwrap();
        fs::write(new_dir.join("z.csv"), "x\n2\n").unwrap();

        let (result, output, calls) = fixture.execute(Args {
            run: true,
            set_inputdir: Some(new_dir.clone()),
            ..Args::default()
        });

        assert!(result.is_ok());
        assert!(output.contains("Configurations:"));
        match &calls[0] {
            Call::Create { files, .. } => assert_eq!(files, &vec![new_dir.join("z.csv")]),
            other => panic!("unexpected call {:?}", other),
        }

        let persisted = Configurations::load(fixture.configs.path()).unwrap();
        assert_eq!(persisted.get_input_directory(), new_dir.as_path());
    }

    #[test]
    fn test_set_outputdir_persists() {
        let mut fixture = Fixture::new();
        let (result, output, calls) = fixture.execute(Args {
            set_outputdir: Some(PathBuf::from("elsewhere")),
            ..Args::default()
        });

        assert!(result.is_ok());
        assert!(output.contains("output_directory: elsewhere"));
        assert!(calls.is_empty());
        let persisted = Configurations::load(fixture.configs.path()).unwrap();
        assert_eq!(persisted.get_output_directory(), Path::new("elsewhere"));
    }

    #[test]
    fn test_run_file_uses_optimization_level_without_filters() {
        let mut fixture = Fixture::new();
        let inputs = fixture.configs.get_input_directory().to_path_buf();
        let outputs = fixture.configs.get_output_directory().to_path_buf();

        let (result, _, calls) = fixture.execute(Args {
            run_file: Some(PathBuf::from("skip.csv")),
            ..Args::default()
        });

        assert!(result.is_ok());
        assert_eq!(
            calls,
            vec![
                Call::Create {
                    files: vec![inputs.join("skip.csv")],
                    output_dir: outputs,
                    filters: None,
                },
                Call::Run(Some(3)),
            ]
        );
    }

    #[test]
    fn test_run_file_missing_fails_without_analyzer() {
        let mut fixture = Fixture::new();
        let expected = fixture.configs.get_input_directory().join("absent.csv");

        let (result, output, calls) = fixture.execute(Args {
            list_skips: true,
            run_file: Some(PathBuf::from("absent.csv")),
            ..Args::default()
        });

        match result {
            Err(DataProbeError::MissingInput { path }) => assert_eq!(path, expected),
            other => panic!("expected missing input error, got {:?}", other),
        }
        assert!(output.contains("Skipped files (1):"));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_run_then_run_file() {
        let mut fixture = Fixture::new();
        let (result, _, calls) = fixture.execute(Args {
            run: true,
            run_file: Some(PathBuf::from("a.csv")),
            ..Args::default()
        });

        assert!(result.is_ok());
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[1], Call::Run(None));
        assert_eq!(calls[3], Call::Run(Some(3)));
    }
}
