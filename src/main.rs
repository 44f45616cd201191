// DataProbe - Batch analysis driver for tabular measurement files
use anyhow::Context;
use dataprobe::cli::{execute_command, Args, ConsoleWriter, OutputWriter};
use dataprobe::infrastructure::logging::{default_log_path, init_logging};
use dataprobe::{Configurations, FileAnalyzerFactory};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse_normalized(std::env::args_os());

    if let Err(e) = init_logging(&default_log_path(), args.verbose) {
        eprintln!("Warning: {}", e);
    }

    let mut writer = ConsoleWriter::new(args.output);
    match run(&args, &mut writer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!("{}", message);
            if let Err(output_err) = writer.write_error(&message) {
                tracing::warn!("Could not report error: {}", output_err);
                eprintln!("Error: {}", message);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, writer: &mut ConsoleWriter) -> anyhow::Result<()> {
    let mut configs = Configurations::load(&args.config)
        .with_context(|| format!("could not load configurations from {}", args.config.display()))?;

    execute_command(args, &mut configs, &FileAnalyzerFactory, writer)?;
    Ok(())
}
