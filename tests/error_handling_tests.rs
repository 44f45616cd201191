use dataprobe::{DataProbeError, DataProbeResult};
use std::error::Error;
use std::path::PathBuf;

/// Error handling tests
#[cfg(test)]
mod error_handling_tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let errors = vec![
            DataProbeError::Config { message: "Config error".to_string() },
            DataProbeError::MissingInput { path: PathBuf::from("inputs/a.csv") },
            DataProbeError::Read { path: PathBuf::from("a.csv"), message: "bad".to_string() },
            DataProbeError::Filter("column 'x' not found".to_string()),
            DataProbeError::Analysis { message: "Analysis failed".to_string() },
            DataProbeError::Output("Output error".to_string()),
            DataProbeError::Logging("Logging error".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty(), "Error display should not be empty");
        }

        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<DataProbeError>();
    }

    #[test]
    fn test_missing_input_message() {
        let error = DataProbeError::MissingInput {
            path: PathBuf::from("inputs").join("ghost.csv"),
        };
        assert_eq!(error.to_string(), format!("{} doesn't exist!", PathBuf::from("inputs").join("ghost.csv").display()));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: DataProbeError = io_error.into();
        assert!(matches!(error, DataProbeError::Io(_)));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_input_directory_error_chain() {
        let error = DataProbeError::InputDirectory {
            path: PathBuf::from("inputs"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied"),
        };

        let mut current_error: &dyn Error = &error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
            if depth > 10 {
                break;
            }
        }

        assert_eq!(depth, 1);
        assert!(error.to_string().contains("inputs"));
        assert!(error.to_string().contains("Access denied"));
    }

    #[test]
    fn test_result_type() {
        fn error_function() -> DataProbeResult<String> {
            Err(DataProbeError::Config {
                message: "Test error".to_string(),
            })
        }

        fn propagating_function() -> DataProbeResult<usize> {
            let value = error_function()?;
            Ok(value.len())
        }

        let error = propagating_function().unwrap_err();
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Test error"));
    }

    #[test]
    fn test_anyhow_context() {
        use anyhow::Context;

        let result: anyhow::Result<()> = Err(DataProbeError::Filter("column 'x' not found".to_string()))
            .context("could not analyze bench.csv");

        let rendered = format!("{:#}", result.unwrap_err());
        assert_eq!(rendered, "could not analyze bench.csv: Invalid filter: column 'x' not found");
    }

    #[test]
    fn test_error_size() {
        let error_size = std::mem::size_of::<DataProbeError>();
        assert!(error_size <= 128, "DataProbeError too large: {} bytes", error_size);
    }
}
