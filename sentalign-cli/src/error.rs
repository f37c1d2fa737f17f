//! Error handling for the sentalign CLI

use sentalign_core::AlignError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sentalign CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<F: Into<String>, M: Into<String>>(file: F, message: M) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Each line of a pairs file holds two sentences separated by one tab\n\
                 • Lines starting with '#' and blank lines are ignored",
            );
        }

        CliError::Config { .. } | CliError::Align(AlignError::InvalidConfiguration(_)) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your sentalign.toml configuration file\n\
                 • Gap and indel penalties must be negative, thresholds non-negative",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("pairs.tsv"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_align_error_conversion() {
        let err: CliError = AlignError::invalid_config("gap penalty must be negative").into();
        assert!(matches!(err, CliError::Align(_)));

        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("sentalign.toml"));
    }
}
