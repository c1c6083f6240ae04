//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use voxmason::config::ConfigFileError;
use voxmason::engine::EngineError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to read or write the configuration file
    ConfigFile(ConfigFileError),
    /// Shape rejected or build run failed
    Build(EngineError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Build(EngineError::Validation(_)) => {
                eprintln!();
                eprintln!("Shape size limits are set in the [limits] section of config.ini.");
                eprintln!("Run 'voxmason config show' to see the current values.");
                process::exit(2)
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!("Run 'voxmason config init --force' to rewrite the defaults.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Build(EngineError::Validation(e)) => write!(f, "Shape rejected: {}", e),
            CliError::Build(e) => write!(f, "Build failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Build(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Build(e)
    }
}
