//! CLI-specific error types and exit code mapping

use ue4beat_core::error::Ue4beatError;
use ue4beat_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// IO error (stdin read, stdout write).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from ue4beat-core.
    #[error("{0}")]
    Core(Ue4beatError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                    |
    /// |------|----------------------------|
    /// | 0    | Success                    |
    /// | 1    | General error              |
    /// | 2    | Configuration / usage error|
    /// | 10   | IO error                   |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Core(Ue4beatError::Config(_)) => 2,
            Self::Io(_) | Self::Core(Ue4beatError::Io(_)) => 10,
            Self::Logging(_) | Self::Core(_) => 1,
        }
    }

    /// Downstream closed stdout (e.g. `ue4beat | head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::Io(e) | Self::Core(Ue4beatError::Io(e))
                if e.kind() == std::io::ErrorKind::BrokenPipe
        )
    }
}

impl From<Ue4beatError> for CliError {
    fn from(e: Ue4beatError) -> Self {
        match e {
            Ue4beatError::Config(inner) => Self::Config(inner.to_string()),
            Ue4beatError::Io(inner) => Self::Io(inner),
            other => Self::Core(other),
        }
    }
}

impl From<LogPipelineError> for CliError {
    fn from(e: LogPipelineError) -> Self {
        Ue4beatError::from(e).into()
    }
}
