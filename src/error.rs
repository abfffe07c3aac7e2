//! Error types for shell-probe.

use thiserror::Error;

/// Main error type for shell-probe operations.
///
/// Every failure is surfaced synchronously to the immediate caller and
/// carries whatever output the command produced before failing, so the
/// caller always has enough to diagnose the run.
#[derive(Error, Debug)]
pub enum ShellProbeError {
    /// No usable shell could be located on the PATH.
    #[error("could not find bash or sh on the PATH")]
    ShellNotFound,

    /// The command specification is unusable before execution.
    #[error("invalid command spec: {0}")]
    InvalidSpec(String),

    /// The request payload could not be decoded.
    #[error("could not unmarshal JSON query, error: {0}")]
    MalformedQuery(String),

    /// The deadline elapsed before the command exited.
    #[error("command execution timed out.\nSTDOUT: {stdout}\nSTDERR: {stderr}")]
    Timeout {
        /// Output captured before the deadline fired.
        stdout: String,
        /// Error output captured before the deadline fired.
        stderr: String,
    },

    /// The command exited with a code other than the expected one.
    #[error(
        "command execution failed. Exit code {code}, expected {expected}\nSTDOUT: {stdout}\nSTDERR: {stderr}"
    )]
    UnexpectedExit {
        /// Observed exit code.
        code: i32,
        /// Exit code the spec declared as success.
        expected: i32,
        /// Captured output.
        stdout: String,
        /// Captured error output.
        stderr: String,
    },

    /// Spawn failure, signal death, or another unclassified OS error.
    #[error("command execution failed. Error: {reason}\nSTDOUT: {stdout}\nSTDERR: {stderr}")]
    ExecutionFailed {
        /// OS-level error text.
        reason: String,
        /// Captured output.
        stdout: String,
        /// Captured error output.
        stderr: String,
    },

    /// The watched stream failed or closed before the prompt matched.
    #[error("prompt stream error: {0}")]
    Stream(std::io::Error),

    /// The requested context is not served by this source.
    #[error("context {requested} not available, local context is {local}")]
    WrongContext {
        /// Context named in the request.
        requested: String,
        /// Context this process serves.
        local: String,
    },

    /// The source does not implement the requested method.
    #[error("the command source only supports the get and search methods")]
    UnsupportedMethod,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for shell-probe operations.
pub type Result<T> = std::result::Result<T, ShellProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = ShellProbeError::Timeout {
            stdout: "partial".into(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("partial"));
    }

    #[test]
    fn test_unexpected_exit_display() {
        let err = ShellProbeError::UnexpectedExit {
            code: 2,
            expected: 0,
            stdout: String::new(),
            stderr: "no such file".into(),
        };
        assert!(err.to_string().contains("Exit code 2"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_malformed_query_display() {
        let err = ShellProbeError::MalformedQuery("expected value at line 1".into());
        assert!(err.to_string().contains("could not unmarshal"));
    }

    #[test]
    fn test_wrong_context_display() {
        let err = ShellProbeError::WrongContext {
            requested: "otherhost".into(),
            local: "thishost".into(),
        };
        assert!(err.to_string().contains("otherhost"));
        assert!(err.to_string().contains("thishost"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let probe_err: ShellProbeError = io_err.into();
        assert!(matches!(probe_err, ShellProbeError::Io(_)));
        assert!(probe_err.to_string().contains("I/O error"));
    }
}
