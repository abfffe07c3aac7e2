//! Captured results of a single child process run.

/// How a child process run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The process exited on its own with a code.
    Exited(i32),
    /// The deadline fired and the process was killed.
    DeadlineExceeded,
    /// The process died without an exit code (e.g. killed by a signal).
    Signaled,
}

/// Everything captured from one invocation. Created per run, consumed by
/// the result mapper, never persisted.
#[derive(Debug)]
pub struct ExecutionOutcome {
    /// Captured stdout bytes (possibly partial on timeout).
    pub stdout: Vec<u8>,
    /// Captured stderr bytes (possibly partial on timeout).
    pub stderr: Vec<u8>,
    /// Classification of the run.
    pub status: OutcomeStatus,
}

impl ExecutionOutcome {
    /// Stdout decoded as UTF-8 (lossy), untrimmed.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stderr decoded as UTF-8 (lossy), untrimmed.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Strip exactly one trailing platform newline sequence.
///
/// Programs almost always terminate their output with a newline that is
/// not part of the value; more than one is preserved untouched.
pub fn trim_trailing_newline(text: &str, newline: &str) -> String {
    text.strip_suffix(newline).unwrap_or(text).to_string()
}
