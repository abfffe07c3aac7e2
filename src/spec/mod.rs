//! Command specification: the structured request a caller sends to have
//! a command executed.
//!
//! The canonical shape keeps `command` and `args` separate; older callers
//! that pack the whole invocation into `command` still work because the
//! shell wrapper passes a bare command through as a script.

mod wire;

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellProbeError};

/// Default timeout applied when a spec does not carry one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A request to execute a single command.
///
/// Wire format notes: `timeout` is a human-readable duration string
/// (`"500ms"`, `"1h30m"`, `"0s"` meaning unset) and `stdin` is base64,
/// since the transport cannot carry raw binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSpec {
    /// The program to run, or a full script body when `args` is empty.
    pub command: String,

    /// Arguments appended to `command`, escaped individually.
    pub args: Vec<String>,

    /// The exit code that counts as success (usually 0).
    pub expected_exit: i32,

    /// Deadline for the whole execution. Unset or zero means the default
    /// of [`DEFAULT_TIMEOUT`] applies.
    #[serde(with = "wire::duration_human")]
    pub timeout: Option<Duration>,

    /// Working directory for the child. Empty means inherit.
    pub dir: String,

    /// Environment overlaid on the inherited process environment.
    pub env: HashMap<String, String>,

    /// Bytes piped to the child's stdin, e.g. to satisfy a program that
    /// reads interactively.
    #[serde(with = "wire::base64_bytes")]
    pub stdin: Vec<u8>,

    /// User to run the command as. Declared only; not enforced as a
    /// security boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_as: Option<String>,
}

impl Default for CommandSpec {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            expected_exit: 0,
            timeout: None,
            dir: String::new(),
            env: HashMap::new(),
            stdin: Vec::new(),
            run_as: None,
        }
    }
}

impl CommandSpec {
    /// Create a spec for the given command with default parameters.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the exit code that counts as success.
    pub fn expected_exit(mut self, code: i32) -> Self {
        self.expected_exit = code;
        self
    }

    /// Set the execution deadline.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the working directory.
    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Add an environment variable override.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the stdin payload.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = bytes.into();
        self
    }

    /// Declare the user to run as.
    pub fn run_as(mut self, user: impl Into<String>) -> Self {
        self.run_as = Some(user.into());
        self
    }

    /// Check that the spec can be executed at all.
    pub fn validate(&self) -> Result<()> {
        if self.command.is_empty() {
            return Err(ShellProbeError::InvalidSpec("command is empty".into()));
        }

        Ok(())
    }

    /// The timeout that will actually bound execution.
    ///
    /// Always positive: unset and zero both resolve to the default.
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout {
            Some(t) if !t.is_zero() => t,
            _ => DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_QUERY: &str = r#"{
        "command": "cat",
        "args": ["hosts"],
        "expected_exit": 0,
        "timeout": "500ms",
        "dir": "/etc",
        "env": {
            "TEST": "foo"
        },
        "stdin": "eWVzCmZvbyBiYXI="
    }"#;

    fn sample_spec() -> CommandSpec {
        CommandSpec::new("cat")
            .arg("hosts")
            .timeout(Duration::from_millis(500))
            .dir("/etc")
            .env("TEST", "foo")
            .stdin(b"yes\nfoo bar".to_vec())
    }

    #[test]
    fn test_builder_chain() {
        let spec = sample_spec();
        assert_eq!(spec.command, "cat");
        assert_eq!(spec.args, vec!["hosts"]);
        assert_eq!(spec.expected_exit, 0);
        assert_eq!(spec.timeout, Some(Duration::from_millis(500)));
        assert_eq!(spec.dir, "/etc");
        assert_eq!(spec.env.get("TEST"), Some(&"foo".to_string()));
    }

    #[test]
    fn test_unmarshal() {
        let spec: CommandSpec = serde_json::from_str(JSON_QUERY).unwrap();
        assert_eq!(spec, sample_spec());
        assert_eq!(spec.stdin, b"yes\nfoo bar");
    }

    #[test]
    fn test_roundtrip() {
        let spec = sample_spec();
        let json = serde_json::to_string(&spec).unwrap();
        let back: CommandSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_roundtrip_defaults() {
        let spec = CommandSpec::new("hostname");
        let json = serde_json::to_string(&spec).unwrap();
        let back: CommandSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
        assert_eq!(back.timeout, None);
        assert!(back.stdin.is_empty());
    }

    #[test]
    fn test_effective_timeout_default() {
        let spec = CommandSpec::new("hostname");
        assert_eq!(spec.effective_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_effective_timeout_zero_means_default() {
        let mut spec = CommandSpec::new("hostname");
        spec.timeout = Some(Duration::ZERO);
        assert_eq!(spec.effective_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_effective_timeout_explicit() {
        let spec = CommandSpec::new("hostname").timeout(Duration::from_secs(1));
        assert_eq!(spec.effective_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_validate_empty_command() {
        let spec = CommandSpec::default();
        assert!(matches!(
            spec.validate(),
            Err(ShellProbeError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_run_as_not_serialized_when_absent() {
        let spec = CommandSpec::new("hostname");
        let json = serde_json::to_string(&spec).unwrap();
        assert!(!json.contains("run_as"));

        let spec = spec.run_as("root");
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("run_as"));
    }
}
