//! Shell wrapping: turning a logical command into the concrete argv for
//! the host's shell or scripting host.
//!
//! The platform branch is taken once, when an executor is built, so the
//! execution algorithm itself stays platform-agnostic. Both variants are
//! compiled everywhere to keep them unit-testable.

mod posix;
mod powershell;

use std::path::PathBuf;

use crate::error::Result;

/// A concrete invocation produced by wrapping a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to spawn (absolute shell path on POSIX platforms).
    pub program: PathBuf,
    /// Argument vector handed to the program.
    pub args: Vec<String>,
}

/// The wrapping strategy for the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// POSIX interactive shell: `bash -c`, falling back to `sh -c`.
    Posix,
    /// Windows scripting host: `powershell.exe` in non-interactive mode.
    PowerShell,
}

impl ShellKind {
    /// Detect the strategy for the current platform.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Posix
        }
    }

    /// Wrap a command and its arguments into a spawnable invocation.
    ///
    /// When `args` is empty the command string is passed through as a
    /// whole script, so embedded pipes, quoting, and shell builtins keep
    /// working. When `args` is present each one is escaped before being
    /// appended.
    pub fn wrap(self, command: &str, args: &[String]) -> Result<Invocation> {
        match self {
            Self::Posix => posix::wrap(command, args),
            Self::PowerShell => Ok(powershell::wrap(command, args)),
        }
    }

    /// The newline sequence this platform's programs emit.
    pub fn newline(self) -> &'static str {
        match self {
            Self::Posix => "\n",
            Self::PowerShell => "\r\n",
        }
    }
}

/// Join a command with individually escaped arguments into one script.
///
/// The command itself is left untouched: it may already be a script
/// fragment that relies on shell metacharacters.
fn join_script(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, shell_words::join(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_detection() {
        let kind = ShellKind::host();
        if cfg!(windows) {
            assert_eq!(kind, ShellKind::PowerShell);
        } else {
            assert_eq!(kind, ShellKind::Posix);
        }
    }

    #[test]
    fn test_newline() {
        assert_eq!(ShellKind::Posix.newline(), "\n");
        assert_eq!(ShellKind::PowerShell.newline(), "\r\n");
    }

    #[test]
    fn test_join_script_no_args_passthrough() {
        let script = join_script("cat '/home/dylan/my file.txt'", &[]);
        assert_eq!(script, "cat '/home/dylan/my file.txt'");
    }

    #[test]
    fn test_join_script_escapes_args() {
        let args = vec!["a b".to_string(), "plain".to_string()];
        let script = join_script("printf", &args);
        assert_eq!(script, "printf 'a b' plain");
    }
}
