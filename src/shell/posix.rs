//! POSIX shell wrapping.

use crate::error::{Result, ShellProbeError};

use super::{join_script, Invocation};

/// Wrap a command so it runs inside an interactive shell, preferring
/// `bash` and falling back to `sh`.
///
/// The script is handed to the shell with `-c`, so builtins, pipes, and
/// control operators inside `command` behave exactly as they would when
/// typed into the shell.
pub(super) fn wrap(command: &str, args: &[String]) -> Result<Invocation> {
    let shell = which::which("bash")
        .or_else(|_| which::which("sh"))
        .map_err(|_| ShellProbeError::ShellNotFound)?;

    Ok(Invocation {
        program: shell,
        args: vec!["-c".to_string(), join_script(command, args)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_wrap_basic_command() {
        let invocation = wrap("hostname", &[]).unwrap();
        assert!(invocation.program.is_absolute());
        assert_eq!(invocation.args[0], "-c");
        assert_eq!(invocation.args[1], "hostname");
    }

    #[test]
    #[cfg(unix)]
    fn test_wrap_preserves_embedded_quoting() {
        let invocation = wrap("cat '/home/dylan/my file.txt'", &[]).unwrap();
        assert_eq!(invocation.args[1], "cat '/home/dylan/my file.txt'");
    }

    #[test]
    #[cfg(unix)]
    fn test_wrap_escapes_separate_args() {
        let args = vec!["/home/dylan/my file.txt".to_string()];
        let invocation = wrap("cat", &args).unwrap();
        assert_eq!(invocation.args[1], "cat '/home/dylan/my file.txt'");
    }

    #[test]
    #[cfg(unix)]
    fn test_wrap_prefers_bash() {
        if which::which("bash").is_err() {
            return; // nothing to compare against on a bash-less host
        }

        let invocation = wrap("true", &[]).unwrap();
        assert!(invocation.program.ends_with("bash"));
    }
}
