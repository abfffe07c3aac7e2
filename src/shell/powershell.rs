//! PowerShell wrapping.

use super::{join_script, Invocation};

/// Wrap a command so it runs inside PowerShell without banners, profile
/// loading, or interactive prompts.
///
/// The `exit $LASTEXITCODE` trailer makes PowerShell's own exit code
/// reflect the inner command. Known limitation: if the trailer itself
/// fails, the inner result is masked.
pub(super) fn wrap(command: &str, args: &[String]) -> Invocation {
    let script = join_script(command, args);

    Invocation {
        program: "powershell.exe".into(),
        args: vec![
            "-NoLogo".to_string(),          // Hides the copyright banner at startup
            "-NoProfile".to_string(),       // Does not load the PowerShell profile
            "-NonInteractive".to_string(),  // Does not present an interactive prompt
            "-ExecutionPolicy".to_string(), // Allow running of unsigned code
            "Bypass".to_string(),
            format!("{script}; exit $LASTEXITCODE"),
        ],
    }
}
